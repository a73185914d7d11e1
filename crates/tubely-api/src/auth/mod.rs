//! Bearer-token authentication

mod extractor;
pub mod jwt;

pub use extractor::AuthUser;
pub use jwt::{extract_bearer_token, generate_access_token, validate_token, Claims};
