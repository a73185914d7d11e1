//! Tubely Database Layer
//!
//! Repositories for video metadata. The API depends on the [`VideoRepository`] trait;
//! [`PgVideoRepository`] backs it with Postgres.

pub mod db;

pub use db::{run_migrations, PgVideoRepository, VideoRepository};

#[cfg(any(test, feature = "test-helpers"))]
pub use db::InMemoryVideoRepository;
