//! PostgreSQL persistence for Vasari.
//!
//! Implements the repository traits from `vasari_interface` on top of
//! diesel with an r2d2 connection pool. Blocking diesel calls run on the
//! tokio blocking pool so async callers never stall a runtime worker.
//!
//! The articles table carries a unique constraint over
//! (tenant, location, topic, subtopic); the resulting unique-violation
//! maps to a recoverable Conflict error, which is how concurrent runs
//! racing for the same slot are resolved.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article_repository;
mod connection;
mod cursor_repository;
mod directory;
mod models;
pub mod schema;
mod templates;

pub use article_repository::DatabaseArticleRepository;
pub use connection::{PgPool, establish_pool, run_migrations};
pub use cursor_repository::DatabaseCursorRepository;
pub use directory::DatabaseDirectory;
pub use templates::DatabaseTemplateStore;
