//! Error types for the Vasari content generation engine.
//!
//! This crate provides the foundation error types used throughout the Vasari
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vasari_error::{Stage, TransportError, VasariResult};
//!
//! fn create_conversation() -> VasariResult<String> {
//!     Err(TransportError::new(Stage::Conversation, "connection refused"))?
//! }
//!
//! match create_conversation() {
//!     Ok(id) => println!("conversation {}", id),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod generation;
mod protocol;
mod publish;
mod retry;
mod stage;
mod transport;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{VasariError, VasariErrorKind, VasariResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use protocol::ProtocolError;
pub use publish::{PublishError, PublishErrorKind};
pub use retry::RetryableError;
pub use stage::Stage;
pub use transport::TransportError;
