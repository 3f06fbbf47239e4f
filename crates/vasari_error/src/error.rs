//! Top-level error wrapper types.

use crate::{
    ConfigError, DatabaseError, GenerationError, ProtocolError, PublishError, TransportError,
};

/// The foundation error enum covering every failure class in the pipeline.
///
/// # Examples
///
/// ```
/// use vasari_error::{Stage, TransportError, VasariError};
///
/// let transport = TransportError::new(Stage::Status, "connection reset");
/// let err: VasariError = transport.into();
/// assert!(format!("{}", err).contains("Transport Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VasariErrorKind {
    /// Network failure talking to an external service
    #[from(TransportError)]
    Transport(TransportError),
    /// External service returned an unparseable shape
    #[from(ProtocolError)]
    Protocol(ProtocolError),
    /// External generation job failed, was cancelled, timed out, or came back empty
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Asset download/upload failure
    #[from(PublishError)]
    Publish(PublishError),
    /// Repository or cursor persistence failure
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Vasari error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vasari_error::{ConfigError, VasariResult};
///
/// fn might_fail() -> VasariResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("success"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vasari Error: {}", _0)]
pub struct VasariError(Box<VasariErrorKind>);

impl VasariError {
    /// Create a new error from a kind.
    pub fn new(kind: VasariErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VasariErrorKind {
        &self.0
    }

    /// Whether this error is a recoverable slot conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind(), VasariErrorKind::Database(e) if e.is_conflict())
    }
}

// Generic From implementation for any type that converts to VasariErrorKind
impl<T> From<T> for VasariError
where
    T: Into<VasariErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vasari operations.
///
/// # Examples
///
/// ```
/// use vasari_error::{Stage, TransportError, VasariResult};
///
/// fn fetch_status() -> VasariResult<String> {
///     Err(TransportError::new(Stage::Status, "504 Gateway Timeout"))?
/// }
/// ```
pub type VasariResult<T> = std::result::Result<T, VasariError>;
