//! Transport error types.

use crate::Stage;

/// Network-level failure while talking to an external service.
///
/// # Examples
///
/// ```
/// use vasari_error::{Stage, TransportError};
///
/// let err = TransportError::new(Stage::Run, "connection reset by peer");
/// assert_eq!(err.stage, Stage::Run);
/// assert!(format!("{}", err).contains("run"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error at stage {}: {} at line {} in {}", stage, message, line, file)]
pub struct TransportError {
    /// The external call that failed
    pub stage: Stage,
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError at the current location.
    #[track_caller]
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
