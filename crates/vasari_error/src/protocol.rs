//! Protocol error types.

use crate::Stage;

/// The upstream service returned a shape the client cannot interpret.
///
/// Unlike [`crate::TransportError`], a protocol error is not retryable: the
/// upstream contract was violated and re-sending the same request will not
/// change that.
///
/// # Examples
///
/// ```
/// use vasari_error::{ProtocolError, Stage};
///
/// let err = ProtocolError::new(Stage::Retrieval, "message list missing `data` field");
/// assert!(format!("{}", err).contains("retrieval"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Protocol Error at stage {}: {} at line {} in {}", stage, message, line, file)]
pub struct ProtocolError {
    /// The external call that produced the malformed response
    pub stage: Stage,
    /// What was wrong with the response
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ProtocolError {
    /// Create a new ProtocolError at the current location.
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
