//! Generation error types for the external text generation workflow.

/// Terminal generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The run reached the `failed` terminal state
    #[display("Generation run failed: {}", _0)]
    Failed(String),
    /// The run reached the `cancelled` terminal state
    #[display("Generation run cancelled: {}", _0)]
    Cancelled(String),
    /// The run completed but produced no usable assistant text
    #[display("Generation run completed with no assistant text")]
    Empty,
    /// The run did not reach a terminal state within the allotted time
    #[display("Generation run still pending after {}s", waited_secs)]
    TimedOut {
        /// Wall-clock seconds spent polling before giving up
        waited_secs: u64,
    },
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Failed("rate limited".into()));
/// assert!(format!("{}", err).contains("rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
