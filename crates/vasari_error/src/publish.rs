//! Asset publishing error types.

/// Kinds of asset publishing errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// The transient image URL answered with a non-success status
    #[display("Failed to fetch transient asset: HTTP {}", _0)]
    Fetch(u16),
    /// Downloading the transient asset body failed
    #[display("Failed to download transient asset: {}", _0)]
    Download(String),
    /// Uploading to durable object storage failed
    #[display("Failed to upload asset: {}", _0)]
    Upload(String),
    /// The storage backend rejected the derived key
    #[display("Invalid storage key: {}", _0)]
    InvalidKey(String),
}

/// Asset publishing error with source location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::Fetch(404));
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
