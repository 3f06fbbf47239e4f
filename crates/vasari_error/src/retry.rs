//! Retry classification for pipeline errors.

use crate::{
    ConfigError, DatabaseError, DatabaseErrorKind, GenerationError, ProtocolError, PublishError,
    TransportError, VasariError, VasariErrorKind,
};

/// Trait for errors that can report whether a retry is worthwhile.
///
/// Transient conditions (network failures, upstream run failures, slot
/// conflicts) report `true`; contract violations (malformed upstream
/// responses, bad configuration) report `false` since repeating the same
/// request cannot succeed without investigation.
///
/// # Examples
///
/// ```
/// use vasari_error::{RetryableError, Stage, TransportError, ProtocolError};
///
/// assert!(TransportError::new(Stage::Run, "timed out").is_retryable());
/// assert!(!ProtocolError::new(Stage::Run, "missing id").is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for TransportError {
    fn is_retryable(&self) -> bool {
        true
    }
}

impl RetryableError for ProtocolError {
    fn is_retryable(&self) -> bool {
        false
    }
}

impl RetryableError for GenerationError {
    // Terminal run failures are retryable by re-running the whole stage;
    // an empty completion is treated the same way.
    fn is_retryable(&self) -> bool {
        true
    }
}

impl RetryableError for PublishError {
    fn is_retryable(&self) -> bool {
        true
    }
}

impl RetryableError for DatabaseError {
    fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            DatabaseErrorKind::Conflict(_) | DatabaseErrorKind::Connection(_)
        )
    }
}

impl RetryableError for ConfigError {
    fn is_retryable(&self) -> bool {
        false
    }
}

impl RetryableError for VasariError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            VasariErrorKind::Transport(e) => e.is_retryable(),
            VasariErrorKind::Protocol(e) => e.is_retryable(),
            VasariErrorKind::Generation(e) => e.is_retryable(),
            VasariErrorKind::Publish(e) => e.is_retryable(),
            VasariErrorKind::Database(e) => e.is_retryable(),
            VasariErrorKind::Config(e) => e.is_retryable(),
        }
    }
}
