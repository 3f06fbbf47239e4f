//! Conversation API data transfer objects.
//!
//! The upstream service is untrusted; every response is deserialized into
//! these shapes at the wire boundary and anything that does not fit is a
//! protocol error, not a panic.

use serde::{Deserialize, Serialize};

/// Status of a generation run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    /// Accepted, not yet started
    Queued,
    /// Actively generating
    InProgress,
    /// Cancellation requested upstream, not yet terminal
    Cancelling,
    /// Waiting on tool output; generation profiles never request this
    RequiresAction,
    /// Terminal success
    Completed,
    /// Terminal failure
    Failed,
    /// Terminal cancellation
    Cancelled,
    /// Terminal upstream expiry
    Expired,
    /// A status this client does not know
    #[serde(other)]
    Unrecognized,
}

/// Response to creating a conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationCreated {
    /// Conversation identifier
    pub id: String,
}

/// Response to posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreated {
    /// Message identifier
    pub id: String,
}

/// Response to starting a run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunCreated {
    /// Run identifier
    pub id: String,
    /// Initial status
    pub status: RunStatus,
}

/// Upstream error detail attached to a failed run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable error message
    #[serde(default)]
    pub message: Option<String>,
}

/// One observation of a run's state.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSnapshot {
    /// Run identifier
    pub id: String,
    /// Current status
    pub status: RunStatus,
    /// Error detail, present on failed runs
    #[serde(default)]
    pub last_error: Option<RunError>,
}

impl RunSnapshot {
    /// The upstream error detail, or a placeholder when none was given.
    pub fn error_detail(&self) -> String {
        self.last_error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "no upstream error detail".to_string())
    }
}

/// One content part of a conversation message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePart {
    /// Part discriminator, e.g. `text`
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload, present when `kind` is `text`
    #[serde(default)]
    pub text: Option<TextPart>,
}

/// The text payload of a message part.
#[derive(Debug, Clone, Deserialize)]
pub struct TextPart {
    /// The text itself
    pub value: String,
}

/// One message in a conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMessage {
    /// Message identifier
    pub id: String,
    /// Author role, `user` or `assistant`
    pub role: String,
    /// Ordered content parts
    #[serde(default)]
    pub content: Vec<MessagePart>,
}

impl ConversationMessage {
    /// The first text content of this message, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|part| part.kind == "text")
            .find_map(|part| part.text.as_ref())
            .map(|text| text.value.as_str())
    }
}

/// Listing of a conversation's messages, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    /// The messages
    pub data: Vec<ConversationMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_parses_to_unrecognized() {
        let snapshot: RunSnapshot =
            serde_json::from_str(r#"{"id": "run_1", "status": "daydreaming"}"#).unwrap();
        assert_eq!(snapshot.status, RunStatus::Unrecognized);
    }

    #[test]
    fn snapshot_surfaces_upstream_error_detail() {
        let snapshot: RunSnapshot = serde_json::from_str(
            r#"{"id": "run_1", "status": "failed",
                "last_error": {"code": "rate_limit_exceeded", "message": "try later"}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.status, RunStatus::Failed);
        assert_eq!(snapshot.error_detail(), "try later");
    }

    #[test]
    fn first_text_skips_non_text_parts() {
        let message: ConversationMessage = serde_json::from_str(
            r#"{"id": "msg_1", "role": "assistant",
                "content": [
                    {"type": "image_ref"},
                    {"type": "text", "text": {"value": "hello"}}
                ]}"#,
        )
        .unwrap();
        assert_eq!(message.first_text(), Some("hello"));
    }
}
