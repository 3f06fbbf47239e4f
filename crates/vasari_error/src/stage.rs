//! Pipeline stage identifiers carried by transport and protocol errors.

/// The external call during which an error occurred.
///
/// The generation client talks to its upstream in five discrete steps, and
/// the asset pipeline in three more. Tagging errors with the step lets
/// callers distinguish, say, a failed run start from a failed status poll
/// without parsing message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Creating the conversation context
    Conversation,
    /// Posting the input message
    Message,
    /// Starting the generation run
    Run,
    /// Polling run status
    Status,
    /// Retrieving the produced message
    Retrieval,
    /// Requesting image synthesis
    Synthesis,
    /// Downloading the transient image
    Download,
    /// Uploading to durable object storage
    Upload,
}
