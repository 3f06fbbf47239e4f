//! Image synthesis API data transfer objects.

use serde::{Deserialize, Serialize};

/// Request body for an image synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Prompt describing the desired image
    pub prompt: String,
    /// Number of images to produce
    pub n: u32,
    /// Fixed output dimensions, e.g. `1024x1024`
    pub size: String,
}

/// Response body of an image synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Produced images
    #[serde(default)]
    pub data: Vec<ImageResult>,
}

/// One produced image.
///
/// The service answers with either a transient URL or inline
/// base64-encoded bytes depending on its configuration; both are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Transient URL of the image
    #[serde(default)]
    pub url: Option<String>,
    /// Base64-encoded image bytes
    #[serde(default)]
    pub b64_json: Option<String>,
}
