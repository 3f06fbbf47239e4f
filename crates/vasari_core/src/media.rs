//! Image source types returned by the synthesis service.

use serde::{Deserialize, Serialize};

/// Where a synthesized image's bytes come from.
///
/// The upstream synthesis API answers with either a short-lived URL or
/// inline bytes; either way the asset publisher republishes the content
/// into durable storage before anything is persisted.
///
/// # Examples
///
/// ```
/// use vasari_core::ImageSource;
///
/// let url = ImageSource::Url("https://cdn.example.com/tmp/abc.png".to_string());
/// let binary = ImageSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSource {
    /// Transient URL to fetch the content from
    Url(String),
    /// Raw binary data already in hand
    Binary(Vec<u8>),
}
