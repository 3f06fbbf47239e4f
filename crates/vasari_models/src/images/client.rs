//! Image synthesis API client.

use crate::images::dto::{ImageRequest, ImageResponse};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use tracing::{debug, instrument};
use vasari_core::ImageSource;
use vasari_error::{ConfigError, ProtocolError, Stage, TransportError, VasariResult};
use vasari_interface::ImageSynthesizer;

/// Client for the external image synthesis endpoint.
///
/// One request, one response. The output dimensions are a fixed
/// configuration value, never derived from content.
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    endpoint: String,
    size: String,
}

impl ImageClient {
    /// Creates a new image synthesis client.
    pub fn new(api_key: String, endpoint: String, size: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            size,
        }
    }

    /// Creates a client reading the API key from `IMAGE_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(endpoint: String, size: String) -> VasariResult<Self> {
        let api_key = std::env::var("IMAGE_API_KEY")
            .map_err(|_| ConfigError::new("IMAGE_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, endpoint, size))
    }
}

#[async_trait]
impl ImageSynthesizer for ImageClient {
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len()))]
    async fn synthesize(&self, prompt: &str) -> VasariResult<ImageSource> {
        let request = ImageRequest {
            prompt: prompt.to_string(),
            n: 1,
            size: self.size.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::new(Stage::Synthesis, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::new(
                Stage::Synthesis,
                format!("HTTP {}: {}", status.as_u16(), detail),
            )
            .into());
        }

        let parsed: ImageResponse = response.json().await.map_err(|e| {
            ProtocolError::new(Stage::Synthesis, format!("unexpected response shape: {e}"))
        })?;

        let Some(first) = parsed.data.first() else {
            return Err(
                ProtocolError::new(Stage::Synthesis, "response contained no images").into(),
            );
        };

        if let Some(url) = &first.url {
            debug!(url = %url, "Synthesized image (transient url)");
            return Ok(ImageSource::Url(url.clone()));
        }

        if let Some(encoded) = &first.b64_json {
            let bytes = BASE64.decode(encoded).map_err(|e| {
                ProtocolError::new(Stage::Synthesis, format!("invalid base64 image data: {e}"))
            })?;
            debug!(bytes = bytes.len(), "Synthesized image (inline bytes)");
            return Ok(ImageSource::Binary(bytes));
        }

        Err(ProtocolError::new(Stage::Synthesis, "image result carried neither url nor data").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_url_is_preferred() {
        let parsed: ImageResponse = serde_json::from_str(
            r#"{"data": [{"url": "https://cdn.example.com/tmp/a.png", "b64_json": null}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.data[0].url.as_deref(),
            Some("https://cdn.example.com/tmp/a.png")
        );
    }

    #[test]
    fn empty_data_parses_but_is_rejected_later() {
        let parsed: ImageResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parsed.data.is_empty());
    }
}
