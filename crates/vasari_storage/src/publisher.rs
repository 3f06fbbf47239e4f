//! Transient-to-durable asset republishing.

use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, instrument};
use vasari_core::ImageSource;
use vasari_error::{PublishError, PublishErrorKind, VasariResult};
use vasari_interface::AssetStore;

/// Republishes transient synthesis output into durable storage.
///
/// Storage paths are content-addressed by tenant and slug
/// (`{tenant_id}/{slug}.png`), so republishing the same slug replaces
/// the prior asset. An orphaned upload from an aborted run is therefore
/// harmless: the retry overwrites it.
pub struct AssetPublisher {
    client: Client,
    store: Arc<dyn AssetStore>,
}

impl AssetPublisher {
    /// Creates a publisher backed by the given store.
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            client: Client::new(),
            store,
        }
    }

    /// Download (when needed) and upload one image, returning the stable
    /// public URL.
    #[instrument(skip(self, source), fields(tenant = %tenant_id, slug = %slug_hint))]
    pub async fn publish(
        &self,
        source: ImageSource,
        tenant_id: &str,
        slug_hint: &str,
    ) -> VasariResult<String> {
        let bytes = match source {
            ImageSource::Binary(bytes) => bytes,
            ImageSource::Url(url) => self.download(&url).await?,
        };

        let key = format!("{}/{}.png", tenant_id, safe_key_component(slug_hint));
        let public_url = self.store.put(&key, &bytes, "image/png").await?;
        debug!(url = %public_url, "Published asset");
        Ok(public_url)
    }

    async fn download(&self, url: &str) -> VasariResult<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Download(format!("{url}: {e}")))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::new(PublishErrorKind::Fetch(status.as_u16())).into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Download(format!("{url}: {e}")))
        })?;
        Ok(bytes.to_vec())
    }
}

/// Filesystem-safe transform of a slug hint.
///
/// Strips every character outside `[A-Za-z0-9_-]`. A hint with nothing
/// usable degrades to `image` so the derived key stays well-formed.
pub(crate) fn safe_key_component(hint: &str) -> String {
    let kept: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if kept.is_empty() {
        "image".to_string()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_key_strips_unsafe_characters() {
        assert_eq!(safe_key_component("whats-new-auto-home"), "whats-new-auto-home");
        assert_eq!(safe_key_component("a b/c%d.png"), "abcdpng");
        assert_eq!(safe_key_component("under_score-ok"), "under_score-ok");
    }

    #[test]
    fn safe_key_degrades_to_placeholder() {
        assert_eq!(safe_key_component("§!?"), "image");
        assert_eq!(safe_key_component(""), "image");
    }
}
