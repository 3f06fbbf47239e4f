//! HTTP bucket storage backend.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use vasari_error::{PublishError, PublishErrorKind, VasariResult};
use vasari_interface::AssetStore;

/// Object storage backend speaking a plain HTTP PUT protocol.
///
/// Objects are written to `{endpoint}/{bucket}/{key}` and become
/// publicly resolvable at `{public_base_url}/{key}`. PUT semantics are
/// overwrite-allowed, so republishing the same key replaces the prior
/// asset.
#[derive(Debug, Clone)]
pub struct HttpBucketStore {
    client: Client,
    endpoint: String,
    bucket: String,
    public_base_url: String,
    access_token: Option<String>,
}

impl HttpBucketStore {
    /// Creates a new bucket store.
    pub fn new(
        endpoint: String,
        bucket: String,
        public_base_url: String,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }
}

#[async_trait]
impl AssetStore for HttpBucketStore {
    #[instrument(skip(self, data), fields(key = %key, bytes = data.len()))]
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> VasariResult<String> {
        let url = format!("{}/{}/{}", self.endpoint, self.bucket, key);

        let mut request = self
            .client
            .put(&url)
            .header("Content-Type", content_type)
            .body(data.to_vec());
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Upload(format!("{url}: {e}")))
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PublishError::new(PublishErrorKind::Upload(format!(
                "{url}: HTTP {}: {}",
                status.as_u16(),
                detail
            )))
            .into());
        }

        let public_url = format!("{}/{}", self.public_base_url, key);
        debug!(url = %public_url, "Uploaded asset");
        Ok(public_url)
    }
}
