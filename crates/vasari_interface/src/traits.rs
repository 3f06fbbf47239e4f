//! Trait definitions for pipeline collaborators.

use async_trait::async_trait;
use vasari_core::{Article, ImageSource, Location, RotationCursor, Slot, SlotTemplate, Tenant};
use vasari_error::VasariResult;

/// The external structured text generation service.
///
/// One call drives a full conversation-style job: open a conversation,
/// submit the payload, start a run against `profile`, poll to a terminal
/// state, and return the first assistant message's text. The pipeline
/// invokes this twice per run with different profiles (article content,
/// then the image prompt) and no state is shared between the two
/// invocations.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from `input` using the given generation profile.
    async fn generate(&self, profile: &str, input: &str) -> VasariResult<String>;
}

/// The external image synthesis service.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Synthesize an image for `prompt`.
    ///
    /// The result points at short-lived upstream storage (or carries the
    /// bytes inline); callers must republish the asset somewhere durable
    /// before persisting it.
    async fn synthesize(&self, prompt: &str) -> VasariResult<ImageSource>;
}

/// Durable object storage with public URL retrieval.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `data` under `key` with overwrite-allowed semantics and
    /// return the stable public URL.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> VasariResult<String>;
}

/// Read-only lookup of tenant display fields and locations.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Fetch one tenant by id.
    async fn tenant(&self, tenant_id: &str) -> VasariResult<Tenant>;

    /// Fetch one location of a tenant by id.
    async fn location(&self, tenant_id: &str, location_id: &str) -> VasariResult<Location>;
}

/// Read-only lookup of the pre-seeded slot template grid.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Fetch the template for one slot coordinate.
    async fn template(&self, slot: Slot) -> VasariResult<SlotTemplate>;
}

/// Persistence for generated article records.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Slots already claimed for the tenant/location scope, in no
    /// particular order.
    async fn claimed_slots(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Vec<Slot>>;

    /// Insert one finished article.
    ///
    /// Fails with a Conflict database error when a concurrent run already
    /// claimed the same (tenant, location, topic, subtopic) key.
    async fn insert(&self, article: &Article) -> VasariResult<()>;
}

/// Persistence for the per-scope rotation cursor.
#[async_trait]
pub trait CursorRepository: Send + Sync {
    /// Read the cursor for a tenant/location scope, if one exists.
    async fn cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Option<RotationCursor>>;

    /// Rewrite the cursor for a tenant/location scope.
    ///
    /// Upserts: a missing row is created rather than treated as an
    /// error, since cursor creation is an external concern.
    async fn store_cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
        cursor: RotationCursor,
    ) -> VasariResult<()>;
}
