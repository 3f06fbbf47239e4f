//! In-memory fakes for pipeline tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;
use vasari_core::{
    Article, ImageSource, Location, RotationCursor, Slot, SlotTemplate, StructuredData, Tenant,
};
use vasari_error::{
    ConfigError, DatabaseError, DatabaseErrorKind, Stage, TransportError, VasariResult,
};
use vasari_interface::{
    ArticleRepository, AssetStore, CursorRepository, ImageSynthesizer, TemplateStore,
    TenantDirectory, TextGenerator,
};

pub const TEXT_PROFILE: &str = "profile-article-writer";
pub const IMAGE_PROFILE: &str = "profile-image-prompter";

pub fn acme() -> Tenant {
    Tenant {
        id: "acme-id".into(),
        name: "Acme".into(),
        address: Some("100 Main St".into()),
        city: Some("Plano".into()),
        state: Some("TX".into()),
        phone: Some("555-0100".into()),
        canonical_url: "https://acme.example.com".into(),
    }
}

/// Directory holding a fixed set of tenants and locations.
pub struct MemoryDirectory {
    pub tenants: HashMap<String, Tenant>,
    pub locations: HashMap<String, Location>,
}

impl MemoryDirectory {
    pub fn with_acme() -> Self {
        let tenant = acme();
        Self {
            tenants: HashMap::from([(tenant.id.clone(), tenant)]),
            locations: HashMap::new(),
        }
    }
}

#[async_trait]
impl TenantDirectory for MemoryDirectory {
    async fn tenant(&self, tenant_id: &str) -> VasariResult<Tenant> {
        self.tenants.get(tenant_id).cloned().ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::NotFound(format!("tenant {tenant_id}"))).into()
        })
    }

    async fn location(&self, tenant_id: &str, location_id: &str) -> VasariResult<Location> {
        self.locations
            .get(location_id)
            .filter(|location| location.tenant_id == tenant_id)
            .cloned()
            .ok_or_else(|| {
                DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                    "location {location_id}"
                )))
                .into()
            })
    }
}

/// Template store answering every slot with token-bearing names.
pub struct MemoryTemplates;

#[async_trait]
impl TemplateStore for MemoryTemplates {
    async fn template(&self, slot: Slot) -> VasariResult<SlotTemplate> {
        Ok(SlotTemplate {
            topic: slot.topic,
            subtopic: slot.subtopic,
            topic_name: format!("{{client_name}} Insurance {}", slot.topic),
            subtopic_name: format!(
                "Coverage {} in {{client_city}}, {{client_state}}",
                slot.subtopic
            ),
            related_links: vec![
                "Contact {client_name}".to_string(),
                "{client_city} service areas".to_string(),
            ],
        })
    }
}

/// Generator answering each profile with canned output.
pub struct ScriptedGenerator {
    pub fail_text: bool,
}

impl ScriptedGenerator {
    pub fn working() -> Self {
        Self { fail_text: false }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, profile: &str, _input: &str) -> VasariResult<String> {
        match profile {
            TEXT_PROFILE => {
                if self.fail_text {
                    return Err(TransportError::new(Stage::Run, "upstream unreachable").into());
                }
                Ok(concat!(
                    "Here is the article you asked for:\n\n",
                    "```json\n",
                    "{\"title\": \"What's New? Auto & Home!\",\n",
                    " \"slug\": \"Whatever The Generator Felt Like!!\",\n",
                    " \"summary\": \"Coverage updates for local drivers.\",\n",
                    " \"hero\": {\"heading\": \"Fresh coverage news\", \"tagline\": \"Straight from Acme\"},\n",
                    " \"sections\": [{\"heading\": \"Overview\", \"body\": \"Things changed.\"}],\n",
                    " \"structured_data\": {\"headline\": \"\", \"description\": \"\",\n",
                    "   \"url\": \"https://wrong.example.com/phishing\",\n",
                    "   \"date_published\": \"2000-01-01\"}}\n",
                    "```\n",
                )
                .to_string())
            }
            IMAGE_PROFILE => {
                Ok("A warm, professional photograph of an insurance office.".to_string())
            }
            other => Err(ConfigError::new(format!("unknown profile {other}")).into()),
        }
    }
}

/// Synthesizer returning fixed inline bytes.
pub struct StaticSynthesizer;

#[async_trait]
impl ImageSynthesizer for StaticSynthesizer {
    async fn synthesize(&self, _prompt: &str) -> VasariResult<ImageSource> {
        Ok(ImageSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]))
    }
}

/// Synthesizer that holds its first call until a partner arrives.
///
/// Forces two concurrent runs to both pass allocation before either
/// reaches its insert, making the slot race deterministic in tests.
/// Re-runs after a lost race skip the rendezvous.
pub struct RendezvousSynthesizer {
    barrier: std::sync::Arc<tokio::sync::Barrier>,
    passed: AtomicBool,
}

impl RendezvousSynthesizer {
    pub fn new(barrier: std::sync::Arc<tokio::sync::Barrier>) -> Self {
        Self {
            barrier,
            passed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ImageSynthesizer for RendezvousSynthesizer {
    async fn synthesize(&self, _prompt: &str) -> VasariResult<ImageSource> {
        if !self.passed.swap(true, Ordering::SeqCst) {
            self.barrier.wait().await;
        }
        Ok(ImageSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]))
    }
}

/// Synthesizer that always fails with a transport error.
pub struct FailingSynthesizer;

#[async_trait]
impl ImageSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, _prompt: &str) -> VasariResult<ImageSource> {
        Err(TransportError::new(Stage::Synthesis, "image service unreachable").into())
    }
}

/// In-memory asset store recording every put.
#[derive(Default)]
pub struct MemoryAssetStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn put(&self, key: &str, data: &[u8], _content_type: &str) -> VasariResult<String> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(format!("https://assets.test/{key}"))
    }
}

type SlotKey = (String, Option<String>, i32, i32);
type ScopeKey = (String, Option<String>);

/// In-memory repository enforcing the per-slot unique constraint.
#[derive(Default)]
pub struct MemoryRepository {
    pub articles: Mutex<HashMap<SlotKey, Article>>,
    pub cursors: Mutex<HashMap<ScopeKey, RotationCursor>>,
}

impl MemoryRepository {
    pub fn article_count(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    pub fn cursor_for(&self, tenant_id: &str, location_id: Option<&str>) -> Option<RotationCursor> {
        self.cursors
            .lock()
            .unwrap()
            .get(&(tenant_id.to_string(), location_id.map(String::from)))
            .copied()
    }

    pub fn seed_cursor(&self, tenant_id: &str, location_id: Option<&str>, cursor: RotationCursor) {
        self.cursors
            .lock()
            .unwrap()
            .insert((tenant_id.to_string(), location_id.map(String::from)), cursor);
    }
}

/// A minimal pre-existing article occupying one slot.
pub fn placeholder_article(tenant_id: &str, location_id: Option<&str>, slot: Slot) -> Article {
    Article {
        id: Uuid::new_v4(),
        tenant_id: tenant_id.to_string(),
        location_id: location_id.map(String::from),
        topic_number: slot.topic,
        subtopic_number: slot.subtopic,
        title: format!("Existing {slot}"),
        slug: format!("existing-{}-{}", slot.topic, slot.subtopic),
        content_summary: String::new(),
        hero: None,
        structured_sections: vec![],
        related_links: vec![],
        structured_data: StructuredData::default(),
        image_url: String::new(),
        published: true,
        created_at: Utc::now().naive_utc(),
    }
}

#[async_trait]
impl ArticleRepository for MemoryRepository {
    async fn claimed_slots(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Vec<Slot>> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .keys()
            .filter(|(tenant, location, _, _)| {
                tenant == tenant_id && location.as_deref() == location_id
            })
            .map(|(_, _, topic, subtopic)| Slot::new(*topic, *subtopic))
            .collect())
    }

    async fn insert(&self, article: &Article) -> VasariResult<()> {
        let key = (
            article.tenant_id.clone(),
            article.location_id.clone(),
            article.topic_number,
            article.subtopic_number,
        );
        let mut articles = self.articles.lock().unwrap();
        if articles.contains_key(&key) {
            return Err(DatabaseError::new(DatabaseErrorKind::Conflict(format!(
                "tenant {} slot ({}, {})",
                article.tenant_id, article.topic_number, article.subtopic_number
            )))
            .into());
        }
        articles.insert(key, article.clone());
        Ok(())
    }
}

#[async_trait]
impl CursorRepository for MemoryRepository {
    async fn cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Option<RotationCursor>> {
        Ok(self.cursor_for(tenant_id, location_id))
    }

    async fn store_cursor(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
        cursor: RotationCursor,
    ) -> VasariResult<()> {
        self.seed_cursor(tenant_id, location_id, cursor);
        Ok(())
    }
}

/// Repository wrapper simulating a lost slot race: the first insert
/// finds the slot freshly claimed by a concurrent winner.
pub struct ConflictOnce {
    pub inner: std::sync::Arc<MemoryRepository>,
    tripped: AtomicBool,
}

impl ConflictOnce {
    pub fn new(inner: std::sync::Arc<MemoryRepository>) -> Self {
        Self {
            inner,
            tripped: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ArticleRepository for ConflictOnce {
    async fn claimed_slots(
        &self,
        tenant_id: &str,
        location_id: Option<&str>,
    ) -> VasariResult<Vec<Slot>> {
        self.inner.claimed_slots(tenant_id, location_id).await
    }

    async fn insert(&self, article: &Article) -> VasariResult<()> {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            // The concurrent winner lands first; this run loses the race.
            let winner = placeholder_article(
                &article.tenant_id,
                article.location_id.as_deref(),
                Slot::new(article.topic_number, article.subtopic_number),
            );
            self.inner.insert(&winner).await?;
            return Err(DatabaseError::new(DatabaseErrorKind::Conflict(format!(
                "tenant {} slot ({}, {})",
                article.tenant_id, article.topic_number, article.subtopic_number
            )))
            .into());
        }
        self.inner.insert(article).await
    }
}
