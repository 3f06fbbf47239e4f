//! The content generation pipeline.

use crate::allocator::first_open_slot;
use crate::extract::{extract_json, parse_json};
use crate::sanitizer::correct_draft;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use vasari_core::{
    Article, ArticleDraft, GenerationRequest, ImagePromptRequest, RotationCursor, Slot, Tenant,
    interpolate, interpolate_all,
};
use vasari_error::{ConfigError, VasariResult};
use vasari_interface::{
    ArticleRepository, CursorRepository, ImageSynthesizer, TemplateStore, TenantDirectory,
    TextGenerator,
};
use vasari_storage::AssetPublisher;

/// The two generation profiles a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProfiles {
    /// Profile producing article JSON
    pub text: String,
    /// Profile producing image prompts
    pub image_prompt: String,
}

/// One pipeline invocation, as issued by the scheduler or CLI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCommand {
    /// Tenant to generate for
    pub tenant_id: String,
    /// Optional location scope
    pub location_id: Option<String>,
    /// Topic override; the allocator is bypassed only when both
    /// overrides are present
    pub topic: Option<i32>,
    /// Subtopic override
    pub subtopic: Option<i32>,
}

impl GenerateCommand {
    /// A command for the tenant's own (location-less) grid with no
    /// overrides.
    pub fn for_tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            location_id: None,
            topic: None,
            subtopic: None,
        }
    }

    /// Scope the command to one location of the tenant.
    pub fn with_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Pin the command to an explicit slot, bypassing the allocator.
    pub fn with_slot(mut self, topic: i32, subtopic: i32) -> Self {
        self.topic = Some(topic);
        self.subtopic = Some(subtopic);
        self
    }

    fn override_slot(&self) -> Option<Slot> {
        match (self.topic, self.subtopic) {
            (Some(topic), Some(subtopic)) => Some(Slot::new(topic, subtopic)),
            _ => None,
        }
    }
}

/// What a successful invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// An article was generated and persisted
    Generated(Article),
    /// Every slot of the scope's grid is already taken
    ///
    /// A terminal, expected condition for a finished scope, not a
    /// failure.
    Exhausted,
}

/// The structured outcome reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Whether the invocation ran to completion
    pub success: bool,
    /// The persisted article, absent on failure or grid exhaustion
    pub article: Option<Article>,
    /// The failure description, absent on success
    pub error: Option<String>,
}

/// Orchestrates one content generation run end to end.
///
/// Stages run strictly sequentially: allocate (or take the override) →
/// interpolate the slot template → generate article JSON → generate the
/// image prompt → synthesize the image → republish it durably →
/// sanitize → insert → advance the rotation cursor. A failure at any
/// stage aborts the run before the insert, so a failed run never
/// persists a record and never advances the cursor; the caller may
/// safely retry the same slot.
///
/// The allocate/insert pair is not transactional; two concurrent runs
/// can race for the same slot. The repository's unique constraint turns
/// the loser's insert into a Conflict, which this orchestrator treats as
/// "re-allocate and retry" (bounded by `max_slot_attempts`) rather than
/// a failure. When the slot was pinned by an override, a conflict is
/// surfaced as-is: the caller asked for that exact slot.
///
/// Cancellation is drop-safety: every await point before the insert is
/// side-effect free on our own state, so dropping the future mid-run
/// persists nothing and leaves the cursor alone. An image already
/// published to object storage may be orphaned; paths are addressed by
/// slug, so a retry overwrites it.
pub struct ContentPipeline {
    directory: Arc<dyn TenantDirectory>,
    templates: Arc<dyn TemplateStore>,
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn ImageSynthesizer>,
    publisher: AssetPublisher,
    articles: Arc<dyn ArticleRepository>,
    cursors: Arc<dyn CursorRepository>,
    profiles: GenerationProfiles,
    max_slot_attempts: u32,
}

impl ContentPipeline {
    /// Assemble a pipeline from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        templates: Arc<dyn TemplateStore>,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn ImageSynthesizer>,
        publisher: AssetPublisher,
        articles: Arc<dyn ArticleRepository>,
        cursors: Arc<dyn CursorRepository>,
        profiles: GenerationProfiles,
        max_slot_attempts: u32,
    ) -> Self {
        Self {
            directory,
            templates,
            generator,
            synthesizer,
            publisher,
            articles,
            cursors,
            profiles,
            max_slot_attempts,
        }
    }

    /// Run one invocation and report the structured outcome.
    ///
    /// Never panics and never swallows an error: failures come back as
    /// `{ success: false, error }` with the original message preserved
    /// for operator diagnosis.
    pub async fn generate(&self, command: &GenerateCommand) -> PipelineReport {
        match self.run(command).await {
            Ok(PipelineOutcome::Generated(article)) => PipelineReport {
                success: true,
                article: Some(article),
                error: None,
            },
            Ok(PipelineOutcome::Exhausted) => PipelineReport {
                success: true,
                article: None,
                error: None,
            },
            Err(e) => PipelineReport {
                success: false,
                article: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Run one invocation.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure. The rotation cursor is
    /// advanced only after a successful insert, never on an error path.
    #[instrument(
        skip(self),
        fields(tenant = %command.tenant_id, location = ?command.location_id)
    )]
    pub async fn run(&self, command: &GenerateCommand) -> VasariResult<PipelineOutcome> {
        let tenant = self.directory.tenant(&command.tenant_id).await?;
        let location = match &command.location_id {
            Some(location_id) => Some(
                self.directory
                    .location(&command.tenant_id, location_id)
                    .await?,
            ),
            None => None,
        };
        let tenant = tenant.scoped_to(location.as_ref());
        let override_slot = command.override_slot();

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let slot = match override_slot {
                Some(slot) => slot,
                None => {
                    let claimed = self
                        .articles
                        .claimed_slots(&command.tenant_id, command.location_id.as_deref())
                        .await?;
                    match first_open_slot(&claimed) {
                        Some(slot) => slot,
                        None => {
                            info!("Content grid exhausted; nothing to generate");
                            return Ok(PipelineOutcome::Exhausted);
                        }
                    }
                }
            };

            let article = self.produce(command, &tenant, slot).await?;

            match self.articles.insert(&article).await {
                Ok(()) => {
                    self.cursors
                        .store_cursor(
                            &command.tenant_id,
                            command.location_id.as_deref(),
                            RotationCursor::after(slot),
                        )
                        .await?;
                    info!(slot = %slot, slug = %article.slug, "Generated article");
                    return Ok(PipelineOutcome::Generated(article));
                }
                Err(e) if e.is_conflict()
                    && override_slot.is_none()
                    && attempt < self.max_slot_attempts =>
                {
                    warn!(
                        slot = %slot,
                        attempt,
                        "Slot claimed by a concurrent run; re-allocating"
                    );
                    continue;
                }
                Err(e) => {
                    error!(
                        stage = "insert",
                        tenant = %command.tenant_id,
                        slot = %slot,
                        error = %e,
                        "Stage failed"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Produce the finished (not yet persisted) article for one slot.
    async fn produce(
        &self,
        command: &GenerateCommand,
        tenant: &Tenant,
        slot: Slot,
    ) -> VasariResult<Article> {
        let template = self.templates.template(slot).await?;
        let topic_name = interpolate(&template.topic_name, tenant);
        let subtopic_name = interpolate(&template.subtopic_name, tenant);
        let related_links = interpolate_all(&template.related_links, tenant);

        let request = GenerationRequest::builder()
            .business_name(tenant.name.clone())
            .address(tenant.address.clone().unwrap_or_default())
            .city(tenant.city.clone().unwrap_or_default())
            .state(tenant.state.clone().unwrap_or_default())
            .phone(tenant.phone.clone().unwrap_or_default())
            .canonical_url(tenant.canonical_url.clone())
            .topic_name(topic_name.clone())
            .subtopic_name(subtopic_name)
            .related_links(related_links.clone())
            .build()
            .map_err(|e| ConfigError::new(format!("generation request: {e}")))?;

        let raw = self
            .generator
            .generate(&self.profiles.text, &request.payload())
            .await
            .map_err(|e| {
                error!(stage = "text_generation", tenant = %tenant.id, slot = %slot, error = %e, "Stage failed");
                e
            })?;
        let draft: ArticleDraft = parse_json(&extract_json(&raw)?)?;

        let prompt_request = ImagePromptRequest::new(draft.title.clone(), draft.summary.clone());
        let image_prompt = self
            .generator
            .generate(&self.profiles.image_prompt, &prompt_request.payload())
            .await
            .map_err(|e| {
                error!(stage = "image_prompt", tenant = %tenant.id, slot = %slot, error = %e, "Stage failed");
                e
            })?;

        let image = self
            .synthesizer
            .synthesize(image_prompt.trim())
            .await
            .map_err(|e| {
                error!(stage = "image_synthesis", tenant = %tenant.id, slot = %slot, error = %e, "Stage failed");
                e
            })?;

        let draft = correct_draft(draft, tenant, &topic_name, Utc::now().date_naive());

        let image_url = self
            .publisher
            .publish(image, &tenant.id, &draft.slug)
            .await
            .map_err(|e| {
                error!(stage = "asset_publish", tenant = %tenant.id, slot = %slot, error = %e, "Stage failed");
                e
            })?;

        Ok(Article {
            id: Uuid::new_v4(),
            tenant_id: command.tenant_id.clone(),
            location_id: command.location_id.clone(),
            topic_number: slot.topic,
            subtopic_number: slot.subtopic,
            title: draft.title,
            slug: draft.slug,
            content_summary: draft.summary,
            hero: draft.hero,
            structured_sections: draft.sections,
            related_links,
            structured_data: draft.structured_data,
            image_url,
            published: true,
            created_at: Utc::now().naive_utc(),
        })
    }
}
