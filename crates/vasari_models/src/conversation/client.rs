//! Conversation API client.

use crate::conversation::dto::{
    ConversationCreated, MessageCreated, MessageList, RunCreated, RunSnapshot,
};
use crate::conversation::poll::{PollConfig, RunStatusSource, await_terminal};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, instrument};
use vasari_error::{
    ConfigError, GenerationError, GenerationErrorKind, ProtocolError, Stage, TransportError,
    VasariResult,
};
use vasari_interface::TextGenerator;

/// Client for the conversation-style text generation API.
///
/// Each [`TextGenerator::generate`] call is one self-contained job:
/// a fresh conversation is created, the payload posted as a single user
/// message, a run started against the requested profile, polled to a
/// terminal state, and the first assistant message's text returned.
/// Nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct ConversationClient {
    client: Client,
    api_key: String,
    base_url: String,
    poll: PollConfig,
}

impl ConversationClient {
    /// Creates a new conversation client.
    pub fn new(api_key: String, base_url: String, poll: PollConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll,
        }
    }

    /// Creates a client reading the API key from `GENERATION_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(base_url: String, poll: PollConfig) -> VasariResult<Self> {
        let api_key = std::env::var("GENERATION_API_KEY")
            .map_err(|_| ConfigError::new("GENERATION_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, base_url, poll))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
        body: serde_json::Value,
    ) -> VasariResult<T> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::new(stage, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::new(
                stage,
                format!("HTTP {}: {}", status.as_u16(), detail),
            )
            .into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProtocolError::new(stage, format!("unexpected response shape: {e}")).into())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
    ) -> VasariResult<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| TransportError::new(stage, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::new(
                stage,
                format!("HTTP {}: {}", status.as_u16(), detail),
            )
            .into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProtocolError::new(stage, format!("unexpected response shape: {e}")).into())
    }

    /// Open a new conversation context.
    #[instrument(skip(self))]
    pub async fn create_conversation(&self) -> VasariResult<String> {
        let created: ConversationCreated = self
            .post_json(
                Stage::Conversation,
                &format!("{}/conversations", self.base_url),
                json!({}),
            )
            .await?;
        debug!(conversation = %created.id, "Opened conversation");
        Ok(created.id)
    }

    /// Submit `input` as a single user message.
    #[instrument(skip(self, input), fields(conversation = %conversation_id))]
    pub async fn post_message(&self, conversation_id: &str, input: &str) -> VasariResult<String> {
        let created: MessageCreated = self
            .post_json(
                Stage::Message,
                &format!("{}/conversations/{}/messages", self.base_url, conversation_id),
                json!({"role": "user", "content": input}),
            )
            .await?;
        Ok(created.id)
    }

    /// Start a run against the given generation profile.
    #[instrument(skip(self), fields(conversation = %conversation_id, profile = %profile))]
    pub async fn start_run(&self, conversation_id: &str, profile: &str) -> VasariResult<String> {
        let created: RunCreated = self
            .post_json(
                Stage::Run,
                &format!("{}/conversations/{}/runs", self.base_url, conversation_id),
                json!({"profile_id": profile}),
            )
            .await?;
        debug!(run = %created.id, status = %created.status, "Started run");
        Ok(created.id)
    }

    /// Observe a run's current state.
    pub async fn run_snapshot(
        &self,
        conversation_id: &str,
        run_id: &str,
    ) -> VasariResult<RunSnapshot> {
        self.get_json(
            Stage::Status,
            &format!(
                "{}/conversations/{}/runs/{}",
                self.base_url, conversation_id, run_id
            ),
        )
        .await
    }

    /// Fetch the first assistant message's text, if any.
    #[instrument(skip(self), fields(conversation = %conversation_id))]
    pub async fn first_assistant_text(
        &self,
        conversation_id: &str,
    ) -> VasariResult<Option<String>> {
        let list: MessageList = self
            .get_json(
                Stage::Retrieval,
                &format!("{}/conversations/{}/messages", self.base_url, conversation_id),
            )
            .await?;

        Ok(list
            .data
            .iter()
            .filter(|message| message.role == "assistant")
            .find_map(|message| message.first_text())
            .map(|text| text.to_string()))
    }
}

struct RunHandle<'a> {
    client: &'a ConversationClient,
    conversation_id: &'a str,
    run_id: &'a str,
}

#[async_trait]
impl RunStatusSource for RunHandle<'_> {
    async fn snapshot(&mut self) -> VasariResult<RunSnapshot> {
        self.client
            .run_snapshot(self.conversation_id, self.run_id)
            .await
    }
}

#[async_trait]
impl TextGenerator for ConversationClient {
    #[instrument(skip(self, input), fields(profile = %profile))]
    async fn generate(&self, profile: &str, input: &str) -> VasariResult<String> {
        let conversation_id = self.create_conversation().await?;
        self.post_message(&conversation_id, input).await?;
        let run_id = self.start_run(&conversation_id, profile).await?;

        let mut handle = RunHandle {
            client: self,
            conversation_id: &conversation_id,
            run_id: &run_id,
        };
        await_terminal(&mut handle, &self.poll).await?;

        match self.first_assistant_text(&conversation_id).await? {
            Some(text) if !text.trim().is_empty() => {
                debug!(chars = text.len(), "Retrieved assistant text");
                Ok(text)
            }
            _ => Err(GenerationError::new(GenerationErrorKind::Empty).into()),
        }
    }
}
