//! Anthropic Messages client.

use crate::error::Result;
use crate::logging::SharedCallLog;
use crate::models::DEFAULT_CLAUDE_MODEL;
use crate::providers::ANTHROPIC;
use crate::transport::{self, ClientConfig};
use crate::types::{CompletionResult, GenerateOptions, Message};
use crate::wire::anthropic_types::MessagesResponse;
use crate::wire::request::{anthropic_request, SystemPlacement};
use crate::wire::response::anthropic_to_completion;

#[derive(Debug, Clone)]
pub struct Claude {
    http: reqwest::Client,
    config: ClientConfig,
    call_log: Option<SharedCallLog>,
}

impl Claude {
    pub const SYSTEM_PLACEMENT: SystemPlacement = SystemPlacement::TopLevel;

    /// Client on the default model (`claude-3-haiku-20240307`).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_CLAUDE_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: ClientConfig::new(api_key, ANTHROPIC.endpoint, ANTHROPIC.auth)
                .with_model(model),
            call_log: None,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config = self.config.with_endpoint(endpoint);
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn with_call_log(mut self, log: SharedCallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    pub fn model(&self) -> &str {
        self.config.model().unwrap_or(DEFAULT_CLAUDE_MODEL)
    }

    /// Generate a reply. The system prompt travels as the top-level `system`
    /// field, so `messages` must not contain system-role entries.
    pub async fn generate(
        &self,
        messages: &[Message],
        opts: &GenerateOptions,
    ) -> Result<CompletionResult> {
        let result = self.send(messages, opts).await;
        let log = self.call_log.as_ref();
        transport::record(log, "anthropic", "generate", &self.config, &result, |r| {
            format!(
                "in={} out={} tokens",
                r.usage.prompt_tokens, r.usage.completion_tokens
            )
        });
        result
    }

    async fn send(&self, messages: &[Message], opts: &GenerateOptions) -> Result<CompletionResult> {
        let body = anthropic_request(self.model(), messages, opts)?;
        let resp: MessagesResponse = transport::post_for_json(&self.http, &self.config, &body).await?;
        Ok(anthropic_to_completion(resp))
    }
}
