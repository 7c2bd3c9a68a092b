use crate::error::Result;
use crate::logging::SharedCallLog;
use crate::models::DEFAULT_OPENAI_CHAT_MODEL;
use crate::providers::OPENAI_CHAT;
use crate::transport::{self, ClientConfig};
use crate::types::{CompletionResult, GenerateOptions, Message};
use crate::wire::request::{openai_chat_request, SystemPlacement};

/// OpenAI chat-completions client.
#[derive(Debug, Clone)]
pub struct Chat {
    http: reqwest::Client,
    config: ClientConfig,
    call_log: Option<SharedCallLog>,
}

impl Chat {
    pub const SYSTEM_PLACEMENT: SystemPlacement = SystemPlacement::FirstMessage;

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: ClientConfig::new(api_key, OPENAI_CHAT.endpoint, OPENAI_CHAT.auth)
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
        self.config.model().unwrap_or(DEFAULT_OPENAI_CHAT_MODEL)
    }

    /// Generate a reply to `messages`. The system prompt from `opts` is sent
    /// as the first message.
    pub async fn generate(
        &self,
        messages: &[Message],
        opts: &GenerateOptions,
    ) -> Result<CompletionResult> {
        let result = self.send(messages, opts).await;
        let log = self.call_log.as_ref();
        transport::record(log, "openai", "generate", &self.config, &result, |r| {
            format!("{} choice(s), {} tokens", r.choices.len(), r.usage.total_tokens)
        });
        result
    }

    async fn send(&self, messages: &[Message], opts: &GenerateOptions) -> Result<CompletionResult> {
        let body = openai_chat_request(self.model(), messages, opts)?;
        transport::post_for_json(&self.http, &self.config, &body).await
    }
}
