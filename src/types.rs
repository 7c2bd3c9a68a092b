//! Caller-facing value types shared by the conversational clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

impl MessageContent {
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(t) => t.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .map(|b| match b {
                    ContentBlock::Text { text } => text.as_str(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_MAX_TOKENS: f64 = 1000.0;

/// Per-call knobs for `generate`. Every field falls back to a documented default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Defaults to [`DEFAULT_SYSTEM_PROMPT`].
    pub system: Option<String>,
    /// Clamped to `[0.0, 1.0]`. Defaults to [`DEFAULT_TEMPERATURE`].
    pub temperature: Option<f64>,
    /// Clamped to `>= 0` and rounded. Defaults to [`DEFAULT_MAX_TOKENS`].
    pub max_tokens: Option<f64>,
}

impl GenerateOptions {
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: f64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn system_prompt(&self) -> &str {
        self.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    pub fn effective_temperature(&self) -> f64 {
        clamp_temperature(self.temperature.unwrap_or(DEFAULT_TEMPERATURE))
    }

    pub fn effective_max_tokens(&self) -> u64 {
        clamp_max_tokens(self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
    }
}

/// NaN counts as the default.
pub fn clamp_temperature(t: f64) -> f64 {
    if t.is_nan() {
        DEFAULT_TEMPERATURE
    } else {
        t.clamp(0.0, 1.0)
    }
}

pub fn clamp_max_tokens(n: f64) -> u64 {
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX
        n.round() as u64
    }
}

/// Why a provider stopped generating, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other(String),
}

impl FinishReason {
    /// Map an Anthropic `stop_reason`.
    pub fn from_anthropic(reason: &str) -> Self {
        match reason {
            "end_turn" | "stop_sequence" => Self::Stop,
            "max_tokens" => Self::Length,
            "tool_use" => Self::ToolCalls,
            other => Self::from(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for FinishReason {
    fn from(s: String) -> Self {
        match s.as_str() {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "tool_calls" | "function_call" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            _ => Self::Other(s),
        }
    }
}

impl From<FinishReason> for String {
    fn from(r: FinishReason) -> Self {
        r.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

impl CompletionResult {
    /// Text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub index: u64,
    pub message: ChoiceMessage,
    pub finish_reason: Option<FinishReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_clamping() {
        assert_eq!(clamp_temperature(-5.0), 0.0);
        assert_eq!(clamp_temperature(5.0), 1.0);
        assert_eq!(clamp_temperature(0.4), 0.4);
        assert_eq!(clamp_temperature(f64::NAN), 0.0);
    }

    #[test]
    fn test_max_tokens_clamping() {
        assert_eq!(clamp_max_tokens(-3.0), 0);
        assert_eq!(clamp_max_tokens(10.4), 10);
        assert_eq!(clamp_max_tokens(10.5), 11);
        assert_eq!(clamp_max_tokens(1000.0), 1000);
    }

    #[test]
    fn test_generate_defaults() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(opts.effective_temperature(), 0.0);
        assert_eq!(opts.effective_max_tokens(), 1000);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from("stop".to_string()), FinishReason::Stop);
        assert_eq!(FinishReason::from("function_call".to_string()), FinishReason::ToolCalls);
        assert_eq!(FinishReason::from_anthropic("end_turn"), FinishReason::Stop);
        assert_eq!(FinishReason::from_anthropic("max_tokens"), FinishReason::Length);
        assert_eq!(FinishReason::from_anthropic("tool_use"), FinishReason::ToolCalls);
        assert_eq!(
            FinishReason::from_anthropic("pause_turn"),
            FinishReason::Other("pause_turn".to_string())
        );
    }

    #[test]
    fn test_content_serializes_untagged() {
        let text = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(text, serde_json::json!({ "role": "user", "content": "hi" }));

        let blocks = serde_json::to_value(Message::user(vec![ContentBlock::text("hi")])).unwrap();
        assert_eq!(
            blocks,
            serde_json::json!({ "role": "user", "content": [{ "type": "text", "text": "hi" }] })
        );
    }
}
