//! Model identifiers the clients know about.
//!
//! Model ids are passed to the providers as plain strings, so anything not in
//! these lists still works; the lists exist for the CLI and for defaults.

/// Cheapest general-purpose chat model, used when none is given.
pub const DEFAULT_OPENAI_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default Anthropic model.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-haiku-20240307";

/// Standard text-to-speech model.
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";

pub const OPENAI_SPEECH_MODELS: &[&str] = &["tts-1", "tts-1-hd"];

#[must_use]
pub fn known_openai_chat_models() -> Vec<&'static str> {
    vec![
        "gpt-4o-mini",
        "gpt-4o",
        "gpt-4-turbo",
        "gpt-4",
        "gpt-3.5-turbo",
    ]
}

#[must_use]
pub fn known_claude_models() -> Vec<&'static str> {
    vec![
        "claude-3-haiku-20240307",
        "claude-3-sonnet-20240229",
        "claude-3-opus-20240229",
        "claude-3-5-sonnet-20240620",
    ]
}
