//! Build provider request bodies from caller input.
//!
//! Normalization (upper-cased language codes, clamped sampling parameters,
//! system-prompt placement) happens here so the clients only send.

use super::anthropic_types::MessagesRequest;
use super::deepl_types::TranslateBody;
use super::openai_types::{ChatCompletionRequest, SpeechRequest, Voice};
use crate::claude::Claude;
use crate::deepl::TranslationRequest;
use crate::error::{AgentError, Result};
use crate::openai::Chat;
use crate::types::{GenerateOptions, Message, Role};

/// Where a conversational provider expects the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPlacement {
    /// Prepended to the history as a `system`-role message.
    FirstMessage,
    /// Sent as a top-level `system` field next to `messages`.
    TopLevel,
}

pub fn deepl_body(req: &TranslationRequest) -> TranslateBody {
    TranslateBody {
        text: req.text.to_vec(),
        target_lang: req.to.to_uppercase(),
        source_lang: req
            .from
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase),
    }
}

/// Split the system prompt from the history according to `placement`.
///
/// Returns the top-level system field (if any) and the messages to send.
pub fn place_system_prompt(
    placement: SystemPlacement,
    system: &str,
    messages: &[Message],
) -> Result<(Option<String>, Vec<Message>)> {
    match placement {
        SystemPlacement::FirstMessage => {
            let mut out = Vec::with_capacity(messages.len() + 1);
            out.push(Message::system(system));
            out.extend_from_slice(messages);
            Ok((None, out))
        }
        SystemPlacement::TopLevel => {
            if messages.iter().any(|m| m.role == Role::System) {
                return Err(AgentError::invalid_input(
                    "system-role messages are not accepted here; pass the system prompt in GenerateOptions",
                ));
            }
            Ok((Some(system.to_string()), messages.to_vec()))
        }
    }
}

pub fn openai_chat_request(
    model: &str,
    messages: &[Message],
    opts: &GenerateOptions,
) -> Result<ChatCompletionRequest> {
    let (_, messages) =
        place_system_prompt(Chat::SYSTEM_PLACEMENT, opts.system_prompt(), messages)?;

    Ok(ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: Some(opts.effective_max_tokens()),
        temperature: Some(opts.effective_temperature()),
    })
}

pub fn anthropic_request(
    model: &str,
    messages: &[Message],
    opts: &GenerateOptions,
) -> Result<MessagesRequest> {
    let (system, messages) =
        place_system_prompt(Claude::SYSTEM_PLACEMENT, opts.system_prompt(), messages)?;

    Ok(MessagesRequest {
        model: model.to_string(),
        max_tokens: opts.effective_max_tokens(),
        temperature: opts.effective_temperature(),
        system: system.unwrap_or_default(),
        messages,
    })
}

pub fn speech_request(model: &str, text: &str, voice: Voice) -> SpeechRequest {
    SpeechRequest {
        model: model.to_string(),
        input: text.to_string(),
        voice,
    }
}
