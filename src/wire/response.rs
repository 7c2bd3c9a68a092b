use super::anthropic_types::{MessagesResponse, ResponseContentBlock};
use crate::types::{Choice, ChoiceMessage, CompletionResult, FinishReason, Role, Usage};

/// Fold an Anthropic Messages response into a single-choice [`CompletionResult`].
///
/// Text blocks are concatenated; other block kinds carry no text and are skipped.
pub fn anthropic_to_completion(resp: MessagesResponse) -> CompletionResult {
    let text: String = resp
        .content
        .iter()
        .filter_map(|b| match b {
            ResponseContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    let usage = Usage {
        prompt_tokens: resp.usage.input_tokens,
        completion_tokens: resp.usage.output_tokens,
        total_tokens: resp.usage.input_tokens + resp.usage.output_tokens,
    };

    CompletionResult {
        id: resp.id,
        object: resp.response_type,
        created: 0,
        model: resp.model,
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: Role::Assistant,
                content: Some(text),
            },
            finish_reason: resp.stop_reason.as_deref().map(FinishReason::from_anthropic),
            logprobs: None,
        }],
        usage,
        system_fingerprint: None,
    }
}
