//! OpenAI clients: chat completions and text-to-speech.

mod chat;
mod filename;
mod speech;

pub use chat::Chat;
pub use filename::{process_filename, resolve_output_path, DEFAULT_FILENAME};
pub use speech::{ReturnType, SpeechOptions, SpeechResult, TextToSpeech};
pub use crate::wire::openai_types::Voice;

use crate::models::DEFAULT_OPENAI_CHAT_MODEL;

/// Entry point for the OpenAI clients.
pub struct OpenAI;

impl OpenAI {
    /// Chat client on the default model (`gpt-4o-mini`).
    pub fn chat(api_key: impl Into<String>) -> Chat {
        Chat::new(api_key, DEFAULT_OPENAI_CHAT_MODEL)
    }

    pub fn chat_with_model(api_key: impl Into<String>, model: impl Into<String>) -> Chat {
        Chat::new(api_key, model)
    }

    pub fn text_to_speech(api_key: impl Into<String>) -> TextToSpeech {
        TextToSpeech::new(api_key)
    }
}
