pub mod claude;
pub mod config;
pub mod deepl;
pub mod error;
pub mod logging;
pub mod models;
pub mod openai;
pub mod providers;
pub mod transport;
pub mod types;
pub mod wire;

pub use claude::Claude;
pub use config::AgentsConfig;
pub use deepl::{DeepL, Tier, Translation, TranslationRequest};
pub use error::{AgentError, Result};
pub use logging::SharedCallLog;
pub use openai::{
    process_filename, Chat, OpenAI, ReturnType, SpeechOptions, SpeechResult, TextToSpeech, Voice,
};
pub use types::{CompletionResult, FinishReason, GenerateOptions, Message, MessageContent, Role};
