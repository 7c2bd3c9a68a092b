use base64::Engine;
use bytes::Bytes;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

use super::filename::{process_filename, resolve_output_path, DEFAULT_FILENAME};
use crate::error::{AgentError, Result};
use crate::logging::SharedCallLog;
use crate::models::DEFAULT_SPEECH_MODEL;
use crate::providers::OPENAI_SPEECH;
use crate::transport::{self, ClientConfig};
use crate::wire::openai_types::Voice;
use crate::wire::request::speech_request;

/// How `convert` hands back the synthesized audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnType {
    /// Write an `.mp3` file and return its absolute path.
    #[default]
    Filename,
    /// Raw audio bytes.
    Buffer,
    /// Audio bytes as standard base64.
    Base64,
    /// Anything else: the call is made but nothing is returned.
    Discard,
}

impl FromStr for ReturnType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "filename" => Self::Filename,
            "buffer" => Self::Buffer,
            "base64" => Self::Base64,
            _ => Self::Discard,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechOptions {
    pub return_type: ReturnType,
    /// Only used with [`ReturnType::Filename`]; sanitized before use.
    pub filename: String,
    pub voice: Voice,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            return_type: ReturnType::default(),
            filename: DEFAULT_FILENAME.to_string(),
            voice: Voice::default(),
        }
    }
}

impl SpeechOptions {
    #[must_use]
    pub fn return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    #[must_use]
    pub fn voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }
}

/// The audio in the representation the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechResult {
    Buffer(Bytes),
    Base64(String),
    Filename(PathBuf),
    Empty,
}

impl SpeechResult {
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_base64(&self) -> Option<&str> {
        match self {
            Self::Base64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Filename(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// OpenAI text-to-speech client.
#[derive(Debug, Clone)]
pub struct TextToSpeech {
    http: reqwest::Client,
    config: ClientConfig,
    call_log: Option<SharedCallLog>,
}

impl TextToSpeech {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: ClientConfig::new(api_key, OPENAI_SPEECH.endpoint, OPENAI_SPEECH.auth)
                .with_model(DEFAULT_SPEECH_MODEL),
            call_log: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config = self.config.with_model(model);
        self
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
        self.config.model().unwrap_or(DEFAULT_SPEECH_MODEL)
    }

    /// Synthesize `text` and deliver it as `opts.return_type` asks.
    ///
    /// `None` text fails immediately without contacting the provider.
    pub async fn convert(&self, text: Option<&str>, opts: &SpeechOptions) -> Result<SpeechResult> {
        let result = self.send(text, opts).await;
        let log = self.call_log.as_ref();
        transport::record(log, "openai", "convert", &self.config, &result, |r| match r {
            SpeechResult::Buffer(b) => format!("{} bytes", b.len()),
            SpeechResult::Base64(s) => format!("{} base64 chars", s.len()),
            SpeechResult::Filename(p) => format!("wrote {}", p.display()),
            SpeechResult::Empty => "discarded".to_string(),
        });
        result
    }

    async fn send(&self, text: Option<&str>, opts: &SpeechOptions) -> Result<SpeechResult> {
        let text = text.ok_or_else(|| AgentError::invalid_input("The input text is undefined"))?;

        let body = speech_request(self.model(), text, opts.voice);
        let audio = transport::post_for_bytes(&self.http, &self.config, &body).await?;

        match opts.return_type {
            ReturnType::Buffer => Ok(SpeechResult::Buffer(audio)),
            ReturnType::Base64 => Ok(SpeechResult::Base64(
                base64::engine::general_purpose::STANDARD.encode(&audio),
            )),
            ReturnType::Filename => {
                let path = resolve_output_path(&process_filename(&opts.filename))?;
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, &audio).await?;
                tracing::info!(path = %path.display(), bytes = audio.len(), "Wrote speech file");
                Ok(SpeechResult::Filename(path))
            }
            ReturnType::Discard => Ok(SpeechResult::Empty),
        }
    }
}
