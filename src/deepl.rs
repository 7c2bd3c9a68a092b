//! DeepL translation client.

use crate::error::{AgentError, Result};
use crate::logging::SharedCallLog;
use crate::providers::{ProviderPreset, DEEPL_FREE, DEEPL_PRO};
use crate::transport::{self, ClientConfig};
use crate::wire::deepl_types::TranslateResponse;
use crate::wire::request::deepl_body;

pub use crate::wire::deepl_types::Translation;

/// DeepL service tier. Each tier has its own host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub fn preset(self) -> &'static ProviderPreset {
        match self {
            Tier::Free => &DEEPL_FREE,
            Tier::Pro => &DEEPL_PRO,
        }
    }
}

impl From<bool> for Tier {
    /// `true` selects the paid tier.
    fn from(is_pro: bool) -> Self {
        if is_pro {
            Tier::Pro
        } else {
            Tier::Free
        }
    }
}

/// One or more texts to translate. A single string becomes a one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText(Vec<String>);

impl From<&str> for SourceText {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for SourceText {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl From<Vec<String>> for SourceText {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<Vec<&str>> for SourceText {
    fn from(v: Vec<&str>) -> Self {
        Self(v.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for SourceText {
    fn from(v: &[&str]) -> Self {
        Self(v.iter().map(|s| (*s).to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Source language; `None` lets DeepL detect it.
    pub from: Option<String>,
    pub to: String,
    pub text: Vec<String>,
}

impl TranslationRequest {
    pub fn new(to: impl Into<String>, text: impl Into<SourceText>) -> Self {
        Self {
            from: None,
            to: to.into(),
            text: text.into().0,
        }
    }

    #[must_use]
    pub fn from_lang(mut self, lang: impl Into<String>) -> Self {
        self.from = Some(lang.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.to.trim().is_empty() {
            return Err(AgentError::invalid_input("target language is required"));
        }
        if self.text.is_empty() {
            return Err(AgentError::invalid_input("at least one text is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeepL {
    http: reqwest::Client,
    config: ClientConfig,
    tier: Tier,
    call_log: Option<SharedCallLog>,
}

impl DeepL {
    /// Client for the free tier.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_tier(api_key, Tier::Free)
    }

    /// Client for the paid tier.
    pub fn pro(api_key: impl Into<String>) -> Self {
        Self::with_tier(api_key, Tier::Pro)
    }

    pub fn with_tier(api_key: impl Into<String>, tier: impl Into<Tier>) -> Self {
        let tier = tier.into();
        let preset = tier.preset();
        Self {
            http: reqwest::Client::new(),
            config: ClientConfig::new(api_key, preset.endpoint, preset.auth),
            tier,
            call_log: None,
        }
    }

    /// Point the client at a different URL (a proxy or a test server).
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

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Translate every text in `req`, returning results in input order.
    pub async fn translate(&self, req: &TranslationRequest) -> Result<Vec<Translation>> {
        let result = self.send(req).await;
        let log = self.call_log.as_ref();
        transport::record(log, "deepl", "translate", &self.config, &result, |t| {
            format!("{} text(s) to {}", t.len(), req.to.to_uppercase())
        });
        result
    }

    async fn send(&self, req: &TranslationRequest) -> Result<Vec<Translation>> {
        req.validate()?;
        let body = deepl_body(req);
        let resp: TranslateResponse = transport::post_for_json(&self.http, &self.config, &body).await?;
        Ok(resp.translations)
    }
}
