//! Built-in endpoint presets for the supported providers.
//!
//! Each preset pins the endpoint URL, how the API key is presented, and the
//! environment variable the binary reads the key from.

/// How a provider expects the API key to be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: DeepL-Auth-Key <key>`
    DeepLAuthKey,
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>` plus an `anthropic-version` header
    XApiKey,
}

impl AuthScheme {
    /// Header name and value carrying `api_key` under this scheme.
    #[must_use]
    pub fn header(self, api_key: &str) -> (&'static str, String) {
        match self {
            Self::DeepLAuthKey => ("Authorization", format!("DeepL-Auth-Key {api_key}")),
            Self::Bearer => ("Authorization", format!("Bearer {api_key}")),
            Self::XApiKey => ("x-api-key", api_key.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderPreset {
    pub endpoint: &'static str,
    pub auth: AuthScheme,
    pub default_api_key_env: &'static str,
}

pub const DEEPL_FREE: ProviderPreset = ProviderPreset {
    endpoint: "https://api-free.deepl.com/v2/translate",
    auth: AuthScheme::DeepLAuthKey,
    default_api_key_env: "DEEPL_API_KEY",
};

pub const DEEPL_PRO: ProviderPreset = ProviderPreset {
    endpoint: "https://api.deepl.com/v2/translate",
    auth: AuthScheme::DeepLAuthKey,
    default_api_key_env: "DEEPL_API_KEY",
};

pub const OPENAI_CHAT: ProviderPreset = ProviderPreset {
    endpoint: "https://api.openai.com/v1/chat/completions",
    auth: AuthScheme::Bearer,
    default_api_key_env: "OPENAI_API_KEY",
};

pub const OPENAI_SPEECH: ProviderPreset = ProviderPreset {
    endpoint: "https://api.openai.com/v1/audio/speech",
    auth: AuthScheme::Bearer,
    default_api_key_env: "OPENAI_API_KEY",
};

pub const ANTHROPIC: ProviderPreset = ProviderPreset {
    endpoint: "https://api.anthropic.com/v1/messages",
    auth: AuthScheme::XApiKey,
    default_api_key_env: "ANTHROPIC_API_KEY",
};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
