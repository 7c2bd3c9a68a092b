use crate::claude::Claude;
use crate::deepl::DeepL;
use crate::error::{AgentError, Result};
use crate::models::{DEFAULT_CLAUDE_MODEL, DEFAULT_OPENAI_CHAT_MODEL, DEFAULT_SPEECH_MODEL};
use crate::openai::{Chat, TextToSpeech, Voice};
use crate::providers::{ANTHROPIC, DEEPL_FREE, OPENAI_CHAT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File configuration for the `model-agents` binary. API keys are never
/// stored here, only the names of the environment variables holding them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub deepl: DeepLConfig,
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    #[serde(default = "default_deepl_key_env")]
    pub api_key_env: String,
    /// Use the paid-tier endpoint.
    #[serde(default)]
    pub pro: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default)]
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default = "default_anthropic_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_claude_model")]
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_deepl_key_env() -> String {
    DEEPL_FREE.default_api_key_env.to_string()
}

fn default_openai_key_env() -> String {
    OPENAI_CHAT.default_api_key_env.to_string()
}

fn default_anthropic_key_env() -> String {
    ANTHROPIC.default_api_key_env.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_OPENAI_CHAT_MODEL.to_string()
}

fn default_speech_model() -> String {
    DEFAULT_SPEECH_MODEL.to_string()
}

fn default_claude_model() -> String {
    DEFAULT_CLAUDE_MODEL.to_string()
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_deepl_key_env(),
            pro: false,
            base_url: None,
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            chat_model: default_chat_model(),
            speech_model: default_speech_model(),
            voice: Voice::default(),
            chat_url: None,
            speech_url: None,
        }
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_anthropic_key_env(),
            model: default_claude_model(),
            base_url: None,
        }
    }
}

impl AgentsConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file, falling back to defaults.
    /// Priority: CLI arg > CWD > XDG config > home dir
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in &config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn deepl_client(&self) -> Result<DeepL> {
        let client = DeepL::with_tier(resolve_api_key(&self.deepl.api_key_env)?, self.deepl.pro);
        Ok(match self.deepl.base_url {
            Some(ref url) => client.with_endpoint(url),
            None => client,
        })
    }

    pub fn chat_client(&self) -> Result<Chat> {
        let client = Chat::new(
            resolve_api_key(&self.openai.api_key_env)?,
            &self.openai.chat_model,
        );
        Ok(match self.openai.chat_url {
            Some(ref url) => client.with_endpoint(url),
            None => client,
        })
    }

    pub fn speech_client(&self) -> Result<TextToSpeech> {
        let client = TextToSpeech::new(resolve_api_key(&self.openai.api_key_env)?)
            .with_model(&self.openai.speech_model);
        Ok(match self.openai.speech_url {
            Some(ref url) => client.with_endpoint(url),
            None => client,
        })
    }

    pub fn claude_client(&self) -> Result<Claude> {
        let client = Claude::with_model(
            resolve_api_key(&self.anthropic.api_key_env)?,
            &self.anthropic.model,
        );
        Ok(match self.anthropic.base_url {
            Some(ref url) => client.with_endpoint(url),
            None => client,
        })
    }
}

/// Read an API key from the named environment variable.
pub fn resolve_api_key(env_var: &str) -> Result<String> {
    std::env::var(env_var).map_err(|_| {
        AgentError::config(format!(
            "Environment variable '{env_var}' not set. Set it with your provider API key."
        ))
    })
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("model-agents.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = home_dir() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("model-agents")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("model-agents").join("config.toml"));
        }
        if let Some(home) = home_dir() {
            paths.push(home.join(".config").join("model-agents").join("config.toml"));
        }
    }

    // Home directory fallback
    if let Some(home) = home_dir() {
        paths.push(home.join(".model-agents.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deepl::Tier;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
[deepl]
pro = true

[openai]
api_key_env = "MY_OPENAI_KEY"
chat_model = "gpt-4-turbo"
voice = "nova"

[anthropic]
model = "claude-3-opus-20240229"
"#
        )
        .unwrap();

        let config = AgentsConfig::load(f.path()).unwrap();
        assert!(config.deepl.pro);
        assert_eq!(config.deepl.api_key_env, "DEEPL_API_KEY");
        assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(config.openai.chat_model, "gpt-4-turbo");
        assert_eq!(config.openai.speech_model, "tts-1");
        assert_eq!(config.openai.voice, Voice::Nova);
        assert_eq!(config.anthropic.model, "claude-3-opus-20240229");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let f = NamedTempFile::new().unwrap();
        let config = AgentsConfig::load(f.path()).unwrap();
        assert!(!config.deepl.pro);
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.anthropic.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[deepl\npro = yes").unwrap();
        assert!(matches!(
            AgentsConfig::load(f.path()),
            Err(AgentError::Toml(_))
        ));
    }

    #[test]
    fn test_clients_from_config() {
        std::env::set_var("MODEL_AGENTS_TEST_DEEPL_KEY", "abc");
        let mut config = AgentsConfig::default();
        config.deepl.api_key_env = "MODEL_AGENTS_TEST_DEEPL_KEY".to_string();
        config.deepl.pro = true;

        let client = config.deepl_client().unwrap();
        assert_eq!(client.tier(), Tier::Pro);
        assert_eq!(client.endpoint(), "https://api.deepl.com/v2/translate");

        config.deepl.base_url = Some("http://localhost:1234/v2/translate".to_string());
        assert_eq!(
            config.deepl_client().unwrap().endpoint(),
            "http://localhost:1234/v2/translate"
        );
    }

    #[test]
    fn test_missing_key_env_is_config_error() {
        let mut config = AgentsConfig::default();
        config.anthropic.api_key_env = "MODEL_AGENTS_TEST_UNSET_KEY".to_string();
        assert!(matches!(
            config.claude_client(),
            Err(AgentError::Config { .. })
        ));
    }
}
