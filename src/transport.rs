use crate::error::{AgentError, Result};
use crate::logging::{CallRecord, Outcome, SharedCallLog};
use crate::providers::{AuthScheme, ANTHROPIC_VERSION};
use crate::wire::{anthropic_types, deepl_types, openai_types};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Everything a client needs to reach its provider. Built once at
/// construction; clients never mutate it afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    endpoint: String,
    model: Option<String>,
    headers: Vec<(&'static str, String)>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, auth: AuthScheme) -> Self {
        let api_key = api_key.into();
        let mut headers = vec![
            auth.header(&api_key),
            ("Content-Type", "application/json".to_string()),
        ];
        if auth == AuthScheme::XApiKey {
            headers.push(("anthropic-version", ANTHROPIC_VERSION.to_string()));
        }

        Self {
            api_key,
            endpoint: endpoint.into(),
            model: None,
            headers,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

/// POST `body` as JSON to the configured endpoint.
///
/// Any non-2xx answer becomes [`AgentError::Api`] carrying the provider's
/// own error message when one can be extracted.
pub async fn post_json<B: Serialize + ?Sized>(
    http: &reqwest::Client,
    config: &ClientConfig,
    body: &B,
) -> Result<reqwest::Response> {
    let mut req = http.post(config.endpoint());
    for (name, value) in config.headers() {
        req = req.header(*name, value);
    }

    tracing::debug!(endpoint = %config.endpoint(), model = ?config.model(), "POST");

    let response = req.json(body).send().await?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(status = status.as_u16(), "Failed to read error body: {}", e);
            String::new()
        }
    };
    let message = error_message(&body)
        .unwrap_or_else(|| fallback_message(status, &body));

    tracing::warn!(status = status.as_u16(), endpoint = %config.endpoint(), "Provider error: {}", message);

    Err(AgentError::api(status.as_u16(), message))
}

/// POST and decode a JSON response.
pub async fn post_for_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    http: &reqwest::Client,
    config: &ClientConfig,
    body: &B,
) -> Result<T> {
    let response = post_json(http, config, body).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::warn!(
            endpoint = %config.endpoint(),
            "Failed to parse provider response: {}. Body: {}",
            e,
            truncate(&String::from_utf8_lossy(&bytes), 300)
        );
        AgentError::Json(e)
    })
}

/// POST and return the raw response payload.
pub async fn post_for_bytes<B: Serialize + ?Sized>(
    http: &reqwest::Client,
    config: &ClientConfig,
    body: &B,
) -> Result<Bytes> {
    let response = post_json(http, config, body).await?;
    Ok(response.bytes().await?)
}

/// Note the outcome of one call in the journal, if there is one. The
/// record's context names the endpoint and model the call went to.
pub fn record<T>(
    log: Option<&SharedCallLog>,
    provider: &str,
    operation: &str,
    config: &ClientConfig,
    result: &Result<T>,
    describe: impl FnOnce(&T) -> String,
) {
    let Some(log) = log else { return };
    let entry = match result {
        Ok(value) => CallRecord::new(provider, operation, Outcome::Ok, describe(value)),
        Err(e) => CallRecord::new(provider, operation, Outcome::Failed, e.to_string()),
    };
    log.record(entry.with_context(serde_json::json!({
        "endpoint": config.endpoint(),
        "model": config.model(),
    })));
}

fn error_message(body: &str) -> Option<String> {
    if let Ok(err) = serde_json::from_str::<anthropic_types::ErrorResponse>(body) {
        return Some(err.error.message);
    }
    if let Ok(err) = serde_json::from_str::<openai_types::ErrorResponse>(body) {
        return Some(err.error.message);
    }
    if let Ok(err) = serde_json::from_str::<deepl_types::ErrorResponse>(body) {
        return Some(err.message);
    }
    None
}

fn fallback_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        truncate(body, 500).to_string()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_per_scheme() {
        let deepl = ClientConfig::new("k", "https://example.test", AuthScheme::DeepLAuthKey);
        assert_eq!(deepl.headers()[0], ("Authorization", "DeepL-Auth-Key k".to_string()));
        assert_eq!(deepl.headers().len(), 2);

        let claude = ClientConfig::new("k", "https://example.test", AuthScheme::XApiKey);
        assert!(claude
            .headers()
            .contains(&("anthropic-version", "2023-06-01".to_string())));
    }

    #[test]
    fn test_debug_redacts_key() {
        let cfg = ClientConfig::new("sk-secret", "https://example.test", AuthScheme::Bearer);
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("https://example.test"));
    }

    #[test]
    fn test_error_message_extraction() {
        let openai = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(error_message(openai).as_deref(), Some("Incorrect API key provided"));

        let anthropic = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(error_message(anthropic).as_deref(), Some("invalid x-api-key"));

        let deepl = r#"{"message":"Wrong endpoint"}"#;
        assert_eq!(error_message(deepl).as_deref(), Some("Wrong endpoint"));

        assert!(error_message("Forbidden").is_none());
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(
            fallback_message(reqwest::StatusCode::FORBIDDEN, ""),
            "Forbidden"
        );
        assert_eq!(
            fallback_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
