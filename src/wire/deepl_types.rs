//! Types for the [DeepL translate endpoint](https://developers.deepl.com/docs/api-reference/translate).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateBody {
    /// Always a list, even for a single text.
    pub text: Vec<String>,
    pub target_lang: String,
    /// Omitted to let DeepL detect the source language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translations: Vec<Translation>,
}

/// One translated text, in the same position as its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub detected_source_language: String,
    pub text: String,
}

/// Body DeepL sends with most 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
