use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single content block as accepted by `generateContent`. Only `parts` is
/// inspected; every other field is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub parts: Vec<Part>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A prompt part, kept exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Part {
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseMimeType {
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "text/plain")]
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: ResponseMimeType,
}

/// Body of `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Prompt>,
    pub generation_config: GenerationConfig,
}

impl Prompt {
    pub fn has_inline_data(&self) -> bool {
        self.parts.iter().any(Part::has_inline_data)
    }
}

impl Part {
    /// The `inlineData` (or `inline_data`) value, unless absent or null.
    pub fn inline_data(&self) -> Option<&Value> {
        self.fields
            .get("inlineData")
            .or_else(|| self.fields.get("inline_data"))
            .filter(|value| !value.is_null())
    }

    pub fn has_inline_data(&self) -> bool {
        self.inline_data().is_some()
    }
}

impl ResponseMimeType {
    /// Multimodal requests to a "flash" model are treated as structured
    /// extraction (e.g. reading a receipt image) and asked for JSON. Everything
    /// else gets plain text.
    pub fn for_request(model: &str, prompt: &Prompt) -> Self {
        if model.contains("flash") && prompt.has_inline_data() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }
}

impl fmt::Display for ResponseMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GenerateContentRequest {
    pub fn new(model: &str, prompt: Prompt) -> Self {
        let response_mime_type = ResponseMimeType::for_request(model, &prompt);
        Self {
            contents: vec![prompt],
            generation_config: GenerationConfig { response_mime_type },
        }
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-empty.
pub fn extract_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// `error.message` from an upstream error body, if present and non-empty.
pub fn upstream_error_message(body: &Value) -> Option<&str> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}
