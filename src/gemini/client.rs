use super::types::{GenerateContentRequest, extract_text, upstream_error_message};
use crate::{Error, Result, config::GeminiConfig, error::UNKNOWN_UPSTREAM_MESSAGE};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error};

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Sends one `generateContent` call and returns the first candidate's text.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::config(format!("Invalid base_url '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent?key={api_key}`, with the
    /// model encoded as a single path segment.
    fn endpoint(&self, model: &str) -> Result<Url> {
        let action = format!("{}:generateContent", model);
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| Error::internal("base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(["v1beta", "models", action.as_str()]);
        url.query_pairs_mut().append_pair("key", &self.api_key);

        Ok(url)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        let url = self.endpoint(model)?;

        debug!(
            model,
            response_mime_type = %request.generation_config.response_mime_type,
            parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(Error::network)?;

        let status = response.status();
        let body: Value = response.json().await.map_err(Error::network)?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                body = %pretty(&body),
                "Google AI API error response"
            );
            let message = upstream_error_message(&body)
                .unwrap_or(UNKNOWN_UPSTREAM_MESSAGE)
                .to_string();
            return Err(Error::Upstream { status, message });
        }

        match extract_text(&body) {
            Some(text) => {
                debug!(model, chars = text.len(), "Received generated text");
                Ok(text.to_string())
            }
            None => {
                error!(body = %pretty(&body), "Unexpected API response structure");
                Err(Error::Extraction)
            }
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
