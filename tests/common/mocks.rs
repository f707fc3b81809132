use async_trait::async_trait;
use axum::http::StatusCode;
use gemini_proxy::{
    Error, Result,
    gemini::{GenerateContentRequest, GenerativeClient},
};
use std::sync::{Arc, Mutex};

/// What the mock upstream answers with
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Text(String),
    Upstream(StatusCode, String),
    Extraction,
    Internal(String),
}

/// Mock generative client that records every call
#[derive(Debug)]
pub struct MockGenerativeClient {
    pub calls: Arc<Mutex<Vec<(String, GenerateContentRequest)>>>,
    pub outcome: MockOutcome,
}

impl MockGenerativeClient {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(MockOutcome::Text(text.to_string()))
    }

    pub fn get_calls(&self) -> Vec<(String, GenerateContentRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));

        match &self.outcome {
            MockOutcome::Text(text) => Ok(text.clone()),
            MockOutcome::Upstream(status, message) => Err(Error::Upstream {
                status: *status,
                message: message.clone(),
            }),
            MockOutcome::Extraction => Err(Error::Extraction),
            MockOutcome::Internal(detail) => Err(Error::internal(detail.clone())),
        }
    }
}
