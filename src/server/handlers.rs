use super::types::{ErrorResponse, GenerateRequest, GenerateResponse};
use crate::{
    Error, Result,
    gemini::{GenerateContentRequest, GenerativeClient},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key was configured at startup.
    pub generator: Option<Arc<dyn GenerativeClient>>,
}

pub async fn generate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    // A missing credential wins over a malformed body.
    let generator = state.generator.as_ref().ok_or(Error::MissingApiKey)?;

    let Json(request) = payload.map_err(reject_body)?;
    request.validate()?;

    info!(model = %request.model, "Received generation request");

    let GenerateRequest { model, prompt } = request;
    let upstream_request = GenerateContentRequest::new(&model, prompt);
    let text = generator.generate_content(&model, &upstream_request).await?;

    Ok(Json(GenerateResponse { text }))
}

fn reject_body(rejection: JsonRejection) -> Error {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge
    } else {
        Error::bad_request(rejection.body_text())
    }
}

pub async fn method_not_allowed(method: Method) -> Error {
    Error::MethodNotAllowed(method.to_string())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::MissingApiKey => {
                error!("CRITICAL: GOOGLE_AI_API_KEY environment variable not found on the server.")
            }
            Error::MethodNotAllowed(method) => warn!(%method, "Rejected non-POST request"),
            Error::BadRequest(detail) => warn!(%detail, "Rejected malformed request"),
            Error::PayloadTooLarge => warn!("Rejected oversized request body"),
            Error::Upstream { status, message } => warn!(
                status = status.as_u16(),
                %message,
                "Upstream rejected generation request"
            ),
            Error::Extraction => warn!("Upstream response carried no text"),
            other => error!(error = %other, "Internal Server Error while calling Google AI"),
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
