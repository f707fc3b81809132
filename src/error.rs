use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const MISSING_API_KEY_MESSAGE: &str =
    "The server is missing the required API key configuration.";
pub const EXTRACTION_MESSAGE: &str = "Could not extract text from the AI response.";
pub const INTERNAL_MESSAGE: &str = "An internal server error occurred.";
pub const UNKNOWN_UPSTREAM_MESSAGE: &str = "An unknown error occurred with the AI service.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Upstream response carried no text")]
    Extraction,

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wraps a transport error, dropping the request URL so the query-string
    /// credential cannot end up in logs.
    pub fn network(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }

    /// Status code reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message reported to the caller. Internal detail stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            Self::MethodNotAllowed(_) => "Method Not Allowed".to_string(),
            Self::BadRequest(detail) => format!("Invalid request: {}", detail),
            Self::PayloadTooLarge => "Request body is too large.".to_string(),
            Self::MissingApiKey => MISSING_API_KEY_MESSAGE.to_string(),
            Self::Upstream { message, .. } => format!("Google AI API Error: {}", message),
            Self::Extraction => EXTRACTION_MESSAGE.to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}
