// Error types for the ollama2openai gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Ollama unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Ollama request timed out: {0}")]
    BackendTimeout(String),

    #[error("Ollama API error (HTTP {status}): {message}")]
    BackendStatus { status: u16, message: String },

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Classify a reqwest transport failure into the gateway taxonomy.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::BackendTimeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::BackendUnreachable(err.to_string())
        } else {
            GatewayError::Internal(format!("HTTP error: {}", err))
        }
    }
}

// Convert GatewayError to HTTP responses for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            GatewayError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                self.to_string(),
            ),
            GatewayError::BackendUnreachable(_) => (
                StatusCode::BAD_GATEWAY,
                "backend_unreachable",
                self.to_string(),
            ),
            GatewayError::BackendTimeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "backend_timeout",
                self.to_string(),
            ),
            GatewayError::BackendStatus { status, .. } => (
                // Mirror the backend's status when it is a valid code
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "backend_error",
                self.to_string(),
            ),
            GatewayError::Translation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "translation_error",
                self.to_string(),
            ),
            GatewayError::Config(_) | GatewayError::ConfigParsing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                self.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "api_error",
                self.to_string(),
            ),
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
