// Ollama API client

use crate::config::OllamaConfig;
use crate::error::{GatewayError, Result};
use crate::models::ollama::{
    EmbeddingsRequest, EmbeddingsResponse, GenerateRequest, GenerateResponse, TagModel,
    TagsResponse, VersionResponse,
};
use futures::stream::Stream;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Ollama HTTP API.
///
/// Issues a single call per operation and never retries; failures surface
/// as `GatewayError` for the endpoint layer to translate. Supports:
/// - Generation (blocking and line-delimited streaming)
/// - Embeddings
/// - Model listing and version probing
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl OllamaClient {
    /// Create a new Ollama client.
    ///
    /// The underlying HTTP client carries only a connect timeout; the full
    /// request timeout is applied per call on blocking paths so streaming
    /// generation can run as long as the backend needs.
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `/api/generate` in blocking mode (`stream:false`).
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("Calling generate API for model: {}", request.model);

        let response = self
            .http_client
            .post(&url)
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama generate error: HTTP {} - {}", status, error_text);
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                message: extract_error_message(&error_text).unwrap_or(error_text),
            });
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Translation(format!("Response parsing error: {}", e)))?;

        debug!("Successfully received generate response");
        Ok(generate_response)
    }

    /// Call `/api/generate` in streaming mode (`stream:true`).
    ///
    /// Returns a lazily-decoded chunk sequence bound to the live
    /// connection. Only the connect timeout applies; generation may
    /// outlast the blocking-call request timeout.
    pub async fn generate_stream(
        &self,
        mut request: GenerateRequest,
    ) -> Result<impl Stream<Item = Result<GenerateResponse>> + Send> {
        let url = format!("{}/api/generate", self.base_url);
        request.stream = true;

        debug!("Starting generate stream for model: {}", request.model);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama stream error: HTTP {} - {}", status, error_text);
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                message: extract_error_message(&error_text).unwrap_or(error_text),
            });
        }

        Ok(super::streaming::decode_chunks(response.bytes_stream()))
    }

    /// Call `/api/embeddings` for a single prompt.
    pub async fn embeddings(&self, model: &str, prompt: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        debug!("Calling embeddings API for model: {}", model);

        let request = EmbeddingsRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama embeddings error: HTTP {} - {}", status, error_text);
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                message: extract_error_message(&error_text).unwrap_or(error_text),
            });
        }

        let embeddings: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Translation(format!("Response parsing error: {}", e)))?;

        Ok(embeddings.embedding)
    }

    /// List installed models via `/api/tags`.
    ///
    /// A backend failure is an error, never an empty list.
    pub async fn list_models(&self) -> Result<Vec<TagModel>> {
        let url = format!("{}/api/tags", self.base_url);
        debug!("Listing models via {}", url);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                message: extract_error_message(&error_text).unwrap_or(error_text),
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Translation(format!("Response parsing error: {}", e)))?;

        Ok(tags.models)
    }

    /// Probe `/api/version` with a short bounded timeout.
    ///
    /// Returns the version string and the round-trip latency.
    pub async fn version(&self, timeout: Duration) -> Result<(VersionResponse, Duration)> {
        let url = format!("{}/api/version", self.base_url);
        debug!("Checking backend version via {}", url);

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                message: extract_error_message(&error_text).unwrap_or(error_text),
            });
        }

        let version: VersionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Translation(format!("Response parsing error: {}", e)))?;

        let latency = start.elapsed();
        debug!("Backend version check passed in {:?}", latency);

        Ok((version, latency))
    }
}

/// Extract the error message from an Ollama error body (`{"error": "..."}`).
fn extract_error_message(response_text: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorResponse>(response_text)
        .ok()
        .and_then(|resp| resp.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error": "model not found"}"#),
            Some("model not found".to_string())
        );
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message(r#"{"other": 1}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = OllamaConfig {
            api_base_url: "http://localhost:11434/".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
