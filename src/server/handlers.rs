// HTTP request handlers

use super::routes::AppState;
use crate::error::GatewayError;
use crate::models::ollama::GenerateRequest;
use crate::models::openai::{
    ChatRequest, CompletionRequest, EmbeddingData, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage, ModelCard, ModelList,
};
use crate::translation::{
    chat_to_generate, completion_to_generate, generate_to_chat, generate_to_completion,
    EndpointKind, StreamTranscoder,
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bounded timeout for the health probe, independent of the main
/// request timeout.
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness banner for `GET /`.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "ollama2openai gateway is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Handler for `GET /v1/health`.
///
/// One bounded probe of the backend's version endpoint, classified
/// three ways: healthy (2xx), degraded (reachable but non-2xx),
/// unhealthy (connection error or timeout). Always returns 200 with the
/// classification in the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.client.version(HEALTH_PROBE_TIMEOUT).await {
        Ok((version, latency)) => HealthResponse {
            status: HealthStatus::Healthy,
            ollama_version: Some(version.version),
            response_time: Some(format!("{:.3}s", latency.as_secs_f64())),
            message: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        Err(GatewayError::BackendStatus { status, message }) => {
            warn!("Health probe got HTTP {} from backend", status);
            HealthResponse {
                status: HealthStatus::Degraded,
                ollama_version: None,
                response_time: None,
                message: Some(format!("Backend responded with HTTP {}: {}", status, message)),
                timestamp: chrono::Utc::now().to_rfc3339(),
            }
        }
        Err(e) => {
            warn!("Health probe failed: {}", e);
            HealthResponse {
                status: HealthStatus::Unhealthy,
                ollama_version: None,
                response_time: None,
                message: Some(e.to_string()),
                timestamp: chrono::Utc::now().to_rfc3339(),
            }
        }
    };

    Json(response)
}

/// Handler for `GET /v1/system`.
///
/// Server, backend and environment summary. The installed model list is
/// best-effort; a backend failure leaves it empty and is reported in the
/// `ollama.status` field.
pub async fn system_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (models, backend_status) = match state.client.list_models().await {
        Ok(models) => (
            models.into_iter().map(|m| m.name).collect::<Vec<_>>(),
            "ok".to_string(),
        ),
        Err(e) => {
            warn!("Could not list backend models: {}", e);
            (Vec::new(), e.to_string())
        }
    };

    Json(json!({
        "server": {
            "version": env!("CARGO_PKG_VERSION"),
            "host": state.config.server.host,
            "port": state.config.server.port,
            "default_model": state.config.ollama.default_model,
        },
        "ollama": {
            "api_base_url": state.config.ollama.api_base_url,
            "status": backend_status,
            "models": models,
        },
    }))
}

/// Handler for `GET /v1/models`.
pub async fn models_handler(
    State(state): State<AppState>,
) -> Result<Json<ModelList>, GatewayError> {
    let models = state.client.list_models().await?;

    Ok(Json(ModelList {
        object: "list".to_string(),
        data: models
            .into_iter()
            .map(|m| ModelCard {
                id: m.name,
                object: "model".to_string(),
                created: 0,
                owned_by: "ollama".to_string(),
            })
            .collect(),
    }))
}

/// Handler for `POST /v1/completions`.
pub async fn completions_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, GatewayError> {
    // Deserialize manually for useful 400 messages
    let req: CompletionRequest = serde_json::from_str(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e)))?;

    validate_model(&req.model)?;

    info!(
        "Received completion request: model={}, stream={}",
        req.model.as_deref().unwrap_or("<default>"),
        req.stream
    );

    let generate_req = completion_to_generate(&req, &state.config.ollama.default_model);
    let model = generate_req.model.clone();

    if req.stream {
        Ok(stream_generate(state, generate_req, EndpointKind::Completion, model).await)
    } else {
        let resp = state.client.generate(generate_req).await?;
        Ok(Json(generate_to_completion(resp, &model)).into_response())
    }
}

/// Handler for `POST /v1/chat/completions`.
pub async fn chat_completions_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, GatewayError> {
    let req: ChatRequest = serde_json::from_str(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e)))?;

    validate_model(&req.model)?;
    if req.messages.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "messages must not be empty".to_string(),
        ));
    }

    info!(
        "Received chat request: model={}, messages={}, stream={}",
        req.model.as_deref().unwrap_or("<default>"),
        req.messages.len(),
        req.stream
    );

    let generate_req = chat_to_generate(&req, &state.config.ollama.default_model);
    let model = generate_req.model.clone();

    if req.stream {
        Ok(stream_generate(state, generate_req, EndpointKind::Chat, model).await)
    } else {
        let resp = state.client.generate(generate_req).await?;
        Ok(Json(generate_to_chat(resp, &model)).into_response())
    }
}

/// Handler for `POST /v1/embeddings`.
///
/// One backend call per input item, issued sequentially; output order
/// always matches input order. Any backend failure fails the whole
/// request rather than returning a partial list.
pub async fn embeddings_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<EmbeddingResponse>, GatewayError> {
    let req: EmbeddingRequest = serde_json::from_str(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e)))?;

    validate_model(&req.model)?;

    let model = req
        .model
        .clone()
        .unwrap_or_else(|| state.config.ollama.embedding_model.clone());
    let inputs = req.input.as_slice();

    info!(
        "Received embeddings request: model={}, inputs={}",
        model,
        inputs.len()
    );

    let mut data = Vec::with_capacity(inputs.len());
    for (index, text) in inputs.iter().enumerate() {
        let embedding = state.client.embeddings(&model, text).await?;
        data.push(EmbeddingData {
            object: "embedding".to_string(),
            embedding,
            index: index as u32,
        });
    }

    // Ollama reports no usage on this route; approximate with word counts
    let prompt_tokens: u32 = inputs
        .iter()
        .map(|text| text.split_whitespace().count() as u32)
        .sum();

    Ok(Json(EmbeddingResponse {
        object: "list".to_string(),
        data,
        model,
        usage: EmbeddingUsage {
            prompt_tokens,
            total_tokens: prompt_tokens,
        },
    }))
}

/// Reject an explicitly empty model name. An absent model is fine and
/// falls back to the configured default.
fn validate_model(model: &Option<String>) -> Result<(), GatewayError> {
    match model {
        Some(m) if m.is_empty() => Err(GatewayError::InvalidRequest(
            "model must not be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Run a streaming generation and return the SSE response.
///
/// The 200 response with `text/event-stream` headers is committed before
/// the backend is contacted; every failure after that point travels
/// in-band as an error frame followed by the `[DONE]` sentinel. Client
/// disconnect drops the body stream, which drops the backend connection.
async fn stream_generate(
    state: AppState,
    generate_req: GenerateRequest,
    kind: EndpointKind,
    model: String,
) -> Response {
    use futures::StreamExt;

    debug!("Starting SSE response for model: {}", model);

    let sse_stream = async_stream::stream! {
        let mut transcoder = StreamTranscoder::new(kind, model);

        let backend_stream = match state.client.generate_stream(generate_req).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Backend stream failed to start: {}", e);
                for frame in transcoder.failure_frames(e.to_string()) {
                    yield Ok::<String, std::convert::Infallible>(frame.to_sse());
                }
                return;
            }
        };

        futures::pin_mut!(backend_stream);

        let mut closed = false;
        while let Some(chunk_result) = backend_stream.next().await {
            match chunk_result {
                Ok(chunk) => {
                    let done = chunk.done;
                    for frame in transcoder.transcode_chunk(chunk) {
                        yield Ok(frame.to_sse());
                    }
                    if done {
                        closed = true;
                        break;
                    }
                }
                Err(e) => {
                    warn!("Backend stream error: {}", e);
                    for frame in transcoder.failure_frames(e.to_string()) {
                        yield Ok(frame.to_sse());
                    }
                    closed = true;
                    break;
                }
            }
        }

        // Backend closed without a final chunk: still terminate the stream
        if !closed {
            for frame in transcoder.close_frames() {
                yield Ok(frame.to_sse());
            }
        }

        debug!("SSE stream ended");
    };

    let body = axum::body::Body::from_stream(sse_stream);

    Response::builder()
        .status(200)
        .header("Content-Type", "text/event-stream; charset=utf-8")
        .header("Cache-Control", "no-cache")
        .header("Connection", "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(body)
        .unwrap_or_else(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
