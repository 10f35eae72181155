// HTTP routes configuration

use super::handlers::{
    chat_completions_handler, completions_handler, embeddings_handler, health_handler,
    models_handler, root_handler, system_handler,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ollama::OllamaClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: Arc<OllamaClient>,
}

pub fn create_router(config: AppConfig, client: OllamaClient) -> Result<Router> {
    let state = AppState {
        config,
        client: Arc::new(client),
    };

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/v1/health", get(health_handler))
        .route("/v1/system", get(system_handler))
        .route("/v1/models", get(models_handler))
        .route("/v1/completions", post(completions_handler))
        .route("/v1/chat/completions", post(chat_completions_handler))
        .route("/v1/embeddings", post(embeddings_handler))
        // Generous limit for large prompts and embedding batches
        .layer(tower_http::limit::RequestBodyLimitLayer::new(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(app)
}
