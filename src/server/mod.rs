//! Axum-based HTTP server implementation for the gateway.
//!
//! This module is responsible for setting up the HTTP server, configuring
//! routes, and handling incoming requests from clients that expect an
//! OpenAI-compatible API. It bridges these requests to an Ollama server.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (completions,
//!   chat, embeddings, models, health, system).
//! - `routes`: The main router configuration, including request ID and
//!   trace middleware.

mod handlers;
mod routes;

pub use routes::{create_router, AppState};
