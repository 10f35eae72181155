//! Data models for the exposed and backend APIs.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The inbound OpenAI-compatible API (`openai`)
//! - The upstream Ollama API (`ollama`)
//! - Streaming frame types (`streaming`)

pub mod ollama;
pub mod openai;
pub mod streaming;

pub use ollama::{GenerateRequest, GenerateResponse};
pub use openai::{
    ChatMessage, ChatRequest, ChatResponse, CompletionRequest, CompletionResponse,
    EmbeddingRequest, Usage,
};
pub use streaming::StreamFrame;
