//! OpenAI-compatible API type definitions.
//!
//! This module defines the request and response structures the gateway
//! presents to clients. They follow the OpenAI completions, chat
//! completions, embeddings and model-listing schemas; the backend never
//! sees them and clients never see the Ollama equivalents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Completions API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Text to complete.
    pub prompt: String,

    /// Model to generate with. Falls back to the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether to stream the response as server-sent events.
    #[serde(default)]
    pub stream: bool,

    /// Amount of randomness injected into the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Cap on the number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Prior context tokens from a previous Ollama response, passed
    /// through to the backend unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    /// Extra backend generation options, forwarded as-is.
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender ("system", "user", "assistant", ...).
    pub role: String,
    /// The content of the message.
    pub content: String,
}

/// Chat Completions API request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation history, in order. Order is semantically significant.
    pub messages: Vec<ChatMessage>,

    /// Model to generate with. Falls back to the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether to stream the response as server-sent events.
    #[serde(default)]
    pub stream: bool,

    /// Amount of randomness injected into the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Cap on the number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Prior context tokens from a previous Ollama response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    /// Extra backend generation options, forwarded as-is.
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// Embeddings API request. `input` is either one string or a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub input: EmbeddingInput,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// One text or an ordered batch of texts to embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// View the input as an ordered slice regardless of shape.
    pub fn as_slice(&self) -> &[String] {
        match self {
            EmbeddingInput::Single(s) => std::slice::from_ref(s),
            EmbeddingInput::Batch(v) => v.as_slice(),
        }
    }
}

/// Completions API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    /// Always "text_completion".
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    pub finish_reason: Option<String>,
}

/// Chat Completions API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    /// Always "chat.completion".
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// One entry of the `/v1/models` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCard {
    pub id: String,
    /// Always "model".
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// `/v1/models` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    /// Always "list".
    pub object: String,
    pub data: Vec<ModelCard>,
}

/// One embedding vector of the `/v1/embeddings` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Always "embedding".
    pub object: String,
    pub embedding: Vec<f32>,
    /// Position of the corresponding input. Matches input order.
    pub index: u32,
}

/// `/v1/embeddings` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Always "list".
    pub object: String,
    pub data: Vec<EmbeddingData>,
    pub model: String,
    pub usage: EmbeddingUsage,
}

/// Usage for embeddings. Ollama reports no token counts on this route,
/// so the gateway approximates with whitespace word counts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}
