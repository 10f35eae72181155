//! Ollama API type definitions.
//!
//! Wire types for the upstream Ollama server: `/api/generate`,
//! `/api/embeddings`, `/api/tags` and `/api/version`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `/api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,

    /// Generation options (`temperature`, `num_predict`, ...).
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub options: Map<String, Value>,

    /// Context tokens from a previous response, to continue a conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
}

/// Response body for `/api/generate`.
///
/// With `stream:false` this is the whole response; with `stream:true`
/// Ollama sends one of these per line, where `response` holds an
/// incremental fragment and the token counters only appear on the final
/// (`done:true`) chunk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,

    #[serde(default)]
    pub done: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub prompt: String,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default)]
    pub embedding: Vec<f32>,
}

/// Response body for `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

/// One installed model as reported by `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagModel {
    pub name: String,
}

/// Response body for `/api/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_tolerates_sparse_chunks() {
        // Mid-stream chunks carry no counters and no context
        let chunk: GenerateResponse =
            serde_json::from_str(r#"{"response": "Hel", "done": false}"#).unwrap();
        assert_eq!(chunk.response, "Hel");
        assert!(!chunk.done);
        assert!(chunk.prompt_eval_count.is_none());
    }

    #[test]
    fn test_generate_request_omits_empty_options() {
        let req = GenerateRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            stream: false,
            options: Map::new(),
            context: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("options").is_none());
        assert!(json.get("context").is_none());
    }
}
