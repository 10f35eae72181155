//! OpenAI SSE streaming frame types.
//!
//! Every frame of an outward stream is serialized as `data: <json>\n\n`;
//! the stream is closed by the literal sentinel `data: [DONE]\n\n`.

use serde::{Deserialize, Serialize};

/// One unit of the outward SSE stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamFrame {
    /// Incremental fragment for `/v1/completions`.
    Completion(CompletionChunk),
    /// Incremental fragment for `/v1/chat/completions`.
    Chat(ChatChunk),
    /// In-band failure report. The HTTP response is already committed as a
    /// 200 stream when a backend failure surfaces, so it travels as data.
    Error { error: StreamError },
    /// End-of-stream sentinel. Exactly one closes every stream.
    Done,
}

/// Streaming chunk for the completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChunk {
    pub id: String,
    /// Always "text_completion".
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionDelta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionDelta {
    pub text: String,
    pub index: u32,
    pub finish_reason: Option<String>,
}

/// Streaming chunk for the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChunk {
    pub id: String,
    /// Always "chat.completion.chunk".
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatDeltaChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDeltaChoice {
    pub index: u32,
    pub delta: ChatDelta,
    pub finish_reason: Option<String>,
}

/// Incremental message content. `role` appears only on the first frame of
/// a call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamError {
    pub message: String,
}

impl StreamFrame {
    /// Format as a Server-Sent Event.
    pub fn to_sse(&self) -> String {
        match self {
            StreamFrame::Done => "data: [DONE]\n\n".to_string(),
            other => {
                let data = serde_json::to_string(other).unwrap_or_else(|_| "{}".to_string());
                format!("data: {}\n\n", data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_sentinel_literal() {
        assert_eq!(StreamFrame::Done.to_sse(), "data: [DONE]\n\n");
    }

    #[test]
    fn test_completion_chunk_sse_format() {
        let frame = StreamFrame::Completion(CompletionChunk {
            id: "cmpl-1".to_string(),
            object: "text_completion".to_string(),
            created: 0,
            model: "m".to_string(),
            choices: vec![CompletionDelta {
                text: "hi".to_string(),
                index: 0,
                finish_reason: None,
            }],
        });

        let sse = frame.to_sse();
        assert!(sse.starts_with("data: {"));
        assert!(sse.ends_with("\n\n"));
        assert!(sse.contains(r#""text":"hi""#));
        assert!(sse.contains(r#""finish_reason":null"#));
    }

    #[test]
    fn test_chat_delta_role_omitted_when_none() {
        let frame = StreamFrame::Chat(ChatChunk {
            id: "chatcmpl-1".to_string(),
            object: "chat.completion.chunk".to_string(),
            created: 0,
            model: "m".to_string(),
            choices: vec![ChatDeltaChoice {
                index: 0,
                delta: ChatDelta {
                    role: None,
                    content: Some("lo".to_string()),
                },
                finish_reason: Some("stop".to_string()),
            }],
        });

        let sse = frame.to_sse();
        assert!(!sse.contains("role"));
        assert!(sse.contains(r#""finish_reason":"stop""#));
    }

    #[test]
    fn test_error_frame_payload() {
        let frame = StreamFrame::Error {
            error: StreamError {
                message: "boom".to_string(),
            },
        };
        let sse = frame.to_sse();
        assert!(sse.contains(r#""error":{"message":"boom"}"#));
    }
}
