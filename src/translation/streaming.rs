// Streaming transcoding (Ollama chunks → OpenAI SSE frames)

use crate::models::ollama::GenerateResponse;
use crate::models::streaming::{
    ChatChunk, ChatDelta, ChatDeltaChoice, CompletionChunk, CompletionDelta, StreamError,
    StreamFrame,
};
use tracing::debug;

/// Which exposed endpoint the stream belongs to. The two differ only in
/// frame shape, not in protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Completion,
    Chat,
}

/// Transcodes decoded Ollama chunks into OpenAI SSE frames.
///
/// Holds only per-call state, so concurrent streams never interfere:
/// the frame identity fields, and whether the `assistant` role has been
/// attached to a chat frame yet. The role goes on the first frame
/// physically sent on this call, regardless of its content.
pub struct StreamTranscoder {
    id: String,
    model: String,
    created: i64,
    kind: EndpointKind,
    role_sent: bool,
}

impl StreamTranscoder {
    pub fn new(kind: EndpointKind, model: String) -> Self {
        let prefix = match kind {
            EndpointKind::Completion => "cmpl",
            EndpointKind::Chat => "chatcmpl",
        };

        Self {
            id: format!("{}-{}", prefix, uuid::Uuid::new_v4().simple()),
            model,
            created: chrono::Utc::now().timestamp(),
            kind,
            role_sent: false,
        }
    }

    /// Transcode one backend chunk into outward frames.
    ///
    /// Emits a single delta frame; on the final chunk the frame carries
    /// `finish_reason: "stop"` and is followed by the `[DONE]` sentinel.
    /// The caller must stop feeding chunks after the sentinel.
    pub fn transcode_chunk(&mut self, chunk: GenerateResponse) -> Vec<StreamFrame> {
        let finish_reason = chunk.done.then(|| "stop".to_string());
        let mut frames = Vec::with_capacity(2);

        let frame = match self.kind {
            EndpointKind::Completion => StreamFrame::Completion(CompletionChunk {
                id: self.id.clone(),
                object: "text_completion".to_string(),
                created: self.created,
                model: self.model.clone(),
                choices: vec![CompletionDelta {
                    text: chunk.response,
                    index: 0,
                    finish_reason,
                }],
            }),
            EndpointKind::Chat => {
                // Only the first frame of the call carries the role
                let role = if self.role_sent {
                    None
                } else {
                    Some("assistant".to_string())
                };

                StreamFrame::Chat(ChatChunk {
                    id: self.id.clone(),
                    object: "chat.completion.chunk".to_string(),
                    created: self.created,
                    model: self.model.clone(),
                    choices: vec![ChatDeltaChoice {
                        index: 0,
                        delta: ChatDelta {
                            role,
                            content: Some(chunk.response),
                        },
                        finish_reason,
                    }],
                })
            }
        };

        self.role_sent = true;
        frames.push(frame);

        if chunk.done {
            debug!("Final backend chunk seen, closing stream");
            frames.push(StreamFrame::Done);
        }

        frames
    }

    /// Frames for a failed stream: one in-band error frame, then the
    /// sentinel. Used both when the backend fails before the first chunk
    /// and when the transport drops mid-stream.
    pub fn failure_frames(&self, message: impl Into<String>) -> Vec<StreamFrame> {
        vec![
            StreamFrame::Error {
                error: StreamError {
                    message: message.into(),
                },
            },
            StreamFrame::Done,
        ]
    }

    /// Sentinel-only close, for a backend stream that ends cleanly
    /// without ever reporting `done`.
    pub fn close_frames(&self) -> Vec<StreamFrame> {
        vec![StreamFrame::Done]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, done: bool) -> GenerateResponse {
        GenerateResponse {
            response: text.to_string(),
            done,
            ..Default::default()
        }
    }

    fn chat_delta(frame: &StreamFrame) -> &ChatDeltaChoice {
        match frame {
            StreamFrame::Chat(chunk) => &chunk.choices[0],
            other => panic!("expected chat frame, got {:?}", other),
        }
    }

    #[test]
    fn test_completion_two_chunk_stream() {
        let mut transcoder =
            StreamTranscoder::new(EndpointKind::Completion, "m".to_string());

        let first = transcoder.transcode_chunk(chunk("Hel", false));
        assert_eq!(first.len(), 1);
        match &first[0] {
            StreamFrame::Completion(c) => {
                assert_eq!(c.choices[0].text, "Hel");
                assert_eq!(c.choices[0].finish_reason, None);
            }
            other => panic!("expected completion frame, got {:?}", other),
        }

        let last = transcoder.transcode_chunk(chunk("lo", true));
        assert_eq!(last.len(), 2);
        match &last[0] {
            StreamFrame::Completion(c) => {
                assert_eq!(c.choices[0].text, "lo");
                assert_eq!(c.choices[0].finish_reason.as_deref(), Some("stop"));
            }
            other => panic!("expected completion frame, got {:?}", other),
        }
        assert!(matches!(last[1], StreamFrame::Done));
    }

    #[test]
    fn test_chat_role_only_on_first_frame() {
        let mut transcoder = StreamTranscoder::new(EndpointKind::Chat, "m".to_string());

        let first = transcoder.transcode_chunk(chunk("Hel", false));
        let delta = chat_delta(&first[0]);
        assert_eq!(delta.delta.role.as_deref(), Some("assistant"));
        assert_eq!(delta.delta.content.as_deref(), Some("Hel"));
        assert_eq!(delta.finish_reason, None);

        let last = transcoder.transcode_chunk(chunk("lo", true));
        let delta = chat_delta(&last[0]);
        assert_eq!(delta.delta.role, None);
        assert_eq!(delta.delta.content.as_deref(), Some("lo"));
        assert_eq!(delta.finish_reason.as_deref(), Some("stop"));
        assert!(matches!(last[1], StreamFrame::Done));
    }

    #[test]
    fn test_chat_role_attaches_to_empty_first_fragment() {
        // "First frame" means first frame sent, not first non-empty text
        let mut transcoder = StreamTranscoder::new(EndpointKind::Chat, "m".to_string());

        let first = transcoder.transcode_chunk(chunk("", false));
        assert_eq!(
            chat_delta(&first[0]).delta.role.as_deref(),
            Some("assistant")
        );

        let second = transcoder.transcode_chunk(chunk("text", false));
        assert_eq!(chat_delta(&second[0]).delta.role, None);
    }

    #[test]
    fn test_failure_frames_are_error_then_done() {
        let transcoder = StreamTranscoder::new(EndpointKind::Chat, "m".to_string());

        let frames = transcoder.failure_frames("backend gone");
        assert_eq!(frames.len(), 2);
        match &frames[0] {
            StreamFrame::Error { error } => assert_eq!(error.message, "backend gone"),
            other => panic!("expected error frame, got {:?}", other),
        }
        assert!(matches!(frames[1], StreamFrame::Done));
    }

    #[test]
    fn test_close_frames_sentinel_only() {
        let transcoder = StreamTranscoder::new(EndpointKind::Completion, "m".to_string());
        let frames = transcoder.close_frames();
        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], StreamFrame::Done));
    }

    #[test]
    fn test_concurrent_calls_have_independent_role_state() {
        let mut a = StreamTranscoder::new(EndpointKind::Chat, "m".to_string());
        let mut b = StreamTranscoder::new(EndpointKind::Chat, "m".to_string());

        let _ = a.transcode_chunk(chunk("x", false));
        // A second call's first frame still carries the role
        let first_b = b.transcode_chunk(chunk("y", false));
        assert_eq!(
            chat_delta(&first_b[0]).delta.role.as_deref(),
            Some("assistant")
        );
    }
}
