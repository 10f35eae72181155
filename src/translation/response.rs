// Response translation (Ollama → OpenAI)

use crate::models::ollama::GenerateResponse;
use crate::models::openai::{
    ChatChoice, ChatMessage, ChatResponse, CompletionChoice, CompletionResponse, Usage,
};
use tracing::debug;

/// Translate a blocking Ollama generate response into an OpenAI
/// completion response.
pub fn generate_to_completion(resp: GenerateResponse, model: &str) -> CompletionResponse {
    debug!("Translating generate response to completion format");

    let usage = extract_usage(&resp);
    CompletionResponse {
        id: format!("cmpl-{}", uuid::Uuid::new_v4().simple()),
        object: "text_completion".to_string(),
        created: chrono::Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![CompletionChoice {
            text: resp.response,
            index: 0,
            finish_reason: Some(finish_reason(resp.done).to_string()),
        }],
        usage,
    }
}

/// Translate a blocking Ollama generate response into an OpenAI chat
/// completion response.
pub fn generate_to_chat(resp: GenerateResponse, model: &str) -> ChatResponse {
    debug!("Translating generate response to chat format");

    let usage = extract_usage(&resp);
    ChatResponse {
        id: format!("chatcmpl-{}", uuid::Uuid::new_v4().simple()),
        object: "chat.completion".to_string(),
        created: chrono::Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content: resp.response,
            },
            finish_reason: Some(finish_reason(resp.done).to_string()),
        }],
        usage,
    }
}

/// Map Ollama completion state to an OpenAI finish reason.
///
/// A `done` response ran to its natural stop; an unfinished one hit the
/// generation cap.
pub fn finish_reason(done: bool) -> &'static str {
    if done {
        "stop"
    } else {
        "length"
    }
}

/// Accumulate usage from the backend's final token counters. Missing
/// counters are treated as zero.
fn extract_usage(resp: &GenerateResponse) -> Usage {
    Usage::new(
        resp.prompt_eval_count.unwrap_or(0),
        resp.eval_count.unwrap_or(0),
    )
}
