// Request translation (OpenAI → Ollama)

use crate::models::ollama::GenerateRequest;
use crate::models::openai::{ChatMessage, ChatRequest, CompletionRequest};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Translate an OpenAI completion request into an Ollama generate request.
///
/// `temperature` and `max_tokens` move into the Ollama `options` block
/// (`max_tokens` is Ollama's `num_predict`); client-supplied `options`
/// entries pass through and are overridden by the top-level fields.
pub fn completion_to_generate(req: &CompletionRequest, default_model: &str) -> GenerateRequest {
    let model = req.model.clone().unwrap_or_else(|| default_model.to_string());
    debug!("Translating completion request for model: {}", model);

    GenerateRequest {
        model,
        prompt: req.prompt.clone(),
        stream: req.stream,
        options: build_options(&req.options, req.temperature, req.max_tokens),
        context: req.context.clone(),
    }
}

/// Translate an OpenAI chat request into an Ollama generate request.
///
/// Ollama's generate endpoint takes a single prompt, so the conversation
/// is flattened to one `"<role>: <content>"` line per message, in order.
pub fn chat_to_generate(req: &ChatRequest, default_model: &str) -> GenerateRequest {
    let model = req.model.clone().unwrap_or_else(|| default_model.to_string());
    debug!(
        "Translating chat request: model={}, messages={}",
        model,
        req.messages.len()
    );

    GenerateRequest {
        model,
        prompt: flatten_messages(&req.messages),
        stream: req.stream,
        options: build_options(&req.options, req.temperature, req.max_tokens),
        context: req.context.clone(),
    }
}

/// Flatten chat messages into a single prompt string, preserving order.
pub fn flatten_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Merge generation knobs into the Ollama options block.
fn build_options(
    base: &Map<String, Value>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
) -> Map<String, Value> {
    let mut options = base.clone();
    if let Some(temperature) = temperature {
        options.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(max_tokens) = max_tokens {
        options.insert("num_predict".to_string(), json!(max_tokens));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion_req(json: &str) -> CompletionRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_completion_field_mapping() {
        let req = completion_req(
            r#"{"prompt": "hi", "model": "m", "stream": false, "temperature": 0.5, "max_tokens": 5}"#,
        );

        let generate = completion_to_generate(&req, "default");

        assert_eq!(generate.model, "m");
        assert_eq!(generate.prompt, "hi");
        assert!(!generate.stream);
        assert_eq!(generate.options["temperature"], json!(0.5));
        assert_eq!(generate.options["num_predict"], json!(5));
    }

    #[test]
    fn test_completion_default_model() {
        let req = completion_req(r#"{"prompt": "hi"}"#);
        let generate = completion_to_generate(&req, "codellama");
        assert_eq!(generate.model, "codellama");
    }

    #[test]
    fn test_completion_omitted_knobs_stay_out_of_options() {
        let req = completion_req(r#"{"prompt": "hi", "model": "m"}"#);
        let generate = completion_to_generate(&req, "default");
        assert!(generate.options.is_empty());
        assert!(generate.context.is_none());
    }

    #[test]
    fn test_completion_context_passthrough() {
        let req = completion_req(r#"{"prompt": "hi", "model": "m", "context": [1, 2, 3]}"#);
        let generate = completion_to_generate(&req, "default");
        assert_eq!(generate.context, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_client_options_forwarded_and_overridden() {
        let req = completion_req(
            r#"{"prompt": "hi", "model": "m", "temperature": 0.9,
                "options": {"top_k": 40, "temperature": 0.1}}"#,
        );
        let generate = completion_to_generate(&req, "default");
        assert_eq!(generate.options["top_k"], json!(40));
        // Top-level temperature wins over the one inside options
        assert_eq!(generate.options["temperature"], json!(0.9));
    }

    #[test]
    fn test_flatten_preserves_order_and_format() {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: "be brief".to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            },
            ChatMessage {
                role: "assistant".to_string(),
                content: "hi".to_string(),
            },
        ];

        assert_eq!(
            flatten_messages(&messages),
            "system: be brief\nuser: hello\nassistant: hi"
        );
    }

    #[test]
    fn test_chat_to_generate_uses_flattened_prompt() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"model": "m", "messages": [
                {"role": "user", "content": "a"},
                {"role": "assistant", "content": "b"}
            ]}"#,
        )
        .unwrap();

        let generate = chat_to_generate(&req, "default");
        assert_eq!(generate.prompt, "user: a\nassistant: b");
    }
}
