// Schema translation tests

use ollama2openai::models::ollama::GenerateResponse;
use ollama2openai::models::openai::{ChatMessage, ChatRequest, CompletionRequest, Usage};
use ollama2openai::translation::{
    chat_to_generate, completion_to_generate, flatten_messages, generate_to_chat,
    generate_to_completion,
};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_completion_round_trip_field_mapping() {
    let req: CompletionRequest = serde_json::from_value(json!({
        "model": "m",
        "prompt": "hi",
        "stream": false,
        "max_tokens": 5
    }))
    .unwrap();

    let generate = completion_to_generate(&req, "default");
    assert_eq!(generate.model, "m");
    assert_eq!(generate.prompt, "hi");
    assert_eq!(generate.options["num_predict"], json!(5));

    let backend = GenerateResponse {
        response: "hello".to_string(),
        done: true,
        prompt_eval_count: Some(1),
        eval_count: Some(1),
        context: None,
    };

    let completion = generate_to_completion(backend, &generate.model);
    assert_eq!(completion.choices[0].text, "hello");
    assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(completion.usage, Usage::new(1, 1));
    assert_eq!(completion.usage.total_tokens, 2);
}

#[test]
fn test_chat_flattening_one_line_per_message() {
    let req: ChatRequest = serde_json::from_value(json!({
        "model": "m",
        "messages": [
            {"role": "system", "content": "You are a helpful assistant."},
            {"role": "user", "content": "How do I list files?"}
        ]
    }))
    .unwrap();

    let generate = chat_to_generate(&req, "default");
    assert_eq!(
        generate.prompt,
        "system: You are a helpful assistant.\nuser: How do I list files?"
    );
}

#[test]
fn test_chat_response_wraps_assistant_message() {
    let backend = GenerateResponse {
        response: "Use ls.".to_string(),
        done: true,
        prompt_eval_count: Some(10),
        eval_count: Some(3),
        context: None,
    };

    let chat = generate_to_chat(backend, "m");
    assert_eq!(chat.object, "chat.completion");
    assert_eq!(chat.choices[0].message.role, "assistant");
    assert_eq!(chat.choices[0].message.content, "Use ls.");
    assert_eq!(chat.usage.total_tokens, 13);
}

#[test]
fn test_ids_are_unique_per_call() {
    let backend = || GenerateResponse {
        response: "x".to_string(),
        done: true,
        ..Default::default()
    };

    let a = generate_to_completion(backend(), "m");
    let b = generate_to_completion(backend(), "m");
    assert_ne!(a.id, b.id);
    assert!(a.id.starts_with("cmpl-"));
}

proptest! {
    // Flattening preserves message order for arbitrary conversations
    #[test]
    fn flatten_preserves_message_order(contents in proptest::collection::vec("[a-z ]{1,16}", 1..8)) {
        let messages: Vec<ChatMessage> = contents
            .iter()
            .map(|content| ChatMessage {
                role: "user".to_string(),
                content: content.clone(),
            })
            .collect();

        let flat = flatten_messages(&messages);
        let lines: Vec<&str> = flat.split('\n').collect();

        prop_assert_eq!(lines.len(), messages.len());
        for (line, msg) in lines.iter().zip(&messages) {
            let expected = format!("user: {}", msg.content);
            prop_assert_eq!(*line, expected.as_str());
        }
    }
}
