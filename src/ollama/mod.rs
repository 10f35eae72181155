// Ollama API client module

mod client;
pub mod streaming;

pub use client::OllamaClient;
