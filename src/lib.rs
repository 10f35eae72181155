// ollama2openai - OpenAI-compatible API gateway for a local Ollama server

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod ollama;
pub mod server;
pub mod translation;
pub mod utils;
