// Translation module - OpenAI ↔ Ollama schema translation

pub mod request;
pub mod response;
pub mod streaming;

pub use request::{chat_to_generate, completion_to_generate, flatten_messages};
pub use response::{generate_to_chat, generate_to_completion};
pub use streaming::{EndpointKind, StreamTranscoder};
