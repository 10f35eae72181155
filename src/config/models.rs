//! Configuration data structures for the gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream Ollama connection, and logging.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Ollama API settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the Axum server.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the upstream Ollama API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL for the Ollama HTTP API.
    /// Default: `http://localhost:11434`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Generation model to use when a request omits `model`.
    /// Default: `codellama`
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Embedding model to use when an embeddings request omits `model`.
    /// Default: `bge-m3`
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Connection and request timeout in seconds for blocking calls.
    /// Streaming calls are only bound by the connect timeout.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty` or `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_model: default_model(),
            embedding_model: default_embedding_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_api_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "codellama".to_string()
}

fn default_embedding_model() -> String {
    "bge-m3".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
