// CLI module for ollama2openai

use crate::config::AppConfig;
use clap::Parser;

/// ollama2openai - OpenAI-compatible API gateway for a local Ollama server
#[derive(Parser, Debug)]
#[command(name = "ollama2openai", version, about, long_about = None)]
pub struct Args {
    /// Address to bind the gateway to (overrides config)
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
