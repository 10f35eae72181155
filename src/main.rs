// ollama2openai - OpenAI-compatible API gateway for a local Ollama server

use anyhow::Result;
use clap::Parser;
use ollama2openai::cli::Args;
use ollama2openai::config::AppConfig;
use ollama2openai::ollama::OllamaClient;
use ollama2openai::server::create_router;
use ollama2openai::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting ollama2openai v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the runtime with the configured worker count
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 4: Build Ollama client
    info!("Ollama backend: {}", config.ollama.api_base_url);
    let client = OllamaClient::new(&config.ollama)?;

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
