//! Form server binary
//!
//! Run with: cargo run -p rag-citations --bin rag-citations-server

use clap::Parser;
use rag_citations::{config::RagConfig, server::RagServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Document Q&A form with source citations
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_citations=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.cohere.model);
    tracing::info!("  - Endpoint: {}", config.cohere.base_url);
    tracing::info!("  - Connectors: {:?}", config.cohere.connectors);
    tracing::info!("  - Ground on uploads: {}", config.cohere.ground_on_uploads);

    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  Form:   http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API:    http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
