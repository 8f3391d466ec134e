//! prefill-server - local blueprint graph endpoint

use anyhow::Context;
use clap::Parser;
use prefill_core::Config;
use prefill_server::AppState;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve a blueprint graph document over HTTP
#[derive(Parser)]
#[command(name = "prefill-server")]
#[command(about = "Serve a blueprint graph document for form prefill", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PREFILL_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address (overrides server.listen)
    #[arg(short, long, env = "PREFILL_LISTEN_ADDR")]
    listen: Option<String>,

    /// Graph document to serve (overrides server.graph_path)
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "PREFILL_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "PREFILL_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env_overrides();

    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    if let Some(graph) = cli.graph {
        config.server.graph_path = graph;
    }

    if !config.server.graph_path.exists() {
        tracing::warn!(
            "Graph document {} does not exist; requests will fail until it is created",
            config.server.graph_path.display()
        );
    }

    let state = AppState::new(config.server.graph_path.clone());
    prefill_server::serve(&config.server.listen, state, shutdown_signal()).await?;

    tracing::info!("Graph server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        }
    }
}
