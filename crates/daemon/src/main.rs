use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use passdrop_core::{
    CountdownPresenter, DocumentStore, EntryStore, MemoryStore, StoreStats, sweep,
};
use passdrop_daemon::{DaemonConfig, HttpServer};
use passdrop_http::AppState;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Passdrop daemon - time-boxed credential sharing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("passdrop=debug,tower_http=debug")),
        )
        .init();

    // Load configuration if specified
    let config = match cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            DaemonConfig::from_file(&path)?
        }
        None => DaemonConfig::from_env()?,
    };

    // The persisted entry document, swept by the presenter
    let document_store = Arc::new(DocumentStore::new(config.storage.document_path()));
    info!(
        "Entry document at {}",
        document_store.path().display()
    );

    // Compact stale state left over from a previous run
    let outcome = sweep(document_store.as_ref(), Utc::now().timestamp_millis()).await?;
    info!(stats = ?StoreStats::summarize(&outcome.active), "entry document loaded");

    // Per-second countdown refresh and lazy expiry over the document
    let mut presenter = CountdownPresenter::new(document_store.clone());
    let mut changes = presenter.subscribe();
    presenter.start();

    // Log headline numbers whenever a sweep removes entries
    let stats_store = document_store.clone();
    let stats_task = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            if let Ok(entries) = stats_store.list().await {
                info!(stats = ?StoreStats::summarize(&entries), "active set changed");
            }
        }
    });

    // The mirrored API surface keeps its own in-process store, never
    // reconciled with the document store
    let api_state = AppState::new(Arc::new(MemoryStore::new()));
    let server = HttpServer::new(config.http.clone(), api_state);

    println!("Server running at: http://{}/", config.http.bind_addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.start().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    // Graceful shutdown
    presenter.shutdown();
    stats_task.abort();
    server_handle.abort();
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), server_handle).await;

    Ok(())
}
