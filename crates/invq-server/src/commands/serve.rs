//! Serve command - run the HTTP service.

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use invq_core::PdfDocumentExtractor;
use invq_datastore::{DatastoreConfig, RestDatastore};
use invq_server::{AppState, router};

use super::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides server.bind)
    #[arg(short, long)]
    bind: Option<String>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // Fail before binding when credentials are missing
    let datastore_config =
        DatastoreConfig::from_env().context("datastore is not configured")?;
    info!("Using datastore at {}", datastore_config.url());

    let extractor = PdfDocumentExtractor::new(config.pdf.clone())?;
    let state = AppState::new(RestDatastore::new(datastore_config), extractor);
    let app = router(state);

    let bind = args.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    println!(
        "{} invq {} listening on {}",
        style("✓").green(),
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
