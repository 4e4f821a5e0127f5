//! pairrank-ui - web UI for ranking item sets by pairwise comparison
//!
//! Loads every persisted set and ranking from the data directory into the
//! in-memory registry, then serves the HTML frontend.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;

use pairrank_common::config::resolve_data_dir;
use pairrank_ui::{build_router, AppState, Registry};

#[derive(Debug, Parser)]
#[command(name = "pairrank-ui", about = "Pairwise-comparison ranking web UI")]
struct Args {
    /// Data directory holding set-*.json and ranking-*.json files
    #[arg(long)]
    data_dir: Option<String>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5780")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting pairrank-ui v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_dir = resolve_data_dir(args.data_dir.as_deref());
    std::fs::create_dir_all(&data_dir)?;
    info!("Data directory: {}", data_dir.display());

    let registry = Registry::load(&data_dir)?;
    let state = AppState::new(Arc::new(registry));
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("pairrank-ui listening on http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
