//! Legal document explainer API server
//!
//! Serves PDF upload/analysis and document chat over HTTP. Configuration
//! comes from flags, environment variables and an optional `.env` file.

use std::net::SocketAddr;

use clap::Parser;
use explainer_api::{build_router, cors_layer, AppState, Args};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting explainer API on {}:{}", args.host, args.port);

    let state = AppState::from_args(&args)?;
    let _sweeper = state.store.spawn_sweeper(args.sweep_interval());
    let cors = cors_layer(&args.allowed_origins)?;
    let app = build_router(state, cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Upload limit: {}MB", args.max_upload_mb);
    match args.document_ttl() {
        Some(ttl) => info!(
            "Documents expire after {}s, at most {} kept",
            ttl.as_secs(),
            args.max_documents
        ),
        None => info!("Documents never expire, at most {} kept", args.max_documents),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
