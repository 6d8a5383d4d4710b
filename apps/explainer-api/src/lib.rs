//! Legal document explainer API
//!
//! Accepts PDF uploads, extracts their text, asks an LLM for a structured
//! plain-language analysis and answers follow-up questions about the
//! document. Documents live in memory only.
//!
//! ## Endpoints
//!
//! - `GET /` - service info
//! - `GET /health` - liveness and configuration summary
//! - `POST /upload-document` - multipart upload, returns the analysis
//! - `POST /chat` - question about a stored document
//! - `GET /document/:document_id` - stored document metadata

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub use config::Args;
pub use error::ServerError;
pub use state::AppState;
pub use store::{DocumentStore, StoredDocument};

use api::{
    handle_chat, handle_document_info, handle_health, handle_root, handle_upload_document,
};

/// Allowance for multipart boundaries and headers on top of the file itself
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with its middleware stack
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/upload-document", post(handle_upload_document))
        .route("/chat", post(handle_chat))
        .route("/document/:document_id", get(handle_document_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// CORS for the configured origins; a `*` entry allows any origin
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o.trim() == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin: {o}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}
