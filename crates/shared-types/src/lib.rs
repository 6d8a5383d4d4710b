//! Types shared between the explainer API server and its clients.
//!
//! - [`types`]: the stored document and its structured analysis
//! - [`chat`]: chat transcript messages
//! - [`api`]: request/response bodies exchanged over HTTP

pub mod api;
pub mod chat;
pub mod types;

pub use api::{
    ChatRequest, ChatResponse, DocumentInfo, ErrorBody, HealthResponse, ServiceInfo,
    UploadResponse,
};
pub use chat::{ChatMessage, ChatRole};
pub use types::{Analysis, Document, KeyClause, Obligation, Risk, RiskSeverity, UnusualTerm};
