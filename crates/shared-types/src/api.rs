//! HTTP request and response bodies

use serde::{Deserialize, Serialize};

use crate::types::Analysis;

/// Response to `POST /upload-document`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub filename: String,
    pub text_length: usize,
    pub analysis: Analysis,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub document_id: String,
}

/// Response to `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// RFC 3339
    pub timestamp: String,
}

/// Response to `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub llm_configured: bool,
    pub documents_stored: usize,
}

/// Response to `GET /document/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub document_id: String,
    pub filename: String,
    pub uploaded_at: String,
    pub text_length: usize,
    pub page_count: usize,
    pub file_size: usize,
    pub sha256: String,
    pub text_preview: String,
}

/// Response to `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}
