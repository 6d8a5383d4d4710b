//! API handlers for the explainer server
//!
//! Provides REST endpoints for:
//! - PDF upload and analysis
//! - Chat about an uploaded document
//! - Document metadata
//! - Health and service info

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use shared_pdf::{content_digest, looks_like_pdf};
use shared_types::{
    ChatRequest, ChatResponse, Document, DocumentInfo, HealthResponse, ServiceInfo,
    UploadResponse,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// Characters of document text included in [`DocumentInfo::text_preview`]
pub const PREVIEW_CHARS: usize = 200;

const SERVICE_NAME: &str = "explainer-api";

const ACCEPTED_CONTENT_TYPES: [&str; 3] =
    ["application/pdf", "application/x-pdf", "application/octet-stream"];

/// A file part pulled out of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Handler: GET /
pub async fn handle_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "AI Legal Document Explainer API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_configured: state.llm_configured(),
        documents_stored: state.store.len().await,
    })
}

/// Handler: POST /upload-document
///
/// Validates the upload, extracts its text, asks the model for an analysis
/// and only then stores the document. Any failure leaves the store untouched.
#[instrument(skip_all)]
pub async fn handle_upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServerError> {
    let upload = read_file_field(&mut multipart, state.max_upload_bytes).await?;
    let filename = validate_upload(&upload, state.max_upload_bytes)?;
    let requester = state.requester()?;

    let file_size = upload.bytes.len();
    let sha256 = content_digest(&upload.bytes);
    info!(%filename, file_size, "received upload");

    let extractor = state.extractor.clone();
    let bytes = upload.bytes;
    let extracted = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .map_err(|e| ServerError::Internal(format!("extraction task failed: {e}")))??;
    debug!(
        pages = extracted.page_count,
        chars = extracted.text_length(),
        "text extracted"
    );

    let analysis = requester.analyze(&extracted.text).await?;

    let document = Document::new(
        new_document_id(),
        filename,
        extracted.text,
        extracted.page_count,
        file_size,
        sha256,
    );
    let stored = state.store.insert(document, analysis).await;
    info!(document_id = %stored.document.id, "document analyzed and stored");

    Ok(Json(UploadResponse {
        document_id: stored.document.id.clone(),
        filename: stored.document.filename.clone(),
        text_length: stored.document.text_length,
        analysis: stored.analysis.clone(),
    }))
}

/// Handler: POST /chat
#[instrument(skip_all)]
pub async fn handle_chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(request) = request?;
    let question = request.message.trim();
    if question.is_empty() {
        return Err(ServerError::InvalidRequest(
            "Message must not be empty".to_string(),
        ));
    }

    let stored = state
        .store
        .get(&request.document_id)
        .await
        .ok_or_else(|| ServerError::DocumentNotFound(request.document_id.clone()))?;
    let requester = state.requester()?;
    debug!(document_id = %stored.document.id, "answering chat question");

    let answer = requester
        .answer_question(&stored.document.filename, &stored.document.text, question)
        .await?;

    Ok(Json(ChatResponse {
        response: answer,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Handler: GET /document/:document_id
pub async fn handle_document_info(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentInfo>, ServerError> {
    let stored = state
        .store
        .get(&document_id)
        .await
        .ok_or(ServerError::DocumentNotFound(document_id))?;
    let document = &stored.document;

    Ok(Json(DocumentInfo {
        document_id: document.id.clone(),
        filename: document.filename.clone(),
        uploaded_at: stored
            .uploaded_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        text_length: document.text_length,
        page_count: document.page_count,
        file_size: document.file_size,
        sha256: document.sha256.clone(),
        text_preview: document.preview(PREVIEW_CHARS),
    }))
}

/// `doc_` followed by 32 lowercase hex digits
pub fn new_document_id() -> String {
    format!("doc_{}", Uuid::new_v4().simple())
}

/// Pull the `file` part out of the form; other parts are ignored
async fn read_file_field(
    multipart: &mut Multipart,
    max_upload_bytes: usize,
) -> Result<UploadedFile, ServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_bytes))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_upload_bytes))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ServerError::InvalidRequest(
        "No file provided; expected a multipart field named \"file\"".to_string(),
    ))
}

fn multipart_error(err: MultipartError, max_upload_bytes: usize) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::FileTooLarge {
            limit_mb: limit_in_mb(max_upload_bytes),
        }
    } else {
        ServerError::InvalidRequest(err.body_text())
    }
}

fn limit_in_mb(bytes: usize) -> usize {
    bytes.div_ceil(1024 * 1024)
}

/// Check an upload before any extraction work, returning its filename
pub fn validate_upload(
    upload: &UploadedFile,
    max_upload_bytes: usize,
) -> Result<String, ServerError> {
    let filename = upload
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ServerError::InvalidFileType("Uploaded file has no name".to_string()))?;

    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ServerError::InvalidFileType(
            "Only PDF files are supported".to_string(),
        ));
    }

    if let Some(content_type) = upload.content_type.as_deref() {
        if !is_pdf_content_type(content_type) {
            return Err(ServerError::InvalidFileType(format!(
                "Unsupported content type {content_type}; only PDF files are supported"
            )));
        }
    }

    if upload.bytes.is_empty() {
        return Err(ServerError::EmptyFile);
    }

    if upload.bytes.len() > max_upload_bytes {
        return Err(ServerError::FileTooLarge {
            limit_mb: limit_in_mb(max_upload_bytes),
        });
    }

    if !looks_like_pdf(&upload.bytes) {
        return Err(ServerError::InvalidFileType(
            "File content is not a PDF".to_string(),
        ));
    }

    Ok(filename.to_string())
}

fn is_pdf_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ACCEPTED_CONTENT_TYPES.contains(&essence.as_str())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn upload(filename: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: filename.map(str::to_string),
            content_type: content_type.map(str::to_string),
            bytes: bytes.to_vec(),
        }
    }

    const PDF: &[u8] = b"%PDF-1.5\n...";

    #[test]
    fn test_accepts_pdf_variants() {
        for ct in [
            None,
            Some("application/pdf"),
            Some("Application/PDF; charset=binary"),
            Some("application/octet-stream"),
        ] {
            assert_eq!(
                validate_upload(&upload(Some("Lease.PDF"), ct, PDF), 1024).unwrap(),
                "Lease.PDF"
            );
        }
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let err = validate_upload(&upload(Some("lease.docx"), None, PDF), 1024).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_rejects_missing_filename() {
        let err = validate_upload(&upload(None, None, PDF), 1024).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_rejects_non_pdf_content_type() {
        let err =
            validate_upload(&upload(Some("a.pdf"), Some("text/plain"), PDF), 1024).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        let err = validate_upload(&upload(Some("a.pdf"), None, b""), 1024).unwrap_err();
        assert_eq!(err.code(), "EMPTY_FILE");

        let err = validate_upload(&upload(Some("a.pdf"), None, PDF), 4).unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
    }

    #[test]
    fn test_rejects_renamed_text_file() {
        let err =
            validate_upload(&upload(Some("a.pdf"), None, b"just some text"), 1024).unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_document_id_format() {
        let id = new_document_id();
        assert!(id.starts_with("doc_"));
        assert_eq!(id.len(), 36);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_limit_in_mb_rounds_up() {
        assert_eq!(limit_in_mb(10 * 1024 * 1024), 10);
        assert_eq!(limit_in_mb(1024), 1);
    }
}
