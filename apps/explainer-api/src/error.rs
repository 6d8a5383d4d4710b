//! Error types for the explainer API

use analysis_engine::AnalysisError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_pdf::ExtractError;
use shared_types::ErrorBody;
use thiserror::Error;
use tracing::{error, warn};

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("File exceeds the {limit_mb}MB upload limit")]
    FileTooLarge { limit_mb: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Document contains insufficient text ({chars} characters)")]
    EmptyDocument { chars: usize },

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Analysis reply could not be parsed: {0}")]
    AnalysisParseError(String),

    #[error("LLM provider error: {0}")]
    UpstreamProviderError(String),

    #[error("No LLM provider is configured")]
    ProviderNotConfigured,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidFileType(_)
            | ServerError::EmptyFile
            | ServerError::FileTooLarge { .. }
            | ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::EmptyDocument { .. }
            | ServerError::InvalidPdf(_)
            | ServerError::PasswordProtected => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::AnalysisParseError(_) | ServerError::UpstreamProviderError(_) => {
                StatusCode::BAD_GATEWAY
            }
            ServerError::ProviderNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            ServerError::EmptyFile => "EMPTY_FILE",
            ServerError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ServerError::InvalidRequest(_) => "INVALID_REQUEST",
            ServerError::EmptyDocument { .. } => "EMPTY_DOCUMENT",
            ServerError::InvalidPdf(_) => "INVALID_PDF",
            ServerError::PasswordProtected => "PASSWORD_PROTECTED",
            ServerError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            ServerError::AnalysisParseError(_) => "ANALYSIS_FAILED",
            ServerError::UpstreamProviderError(_) => "UPSTREAM_ERROR",
            ServerError::ProviderNotConfigured => "LLM_NOT_CONFIGURED",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the client
    fn public_message(&self) -> String {
        match self {
            ServerError::InvalidFileType(msg) => msg.clone(),
            ServerError::EmptyDocument { .. } => {
                "Could not extract enough text from the PDF. The document may be scanned or image-based."
                    .to_string()
            }
            ServerError::DocumentNotFound(_) => {
                "Document not found. It may have expired; please upload it again.".to_string()
            }
            ServerError::AnalysisParseError(_) => {
                "The document analysis could not be completed. Please try again.".to_string()
            }
            ServerError::UpstreamProviderError(_) => {
                "The AI service request failed. Please try again.".to_string()
            }
            ServerError::ProviderNotConfigured => {
                "The AI service is not configured on this server.".to_string()
            }
            ServerError::Internal(_) => "An internal error occurred.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        } else {
            warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.public_message(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for ServerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidPdf(msg) | ExtractError::ExtractionError(msg) => {
                ServerError::InvalidPdf(msg)
            }
            ExtractError::PasswordProtected => ServerError::PasswordProtected,
            ExtractError::EmptyDocument { chars } => ServerError::EmptyDocument { chars },
        }
    }
}

impl From<AnalysisError> for ServerError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Upstream(e) => ServerError::UpstreamProviderError(e.to_string()),
            AnalysisError::Parse(msg) => ServerError::AnalysisParseError(msg),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}
