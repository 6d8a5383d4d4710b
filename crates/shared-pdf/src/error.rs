use thiserror::Error;

/// Errors that can occur while extracting text from a PDF
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("Document contains insufficient text ({chars} characters extracted); it may be image-based or scanned")]
    EmptyDocument { chars: usize },

    #[error("PDF extraction failed: {0}")]
    ExtractionError(String),
}
