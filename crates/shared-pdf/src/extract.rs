//! PDF text extraction
//!
//! # Example
//! ```no_run
//! use shared_pdf::{ExtractError, PdfExtractor};
//!
//! fn extract(pdf_bytes: &[u8]) -> Result<(), ExtractError> {
//!     let document = PdfExtractor::default().extract(pdf_bytes)?;
//!     println!("Extracted {} pages", document.page_count);
//!     println!("Total text length: {}", document.text_length());
//!     Ok(())
//! }
//! ```

use std::panic::{self, AssertUnwindSafe};

use pdf_extract::extract_text_from_mem;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::ExtractError;

/// Minimum trimmed text length accepted by [`PdfExtractor::default`]
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Fewer non-whitespace characters than this means an image-only scan
const MIN_NON_WHITESPACE_CHARS: usize = 20;

/// PDF header marker; readers accept it anywhere in the first 1024 bytes
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_HEADER_WINDOW: usize = 1024;

/// Text extractor for uploaded PDFs
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    min_text_chars: usize,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TEXT_CHARS)
    }
}

impl PdfExtractor {
    pub fn new(min_text_chars: usize) -> Self {
        Self { min_text_chars }
    }

    /// Extract the text of every page.
    ///
    /// The returned text is normalised (trailing whitespace stripped from each
    /// line, runs of blank lines collapsed, outer whitespace trimmed).
    ///
    /// # Errors
    /// - `ExtractError::InvalidPdf` - malformed bytes, or the PDF library panicked
    /// - `ExtractError::PasswordProtected` - the PDF is encrypted
    /// - `ExtractError::EmptyDocument` - too little text, e.g. a scanned image PDF
    /// - `ExtractError::ExtractionError` - any other extraction failure
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
        if !looks_like_pdf(pdf_bytes) {
            return Err(ExtractError::InvalidPdf("missing %PDF- header".to_string()));
        }

        let page_count = Self::count_pages(pdf_bytes)?;
        debug!(page_count, "PDF structure loaded");

        let raw_text = catch_library_panic(|| extract_text_from_mem(pdf_bytes))?
            .map_err(|e| classify_library_error(&e.to_string()))?;

        let pages = Self::split_pages(&raw_text);
        let text = normalize_text(&raw_text);
        let chars = text.chars().count();
        let non_whitespace = text.chars().filter(|c| !c.is_whitespace()).count();

        info!(
            page_count,
            pages_with_text = pages.len(),
            chars,
            "extracted PDF text"
        );

        if chars < self.min_text_chars || non_whitespace < MIN_NON_WHITESPACE_CHARS {
            warn!(chars, non_whitespace, "insufficient text extracted");
            return Err(ExtractError::EmptyDocument { chars });
        }

        Ok(ExtractedDocument {
            text,
            pages,
            page_count,
        })
    }

    fn count_pages(pdf_bytes: &[u8]) -> Result<usize, ExtractError> {
        // pdf-extract re-exports Document from lopdf
        let document = catch_library_panic(|| pdf_extract::Document::load_mem(pdf_bytes))?
            .map_err(|e| classify_library_error(&e.to_string()))?;

        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(ExtractError::PasswordProtected);
        }

        Ok(document.get_pages().len())
    }

    /// Split raw extractor output into pages on form feeds, dropping empty ones
    fn split_pages(raw_text: &str) -> Vec<PageContent> {
        raw_text
            .split('\x0C')
            .enumerate()
            .filter(|(_, page)| !page.trim().is_empty())
            .map(|(idx, page)| PageContent {
                page_number: idx + 1,
                text: normalize_text(page),
            })
            .collect()
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Normalised text of the whole document
    pub text: String,

    /// Pages that carried text, 1-indexed
    pub pages: Vec<PageContent>,

    /// Pages in the PDF page tree, including ones without text
    pub page_count: usize,
}

impl ExtractedDocument {
    /// Length of [`Self::text`] in characters
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Whether the bytes carry a PDF header
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}

/// Lowercase hex SHA-256 of the uploaded bytes
pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// pdf-extract panics on some malformed inputs; report those as invalid PDFs
fn catch_library_panic<T>(f: impl FnOnce() -> T) -> Result<T, ExtractError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "PDF parser panicked".to_string());
        warn!(%message, "PDF library panicked");
        ExtractError::InvalidPdf(message)
    })
}

fn classify_library_error(message: &str) -> ExtractError {
    let lower = message.to_lowercase();

    if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
        return ExtractError::PasswordProtected;
    }

    if lower.contains("invalid")
        || lower.contains("malformed")
        || lower.contains("corrupt")
        || lower.contains("parse")
        || lower.contains("xref")
        || lower.contains("trailer")
        || lower.contains("header")
    {
        return ExtractError::InvalidPdf(message.to_string());
    }

    ExtractError::ExtractionError(message.to_string())
}

/// Strip trailing whitespace per line and collapse runs of blank lines to one
fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
    }

    out.trim().to_string()
}
