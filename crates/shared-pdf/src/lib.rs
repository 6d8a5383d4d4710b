//! Shared PDF handling utilities
//!
//! Turns uploaded PDF bytes into plain text for analysis. The heavy lifting is
//! done by `pdf-extract`; this crate adds input sniffing, page accounting,
//! scanned-document detection and error classification.

pub mod error;
pub mod extract;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use error::ExtractError;
pub use extract::{content_digest, looks_like_pdf, ExtractedDocument, PageContent, PdfExtractor};
