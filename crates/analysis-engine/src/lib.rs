//! Legal document analysis backed by a large language model
//!
//! - [`provider`]: the [`LlmProvider`] seam and its error type
//! - [`gemini`]: Google Gemini `generateContent` client
//! - [`prompt`]: analysis and chat prompt construction
//! - [`parse`]: tolerant parsing of the model's analysis reply
//! - [`requester`]: [`AnalysisRequester`], tying the above together

pub mod error;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod requester;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{AnalysisError, LlmError};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use parse::parse_analysis;
pub use provider::LlmProvider;
pub use requester::AnalysisRequester;
