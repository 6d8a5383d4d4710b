//! Tolerant parsing of the model's analysis reply
//!
//! Models frequently wrap JSON in markdown fences or add a sentence before
//! or after it. Both are tolerated; anything that is still not an object of the
//! expected shape is an [`AnalysisError::Parse`].

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Analysis;

use crate::error::AnalysisError;

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?s)^```[A-Za-z]*[ \t]*\r?\n?(.*?)\s*```$").expect("valid fence regex");
}

/// Remove a surrounding markdown code fence, if any
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    match FENCED_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Parse a model reply into an [`Analysis`]
pub fn parse_analysis(reply: &str) -> Result<Analysis, AnalysisError> {
    let body = strip_code_fences(reply);

    let analysis = match parse_object(body) {
        Ok(analysis) => analysis,
        Err(first) => match outermost_object(body) {
            Some(object) if object.len() < body.len() => parse_object(object)?,
            Some(_) => return Err(first),
            None => {
                return Err(AnalysisError::Parse(
                    "reply does not contain a JSON object".to_string(),
                ))
            }
        },
    };

    if analysis.summary.trim().is_empty() {
        return Err(AnalysisError::Parse("summary is empty".to_string()));
    }

    Ok(analysis)
}

fn parse_object(body: &str) -> Result<Analysis, AnalysisError> {
    serde_json::from_str(body).map_err(|e| AnalysisError::Parse(e.to_string()))
}

/// Span from the first `{` to the last `}`
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
