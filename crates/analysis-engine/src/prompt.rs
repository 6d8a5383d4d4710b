//! Prompt construction

/// Longest document excerpt sent to the model, in characters
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 25_000;

/// JSON skeleton the model is asked to fill in
const ANALYSIS_SCHEMA: &str = r#"{
  "summary": "Brief explanation of the document's purpose and main points",
  "key_clauses": [
    {"clause": "Clause name", "explanation": "Simple explanation", "location": "Section reference"}
  ],
  "obligations": [
    {"party": "Who", "obligation": "What they must do", "consequence": "Result of non-compliance"}
  ],
  "risks": [
    {"type": "Financial", "severity": "High", "description": "Risk description"}
  ],
  "unusual_terms": [
    {"term": "Term name", "explanation": "Why unusual", "recommendation": "What to do"}
  ]
}"#;

/// First `max_chars` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn analysis_prompt(text: &str, max_chars: usize) -> String {
    let excerpt = truncate_chars(text, max_chars);
    format!(
        "You are a legal document analyzer. Analyze this document and respond with ONLY valid JSON in the exact format specified.\n\
         \n\
         Document Text:\n\
         {excerpt}\n\
         \n\
         Respond with valid JSON only (no markdown, no explanations). \
         Use \"Low\", \"Medium\", \"High\" or \"Critical\" for severity. \
         Use empty arrays when a category does not apply.\n\
         {ANALYSIS_SCHEMA}\n"
    )
}

pub fn chat_prompt(filename: &str, text: &str, question: &str, max_chars: usize) -> String {
    let excerpt = truncate_chars(text, max_chars);
    format!(
        "You are analyzing a legal document named \"{filename}\". Answer the following question about it.\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer clearly and concisely using only the document content above. \
         If the document does not address the question, say so instead of guessing.\n"
    )
}
