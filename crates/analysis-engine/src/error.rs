use thiserror::Error;

/// Failure talking to the LLM provider
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("prompt blocked by provider: {0}")]
    Blocked(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

/// Failure producing an analysis or chat answer
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("LLM provider error: {0}")]
    Upstream(#[from] LlmError),

    #[error("could not parse analysis reply: {0}")]
    Parse(String),
}
