//! Command-line and environment configuration

use std::time::Duration;

use clap::Parser;

/// Command-line arguments for the explainer API server
#[derive(Parser, Debug, Clone)]
#[command(name = "explainer-api")]
#[command(about = "Legal document explainer API: PDF analysis and document chat")]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "EXPLAINER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "EXPLAINER_PORT", default_value = "8000")]
    pub port: u16,

    /// Gemini API key; upload and chat are disabled without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = analysis_engine::gemini::DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = analysis_engine::gemini::DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// LLM request timeout in seconds
    #[arg(long, default_value = "60")]
    pub llm_timeout_secs: u64,

    /// Largest accepted upload in megabytes
    #[arg(long, default_value = "10")]
    pub max_upload_mb: usize,

    /// Fewest extracted characters accepted as a readable document
    #[arg(long, default_value = "50")]
    pub min_text_chars: usize,

    /// Longest document excerpt sent to the model, in characters
    #[arg(long, default_value = "25000")]
    pub max_prompt_chars: usize,

    /// Seconds a document stays available after upload (0 = until evicted)
    #[arg(long, default_value = "86400")]
    pub document_ttl_secs: u64,

    /// Most documents held in memory at once
    #[arg(long, default_value = "500")]
    pub max_documents: usize,

    /// Seconds between sweeps for expired documents
    #[arg(long, default_value = "60")]
    pub sweep_interval_secs: u64,

    /// Comma-separated CORS origins; `*` allows any
    #[arg(
        long,
        env = "EXPLAINER_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The API key, if set to something non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn document_ttl(&self) -> Option<Duration> {
        (self.document_ttl_secs > 0).then(|| Duration::from_secs(self.document_ttl_secs))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
