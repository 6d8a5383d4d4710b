use std::sync::Arc;

use analysis_engine::{AnalysisRequester, GeminiConfig, GeminiProvider};
use shared_pdf::PdfExtractor;
use tracing::warn;

use crate::config::Args;
use crate::error::ServerError;
use crate::store::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub extractor: PdfExtractor,
    pub max_upload_bytes: usize,
    requester: Option<AnalysisRequester>,
}

impl AppState {
    pub fn new(
        store: DocumentStore,
        extractor: PdfExtractor,
        requester: Option<AnalysisRequester>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            extractor,
            max_upload_bytes,
            requester,
        }
    }

    /// Build the state from parsed arguments. A missing API key leaves the
    /// server running with upload and chat disabled.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let requester = match args.api_key() {
            Some(key) => {
                let config = GeminiConfig::new(key)
                    .with_model(args.gemini_model.as_str())
                    .with_base_url(args.gemini_base_url.as_str())
                    .with_timeout(args.llm_timeout());
                let provider = GeminiProvider::new(config)?;
                Some(
                    AnalysisRequester::new(Arc::new(provider))
                        .with_max_prompt_chars(args.max_prompt_chars),
                )
            }
            None => {
                warn!("GEMINI_API_KEY is not set; upload and chat will return 503");
                None
            }
        };

        Ok(Self::new(
            DocumentStore::new(args.document_ttl(), args.max_documents),
            PdfExtractor::new(args.min_text_chars),
            requester,
            args.max_upload_bytes(),
        ))
    }

    pub fn llm_configured(&self) -> bool {
        self.requester.is_some()
    }

    pub fn requester(&self) -> Result<&AnalysisRequester, ServerError> {
        self.requester
            .as_ref()
            .ok_or(ServerError::ProviderNotConfigured)
    }
}
