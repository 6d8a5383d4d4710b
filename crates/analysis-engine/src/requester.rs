//! Analysis and chat requests against an [`LlmProvider`]

use std::sync::Arc;

use shared_types::Analysis;
use tracing::{info, instrument, warn};

use crate::error::{AnalysisError, LlmError};
use crate::parse::parse_analysis;
use crate::prompt::{analysis_prompt, chat_prompt, DEFAULT_MAX_PROMPT_CHARS};
use crate::provider::LlmProvider;

/// Builds prompts, calls the model and interprets its replies.
///
/// Cheap to clone; the provider is shared.
#[derive(Clone)]
pub struct AnalysisRequester {
    provider: Arc<dyn LlmProvider>,
    max_prompt_chars: usize,
}

impl AnalysisRequester {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    pub fn with_max_prompt_chars(mut self, max_prompt_chars: usize) -> Self {
        self.max_prompt_chars = max_prompt_chars;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the model for a structured analysis of `text`.
    ///
    /// No retries: a failed call or an unparsable reply is returned as-is.
    #[instrument(skip_all, fields(provider = self.provider.name(), text_chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let prompt = analysis_prompt(text, self.max_prompt_chars);
        let reply = self.provider.generate(&prompt).await?;

        match parse_analysis(&reply) {
            Ok(analysis) => {
                info!(
                    key_clauses = analysis.key_clauses.len(),
                    obligations = analysis.obligations.len(),
                    risks = analysis.risks.len(),
                    unusual_terms = analysis.unusual_terms.len(),
                    "analysis parsed"
                );
                Ok(analysis)
            }
            Err(e) => {
                let head: String = reply.chars().take(500).collect();
                warn!(error = %e, reply_head = %head, "model reply was not a valid analysis");
                Err(e)
            }
        }
    }

    /// Answer `question` from the document text only
    #[instrument(skip_all, fields(provider = self.provider.name(), filename = %filename))]
    pub async fn answer_question(
        &self,
        filename: &str,
        text: &str,
        question: &str,
    ) -> Result<String, AnalysisError> {
        let prompt = chat_prompt(filename, text, question, self.max_prompt_chars);
        let reply = self.provider.generate(&prompt).await?;
        let answer = reply.trim();

        if answer.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }

        info!(answer_chars = answer.chars().count(), "chat answer generated");
        Ok(answer.to_string())
    }
}
