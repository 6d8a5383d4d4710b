use async_trait::async_trait;

use crate::error::LlmError;

/// A text-in, text-out language model
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Send a single prompt and return the model's complete reply
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
