//! Scripted LLM provider for tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::provider::LlmProvider;

type Responder = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

/// Provider whose replies are computed from the prompt by a closure.
/// Every prompt it receives is recorded.
pub struct ScriptedProvider {
    respond: Box<Responder>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(respond: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the same text to every prompt
    pub fn always(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Fail every call with the error built by `make`
    pub fn failing(make: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::new(move |_| Err(make()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        (self.respond)(prompt)
    }
}
