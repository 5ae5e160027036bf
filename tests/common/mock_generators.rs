/*!
 * Mock text generators for driving the generation pipeline in tests.
 */

use async_trait::async_trait;

use articast::errors::ProviderError;
use articast::generation::{GenerationRequest, TextGenerator};

/// Replies with a fixed script regardless of the prompt
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    reply: String,
}

impl ScriptedGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}

/// Always fails, for exercising error paths
#[derive(Debug, Clone)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ProviderError> {
        Err(ProviderError::ApiError {
            status_code: 503,
            message: "service unavailable".to_string(),
        })
    }
}
