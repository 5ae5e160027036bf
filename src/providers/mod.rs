/*!
 * Provider implementations for different text generation services.
 *
 * This module contains client implementations for the supported LLM
 * providers:
 * - Ollama: Local LLM server
 * - OpenAI: OpenAI-compatible chat completion APIs
 * - Mock: Deterministic provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably in the generation
/// service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

/// Pull generated text out of a loosely structured JSON reply.
///
/// Services wrap their reply text under different keys; the common ones are
/// tried in a fixed order and the first non-empty string wins.
pub(crate) fn extract_text_field(value: &serde_json::Value) -> Option<String> {
    for key in ["output", "result", "content"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

pub mod mock;
pub mod ollama;
pub mod openai;
