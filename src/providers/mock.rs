/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged dialogue
 * - `MockProvider::untagged()` - Succeeds but omits speaker tags
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds with an empty reply
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The prompt sent to the provider
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The generated text
    pub text: String,
    /// Simulated prompt tokens
    pub prompt_tokens: Option<u64>,
    /// Simulated completion tokens
    pub completion_tokens: Option<u64>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a properly tagged two-speaker dialogue
    Working,
    /// Succeeds but returns prose with no speaker tags at all
    Untagged,
    /// Always fails with an error
    Failing,
    /// Returns an empty reply
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing generation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests seen so far
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that returns untagged prose
    pub fn untagged() -> Self {
        Self::new(MockBehavior::Untagged)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty replies
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that delays each reply
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// How many requests this provider (and its clones) have served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Generate a properly tagged two-speaker transcript with the given
    /// number of exchanges
    pub fn sample_transcript(exchanges: usize) -> String {
        let mut transcript = String::new();
        for i in 0..exchanges {
            transcript.push_str(&format!(
                "[HOST]: Welcome back, this is exchange number {} of our show today.\n\n",
                i + 1
            ));
            transcript.push_str(
                "[EXPERT]: Thanks for having me, there is a lot of ground to cover here.\n\n",
            );
        }
        transcript
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

impl MockProvider {
    fn reply_for(&self, request: &MockRequest) -> Result<String, ProviderError> {
        match self.behavior {
            MockBehavior::Working => {
                if let Some(generator) = self.custom_response {
                    Ok(generator(request))
                } else {
                    Ok(Self::sample_transcript(3))
                }
            }
            MockBehavior::Untagged => Ok(
                "The article discusses several developments without attributing \
                 any of them to a particular speaker."
                    .to_string(),
            ),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Slow { .. } => Ok(Self::sample_transcript(1)),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let MockBehavior::Slow { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }

        let text = self.reply_for(&request)?;
        let prompt_len = request.prompt.len() as u64;
        Ok(MockResponse {
            text,
            prompt_tokens: Some(prompt_len),
            completion_tokens: Some(prompt_len / 2),
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let response = self
            .complete(MockRequest {
                prompt: request.prompt,
            })
            .await?;
        Ok(response.text)
    }
}
