/*!
 * Provider dispatch for text generation.
 *
 * `TextGenerator` is the seam between the script pipeline and the concrete
 * provider clients. The pipeline only ever sees prompts in and plain text
 * out; which HTTP API serves the request is decided once, from
 * configuration, when the `GenerationService` is built.
 */

use async_trait::async_trait;

use crate::app_config::{GenerationConfig, GenerationProvider};
use crate::errors::{GenerationError, ProviderError};
use crate::providers::ollama::{Ollama, OllamaRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;

/// A provider-agnostic text generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user prompt
    pub prompt: String,

    /// Optional system prompt guiding the model
    pub system: Option<String>,

    /// Maximum tokens the model may produce
    pub max_output_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a request with the given prompt and default sampling settings
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_output_tokens: 8192,
            temperature: 0.7,
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the maximum number of output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Anything that can turn a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given request
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

// One configured service backs several pipeline stages
#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<G> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        (**self).generate(request).await
    }
}

/// The concrete provider client behind the service
enum Backend {
    Ollama(Ollama),
    OpenAI(OpenAI),
}

/// Configured text generation service dispatching to one provider
pub struct GenerationService {
    backend: Backend,
    model: String,
}

impl GenerationService {
    /// Build a service from configuration.
    ///
    /// Fails with `GenerationError::Configuration` when the selected
    /// provider requires credentials that are missing. No network traffic
    /// happens here.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let backend = match config.provider {
            GenerationProvider::Ollama => Backend::Ollama(Ollama::from_url(config.get_endpoint())),
            GenerationProvider::OpenAI => {
                if config.api_key.is_empty() {
                    return Err(GenerationError::Configuration(
                        "OpenAI provider requires an API key".to_string(),
                    ));
                }
                Backend::OpenAI(OpenAI::new(&config.api_key, config.get_endpoint()))
            }
        };
        Ok(Self {
            backend,
            model: config.get_model(),
        })
    }

    /// The model name requests are issued against
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check that the configured provider is reachable
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.backend {
            Backend::Ollama(client) => client.test_connection().await,
            Backend::OpenAI(client) => client.test_connection().await,
        }
    }
}

#[async_trait]
impl TextGenerator for GenerationService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        match &self.backend {
            Backend::Ollama(client) => {
                let mut provider_request = OllamaRequest::new(&self.model, request.prompt)
                    .temperature(request.temperature)
                    .max_tokens(request.max_output_tokens);
                if let Some(system) = request.system {
                    provider_request = provider_request.system(system);
                }
                let response = client.complete(provider_request).await?;
                Ok(Ollama::extract_text(&response))
            }
            Backend::OpenAI(client) => {
                let mut provider_request = OpenAIRequest::new(&self.model)
                    .temperature(request.temperature)
                    .max_tokens(request.max_output_tokens);
                if let Some(system) = request.system {
                    provider_request = provider_request.add_message("system", system);
                }
                provider_request = provider_request.add_message("user", request.prompt);
                let response = client.complete(provider_request).await?;
                Ok(OpenAI::extract_text(&response))
            }
        }
    }
}
