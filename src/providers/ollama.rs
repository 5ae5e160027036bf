use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{extract_text_field, Provider};

/// Ollama client for interacting with a local Ollama server
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaResponse {
    /// Model name
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

/// Builder methods for OllamaRequest
impl OllamaRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        let options = self.options.get_or_insert(OllamaOptions {
            temperature: None,
            num_predict: None,
        });
        options.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        let options = self.options.get_or_insert(OllamaOptions {
            temperature: None,
            num_predict: None,
        });
        options.num_predict = Some(max_tokens);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(600))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Recover a usable response from a reply that did not parse as the
    /// expected shape. Streaming servers return JSONL; other frontends wrap
    /// the text under a different key.
    fn parse_lenient(response_text: &str) -> Result<OllamaResponse, ProviderError> {
        // JSONL streaming body: concatenate the per-line response pieces
        let lines: Vec<&str> = response_text.lines().filter(|l| !l.is_empty()).collect();
        if lines.len() > 1 {
            let mut full_response = String::new();
            let mut model = String::from("unknown");
            for line in &lines {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(line) {
                    if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
                        full_response.push_str(part);
                    }
                    if let Some(m) = value.get("model").and_then(|v| v.as_str()) {
                        model = m.to_string();
                    }
                }
            }
            if !full_response.is_empty() {
                return Ok(OllamaResponse {
                    model,
                    response: full_response,
                    done: true,
                    prompt_eval_count: None,
                    eval_count: None,
                });
            }
        }

        // Single object with the text under a nonstandard key
        let value: serde_json::Value = serde_json::from_str(response_text).map_err(|e| {
            ProviderError::ParseError(format!("Response contains invalid JSON: {}", e))
        })?;
        let text = value
            .get("response")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .or_else(|| extract_text_field(&value))
            .ok_or_else(|| {
                ProviderError::ParseError("No generated text found in response".to_string())
            })?;

        Ok(OllamaResponse {
            model: value
                .get("model")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            response: text,
            done: value.get("done").and_then(|v| v.as_bool()).unwrap_or(true),
            prompt_eval_count: value.get("prompt_eval_count").and_then(|v| v.as_u64()),
            eval_count: value.get("eval_count").and_then(|v| v.as_u64()),
        })
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = OllamaRequest;
    type Response = OllamaResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to read Ollama response body: {}", e))
        })?;

        match serde_json::from_str::<OllamaResponse>(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                error!(
                    "Failed to parse Ollama API response: {}. Raw response (first 500 chars): {}",
                    e,
                    response_text.chars().take(500).collect::<String>()
                );
                Self::parse_lenient(&response_text)
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach Ollama: {}", e)))?
            .error_for_status()
            .map_err(|e| ProviderError::ConnectionError(format!("Ollama version check: {}", e)))?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone()
    }
}
