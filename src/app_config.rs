use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Generation service config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Podcast shaping config
    #[serde(default)]
    pub podcast: PodcastConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Ollama (local LLM server)
    #[default]
    Ollama,
    /// OpenAI-compatible chat completion API
    OpenAI,
}

impl GenerationProvider {
    /// Capitalized provider name for display
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
        }
    }
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Generation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider to use for text generation
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Model name; empty means the provider default
    #[serde(default = "String::new")]
    pub model: String,

    /// API key (required for remote providers)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL; empty means the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens the model may produce per request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Timeout for a single generation call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Get the configured model, falling back to the provider default
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }
        match self.provider {
            GenerationProvider::Ollama => default_ollama_model(),
            GenerationProvider::OpenAI => default_openai_model(),
        }
    }

    /// Get the configured endpoint, falling back to the provider default
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        match self.provider {
            GenerationProvider::Ollama => default_ollama_endpoint(),
            GenerationProvider::OpenAI => default_openai_endpoint(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for podcast shaping and parsing thresholds
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PodcastConfig {
    /// Assumed spoken words per minute, used for duration estimates
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Target episode length in minutes
    #[serde(default = "default_target_minutes")]
    pub target_minutes: u32,

    /// Documents below this word count get a content-expansion pass
    #[serde(default = "default_min_words_for_podcast")]
    pub min_words_for_podcast: usize,

    /// Character budget for the source excerpt embedded in prompts
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            target_minutes: default_target_minutes(),
            min_words_for_podcast: default_min_words_for_podcast(),
            max_source_chars: default_max_source_chars(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_words_per_minute() -> u32 {
    150
}

fn default_target_minutes() -> u32 {
    10
}

fn default_min_words_for_podcast() -> usize {
    800
}

fn default_max_source_chars() -> usize {
    12_000
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| anyhow!("Invalid config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content).map_err(|e| {
            anyhow!(
                "Failed to write config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.podcast.words_per_minute == 0 {
            return Err(anyhow!("words_per_minute must be greater than zero"));
        }
        if self.podcast.target_minutes == 0 {
            return Err(anyhow!("target_minutes must be greater than zero"));
        }
        if self.podcast.max_source_chars == 0 {
            return Err(anyhow!("max_source_chars must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(anyhow!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            ));
        }
        // API key is required for remote providers only
        if self.generation.provider == GenerationProvider::OpenAI
            && self.generation.api_key.is_empty()
        {
            return Err(anyhow!("Generation API key is required for OpenAI provider"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generation: GenerationConfig::default(),
            podcast: PodcastConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
