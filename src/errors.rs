/*!
 * Error types for the articast application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a generation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider replied, but no text could be extracted from the reply
    #[error("Empty or unreadable reply: {0}")]
    EmptyReply(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while generating a podcast script.
///
/// The two failure strategies the pipeline distinguishes are visible here:
/// `Configuration` and `Upstream` are hard failures that propagate to the
/// caller. Content expansion swallows its upstream errors instead (see
/// `generation::expander`), so they never surface through this type.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A required credential or setting is missing; fatal to the current run
    #[error("Missing configuration: {0}")]
    Configuration(String),

    /// The generation service failed, timed out, or returned an unusable reply
    #[error("Generation service failure: {0}")]
    Upstream(String),

    /// Reserved for a future strict parsing mode; parsing currently degrades
    /// gracefully instead of rejecting input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ProviderError> for GenerationError {
    fn from(error: ProviderError) -> Self {
        Self::Upstream(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from script generation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Error while fetching a source document
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
