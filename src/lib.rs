/*!
 * # articast
 *
 * A Rust library for turning saved articles into two-speaker podcast scripts
 * using AI text generation.
 *
 * ## Features
 *
 * - Fetch article content from URLs and strip it down to plain text
 * - Expand short source material with AI-researched supplementary content
 * - Generate a structured host/expert dialogue script via various providers:
 *   - Ollama (local LLM)
 *   - OpenAI-compatible APIs
 * - Parse freeform model output into a strictly alternating speaker script
 * - Normalize text for speech synthesis (stage directions, symbols, years)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Source document value type
 * - `text_normalizer`: TTS-safe text normalization
 * - `script_parser`: Speaker-tag parsing of model output into a `Script`
 * - `generation`: AI-powered script generation:
 *   - `generation::service`: Provider dispatch and timeout handling
 *   - `generation::prompts`: Prompt templates and builders
 *   - `generation::script_generator`: Document-to-script orchestration
 *   - `generation::expander`: Best-effort content expansion
 * - `fetcher`: Article fetching and HTML-to-text extraction
 * - `processing_guard`: Duplicate-processing prevention
 * - `app_controller`: Main pipeline controller
 * - `providers`: Client implementations for LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod fetcher;
pub mod generation;
pub mod processing_guard;
pub mod providers;
pub mod script_parser;
pub mod text_normalizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::Document;
pub use errors::{AppError, GenerationError, ProviderError};
pub use generation::{ContentExpander, GenerationService, ScriptGenerator, TextGenerator};
pub use processing_guard::ProcessingGuard;
pub use script_parser::{parse_script, DialogueSegment, Script, Speaker};
pub use text_normalizer::normalize;
