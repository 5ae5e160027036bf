/*!
 * AI-powered podcast script generation.
 *
 * This module contains the functionality to turn a source document into a
 * two-speaker podcast script using external LLM services:
 * - `service`: Provider dispatch behind the `TextGenerator` trait
 * - `prompts`: Prompt templates and builders
 * - `script_generator`: Document-to-script orchestration with timeouts
 * - `expander`: Best-effort expansion of short source material
 */

pub mod expander;
pub mod prompts;
pub mod script_generator;
pub mod service;

pub use expander::ContentExpander;
pub use script_generator::ScriptGenerator;
pub use service::{GenerationRequest, GenerationService, TextGenerator};
