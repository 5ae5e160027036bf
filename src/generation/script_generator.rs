/*!
 * Document-to-script orchestration.
 *
 * `ScriptGenerator` owns the single generation call for an episode: it sizes
 * the word target from the configured duration, builds the prompt, runs the
 * provider under a timeout, and parses the reply into a `Script`. There is
 * deliberately no retry here; a failed episode surfaces as an error and the
 * caller decides whether to reschedule it.
 */

use log::{debug, info, warn};
use std::time::Duration;

use crate::app_config::{GenerationConfig, PodcastConfig};
use crate::document::Document;
use crate::errors::GenerationError;
use crate::generation::prompts::ScriptPromptBuilder;
use crate::generation::service::{GenerationRequest, TextGenerator};
use crate::script_parser::{parse_script, Script};

/// Generates podcast scripts from source documents
pub struct ScriptGenerator<G: TextGenerator> {
    generator: G,
    podcast: PodcastConfig,
    temperature: f32,
    max_output_tokens: u32,
    timeout: Duration,
}

impl<G: TextGenerator> ScriptGenerator<G> {
    /// Create a generator over the given backend and configuration
    pub fn new(generator: G, generation: &GenerationConfig, podcast: PodcastConfig) -> Self {
        Self {
            generator,
            podcast,
            temperature: generation.temperature,
            max_output_tokens: generation.max_output_tokens,
            timeout: Duration::from_secs(generation.timeout_secs),
        }
    }

    /// Word target for the configured episode length
    fn target_words(&self) -> usize {
        (self.podcast.target_minutes * self.podcast.words_per_minute) as usize
    }

    /// Generate a podcast script for the given document.
    ///
    /// One provider call, wrapped in the configured timeout. A reply that is
    /// empty or contains no recognizable dialogue is an upstream failure;
    /// nothing is retried.
    pub async fn generate_script(&self, document: &Document) -> Result<Script, GenerationError> {
        let target_words = self.target_words();
        let prompt_builder =
            ScriptPromptBuilder::new(document, self.podcast.max_source_chars, target_words);

        debug!(
            "Generating script for '{}' ({} source words, {} word target)",
            document.title, document.word_count, target_words
        );

        let request = GenerationRequest::new(prompt_builder.build())
            .system(prompt_builder.system_prompt())
            .temperature(self.temperature)
            .max_output_tokens(self.max_output_tokens);

        let raw_transcript = tokio::time::timeout(self.timeout, self.generator.generate(request))
            .await
            .map_err(|_| {
                GenerationError::Upstream(format!(
                    "Generation timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })??;

        if raw_transcript.trim().is_empty() {
            return Err(GenerationError::Upstream(
                "Generation service returned an empty reply".to_string(),
            ));
        }

        let script = parse_script(&raw_transcript, self.podcast.words_per_minute);
        if script.segments.is_empty() {
            warn!(
                "Reply for '{}' contained no recognizable dialogue ({} chars)",
                document.title,
                raw_transcript.len()
            );
            return Err(GenerationError::Upstream(
                "Reply contained no recognizable dialogue".to_string(),
            ));
        }

        info!(
            "Generated script for '{}': {} segments, {} words, ~{} min",
            document.title, script.segments.len(), script.total_words, script.estimated_minutes
        );
        Ok(script)
    }
}
