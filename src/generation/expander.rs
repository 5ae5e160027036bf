/*!
 * Best-effort expansion of short source material.
 *
 * Articles that are too short to carry an episode get one research pass that
 * appends background material to the document. Expansion is strictly
 * fail-soft: any provider error, timeout, or empty reply logs a warning and
 * the pipeline continues with the original document.
 */

use log::{debug, warn};
use std::time::Duration;

use crate::app_config::{GenerationConfig, PodcastConfig};
use crate::document::Document;
use crate::generation::prompts::build_research_prompt;
use crate::generation::service::{GenerationRequest, TextGenerator};

/// Expands short documents with AI-researched supplementary content
pub struct ContentExpander<G: TextGenerator> {
    generator: G,
    min_words: usize,
    target_words: usize,
    temperature: f32,
    max_output_tokens: u32,
    timeout: Duration,
}

impl<G: TextGenerator> ContentExpander<G> {
    /// Create an expander over the given backend and configuration
    pub fn new(generator: G, generation: &GenerationConfig, podcast: &PodcastConfig) -> Self {
        Self {
            generator,
            min_words: podcast.min_words_for_podcast,
            target_words: (podcast.target_minutes * podcast.words_per_minute) as usize,
            temperature: generation.temperature,
            max_output_tokens: generation.max_output_tokens,
            timeout: Duration::from_secs(generation.timeout_secs),
        }
    }

    /// Whether a document is short enough to need expansion
    pub fn needs_expansion(&self, document: &Document) -> bool {
        document.word_count < self.min_words
    }

    /// Expand a short document with researched background material.
    ///
    /// Total function: documents that are already long enough pass through
    /// untouched, and every failure mode returns the original document.
    pub async fn expand(&self, document: Document) -> Document {
        if !self.needs_expansion(&document) {
            return document;
        }

        debug!(
            "Expanding '{}' ({} words, below the {} word threshold)",
            document.title, document.word_count, self.min_words
        );

        let needed_words = self.target_words.saturating_sub(document.word_count);
        let (system, user) = build_research_prompt(&document, needed_words);
        let request = GenerationRequest::new(user)
            .system(system)
            .temperature(self.temperature)
            .max_output_tokens(self.max_output_tokens);

        let supplement = match tokio::time::timeout(self.timeout, self.generator.generate(request))
            .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Content expansion failed for '{}': {}", document.title, e);
                return document;
            }
            Err(_) => {
                warn!(
                    "Content expansion timed out for '{}' after {} seconds",
                    document.title,
                    self.timeout.as_secs()
                );
                return document;
            }
        };

        if supplement.trim().is_empty() {
            warn!("Content expansion returned nothing for '{}'", document.title);
            return document;
        }

        let expanded = document.with_research(supplement.trim());
        debug!(
            "Expanded '{}' from {} to {} words",
            expanded.title, document.word_count, expanded.word_count
        );
        expanded
    }
}
