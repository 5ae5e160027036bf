/*!
 * Pipeline orchestration for pending podcast tasks.
 *
 * The controller wires the stages for each task: claim it in the guard,
 * mark it processing, fetch the article, expand short source material,
 * generate the script, synthesize each segment, then record the outcome.
 * One task failing marks that task only; the rest of the batch continues.
 * The guard entry is released on every path.
 */

use async_trait::async_trait;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::Document;
use crate::errors::AppError;
use crate::fetcher::DocumentFetcher;
use crate::generation::{ContentExpander, ScriptGenerator, TextGenerator};
use crate::processing_guard::ProcessingGuard;
use crate::script_parser::{DialogueSegment, Script};

/// A saved article waiting to become an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastTask {
    /// Stable task identifier
    pub id: String,
    /// Source article URL
    pub url: String,
}

/// What a finished episode looks like to the task board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode title, taken from the source document
    pub title: String,
    /// Source article URL
    pub source_url: String,
    /// Synthesized audio artifact references, in playback order
    pub audio_refs: Vec<String>,
    /// Total spoken words in the script
    pub total_words: usize,
    /// Estimated episode length in minutes
    pub estimated_minutes: u32,
}

/// Tracks task lifecycle in whatever system holds the reading queue
#[async_trait]
pub trait TaskBoard: Send + Sync {
    /// Tasks waiting to be processed
    async fn list_pending(&self) -> Result<Vec<PodcastTask>, AppError>;

    /// Mark a task as currently being processed
    async fn set_processing(&self, task_id: &str) -> Result<(), AppError>;

    /// Mark a task as completed with its episode record
    async fn set_complete(&self, task_id: &str, episode: &EpisodeRecord) -> Result<(), AppError>;

    /// Mark a task as failed with an error message
    async fn set_error(&self, task_id: &str, message: &str) -> Result<(), AppError>;
}

/// Renders one dialogue segment to audio and returns an artifact reference
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize a segment. Callers preserve segment order as playback order.
    async fn synthesize(&self, segment: &DialogueSegment) -> Result<String, AppError>;
}

// Shared collaborators work through Arc handles
#[async_trait]
impl<T: TaskBoard + ?Sized> TaskBoard for Arc<T> {
    async fn list_pending(&self) -> Result<Vec<PodcastTask>, AppError> {
        (**self).list_pending().await
    }

    async fn set_processing(&self, task_id: &str) -> Result<(), AppError> {
        (**self).set_processing(task_id).await
    }

    async fn set_complete(&self, task_id: &str, episode: &EpisodeRecord) -> Result<(), AppError> {
        (**self).set_complete(task_id, episode).await
    }

    async fn set_error(&self, task_id: &str, message: &str) -> Result<(), AppError> {
        (**self).set_error(task_id, message).await
    }
}

#[async_trait]
impl<T: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Arc<T> {
    async fn synthesize(&self, segment: &DialogueSegment) -> Result<String, AppError> {
        (**self).synthesize(segment).await
    }
}

/// Orchestrates the fetch-expand-generate-synthesize pipeline
pub struct Controller<F, G, S, B>
where
    F: DocumentFetcher,
    G: TextGenerator + Clone,
    S: SpeechSynthesizer,
    B: TaskBoard,
{
    fetcher: F,
    expander: ContentExpander<G>,
    script_generator: ScriptGenerator<G>,
    synthesizer: S,
    board: B,
    guard: Arc<ProcessingGuard>,
}

impl<F, G, S, B> Controller<F, G, S, B>
where
    F: DocumentFetcher,
    G: TextGenerator + Clone,
    S: SpeechSynthesizer,
    B: TaskBoard,
{
    /// Wire a controller from its collaborators and configuration
    pub fn new(
        fetcher: F,
        generator: G,
        synthesizer: S,
        board: B,
        guard: Arc<ProcessingGuard>,
        config: &Config,
    ) -> Self {
        Self {
            fetcher,
            expander: ContentExpander::new(generator.clone(), &config.generation, &config.podcast),
            script_generator: ScriptGenerator::new(
                generator,
                &config.generation,
                config.podcast.clone(),
            ),
            synthesizer,
            board,
            guard,
        }
    }

    /// Process every pending task on the board. Per-task failures are
    /// recorded on the board and do not stop the batch.
    pub async fn process_pending(&self) -> Result<usize, AppError> {
        let tasks = self.board.list_pending().await?;
        info!("Processing {} pending task(s)", tasks.len());

        let mut completed = 0;
        for task in &tasks {
            if self.process_task(task).await {
                completed += 1;
            }
        }
        Ok(completed)
    }

    /// Process one task end to end. Returns whether it completed.
    pub async fn process_task(&self, task: &PodcastTask) -> bool {
        if !self.guard.try_acquire(&task.id) {
            debug!("Task {} is already in flight, skipping", task.id);
            return false;
        }

        let outcome = self.run_pipeline(task).await;
        self.guard.release(&task.id);

        match outcome {
            Ok(episode) => {
                info!(
                    "Task {} complete: '{}' ({} segments of audio)",
                    task.id,
                    episode.title,
                    episode.audio_refs.len()
                );
                if let Err(e) = self.board.set_complete(&task.id, &episode).await {
                    error!("Failed to record completion of task {}: {}", task.id, e);
                    return false;
                }
                true
            }
            Err(e) => {
                error!("Task {} failed: {}", task.id, e);
                if let Err(board_err) = self.board.set_error(&task.id, &e.to_string()).await {
                    error!("Failed to record failure of task {}: {}", task.id, board_err);
                }
                false
            }
        }
    }

    async fn run_pipeline(&self, task: &PodcastTask) -> Result<EpisodeRecord, AppError> {
        self.board.set_processing(&task.id).await?;

        let document = self.fetcher.fetch(&task.url).await?;
        let document = self.maybe_expand(document).await;

        let script = self
            .script_generator
            .generate_script(&document)
            .await
            .map_err(AppError::Generation)?;

        let audio_refs = self.synthesize_segments(&script).await?;

        Ok(EpisodeRecord {
            title: document.title,
            source_url: task.url.clone(),
            audio_refs,
            total_words: script.total_words,
            estimated_minutes: script.estimated_minutes,
        })
    }

    async fn maybe_expand(&self, document: Document) -> Document {
        if self.expander.needs_expansion(&document) {
            self.expander.expand(document).await
        } else {
            document
        }
    }

    async fn synthesize_segments(&self, script: &Script) -> Result<Vec<String>, AppError> {
        let mut audio_refs = Vec::with_capacity(script.segments.len());
        for segment in &script.segments {
            audio_refs.push(self.synthesizer.synthesize(segment).await?);
        }
        Ok(audio_refs)
    }
}
