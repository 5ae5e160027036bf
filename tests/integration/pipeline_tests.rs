/*!
 * End-to-end pipeline tests with mocked collaborators
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use articast::app_config::Config;
use articast::app_controller::{
    Controller, EpisodeRecord, PodcastTask, SpeechSynthesizer, TaskBoard,
};
use articast::document::Document;
use articast::errors::AppError;
use articast::fetcher::DocumentFetcher;
use articast::providers::mock::MockProvider;
use articast::script_parser::DialogueSegment;
use articast::ProcessingGuard;

/// Serves canned article bodies by URL
struct FixtureFetcher {
    articles: HashMap<String, String>,
}

impl FixtureFetcher {
    fn new(articles: &[(&str, &str)]) -> Self {
        Self {
            articles: articles
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl DocumentFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, AppError> {
        self.articles
            .get(url)
            .map(|body| Document::new(format!("Article at {}", url), body.clone()))
            .ok_or_else(|| AppError::Fetch(format!("No article at {}", url)))
    }
}

/// Records every synthesized segment in call order
#[derive(Default)]
struct CollectingSynthesizer {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechSynthesizer for CollectingSynthesizer {
    async fn synthesize(&self, segment: &DialogueSegment) -> Result<String, AppError> {
        let mut calls = self.calls.lock();
        calls.push(segment.text.clone());
        Ok(format!("audio-{:03}", calls.len()))
    }
}

#[derive(Default)]
struct InMemoryBoard {
    pending: Vec<PodcastTask>,
    completed: Mutex<Vec<(String, EpisodeRecord)>>,
    failed: Mutex<Vec<(String, String)>>,
}

impl InMemoryBoard {
    fn with_pending(pending: Vec<PodcastTask>) -> Arc<Self> {
        Arc::new(Self {
            pending,
            ..Default::default()
        })
    }
}

#[async_trait]
impl TaskBoard for InMemoryBoard {
    async fn list_pending(&self) -> Result<Vec<PodcastTask>, AppError> {
        Ok(self.pending.clone())
    }

    async fn set_processing(&self, _task_id: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn set_complete(&self, task_id: &str, episode: &EpisodeRecord) -> Result<(), AppError> {
        self.completed
            .lock()
            .push((task_id.to_string(), episode.clone()));
        Ok(())
    }

    async fn set_error(&self, task_id: &str, message: &str) -> Result<(), AppError> {
        self.failed
            .lock()
            .push((task_id.to_string(), message.to_string()));
        Ok(())
    }
}

fn task(id: &str, url: &str) -> PodcastTask {
    PodcastTask {
        id: id.to_string(),
        url: url.to_string(),
    }
}

fn long_body() -> String {
    "substantial article content ".repeat(400)
}

#[tokio::test]
async fn test_pipeline_singleTask_shouldProduceOrderedEpisode() {
    let url = "https://example.test/article";
    let body = long_body();
    let board = InMemoryBoard::with_pending(vec![task("t1", url)]);
    let synthesizer = Arc::new(CollectingSynthesizer::default());
    let controller = Controller::new(
        FixtureFetcher::new(&[(url, body.as_str())]),
        MockProvider::working(),
        Arc::clone(&synthesizer),
        Arc::clone(&board),
        Arc::new(ProcessingGuard::new()),
        &Config::default(),
    );

    let completed = controller.process_pending().await.unwrap();
    assert_eq!(completed, 1);

    let completed_tasks = board.completed.lock();
    let (task_id, episode) = &completed_tasks[0];
    assert_eq!(task_id, "t1");
    assert_eq!(episode.source_url, url);
    assert!(episode.title.contains("example.test"));
    assert!(!episode.audio_refs.is_empty());

    // Audio artifacts are numbered in playback order
    for (i, audio_ref) in episode.audio_refs.iter().enumerate() {
        assert_eq!(audio_ref, &format!("audio-{:03}", i + 1));
    }
    assert_eq!(episode.audio_refs.len(), synthesizer.calls.lock().len());
}

#[tokio::test]
async fn test_pipeline_failingTask_shouldNotAffectRestOfBatch() {
    let ok_url = "https://example.test/good";
    let body = long_body();
    let board = InMemoryBoard::with_pending(vec![
        task("bad", "https://example.test/missing"),
        task("good", ok_url),
    ]);
    let controller = Controller::new(
        FixtureFetcher::new(&[(ok_url, body.as_str())]),
        MockProvider::working(),
        Arc::new(CollectingSynthesizer::default()),
        Arc::clone(&board),
        Arc::new(ProcessingGuard::new()),
        &Config::default(),
    );

    let completed = controller.process_pending().await.unwrap();
    assert_eq!(completed, 1);

    let failed = board.failed.lock();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "bad");
    assert!(failed[0].1.contains("No article"));

    let completed_tasks = board.completed.lock();
    assert_eq!(completed_tasks.len(), 1);
    assert_eq!(completed_tasks[0].0, "good");
}

#[tokio::test]
async fn test_pipeline_shortArticle_shouldBeExpandedBeforeGeneration() {
    let url = "https://example.test/short";
    let board = InMemoryBoard::with_pending(vec![task("t1", url)]);
    // Replies with research prose for the expansion prompt and a tagged
    // script for the generation prompt
    let provider = MockProvider::working().with_custom_response(|req| {
        if req.prompt.contains("too short to carry a full podcast episode") {
            "researched background material ".repeat(50)
        } else {
            assert!(
                req.prompt.contains("Additional Research"),
                "script prompt should see the expanded document"
            );
            MockProvider::sample_transcript(2)
        }
    });
    let controller = Controller::new(
        FixtureFetcher::new(&[(url, "a very short article body")]),
        provider,
        Arc::new(CollectingSynthesizer::default()),
        Arc::clone(&board),
        Arc::new(ProcessingGuard::new()),
        &Config::default(),
    );

    let completed = controller.process_pending().await.unwrap();
    assert_eq!(completed, 1);
    assert_eq!(board.completed.lock().len(), 1);
}

#[tokio::test]
async fn test_pipeline_inFlightTask_shouldBeSkipped() {
    let url = "https://example.test/article";
    let body = long_body();
    let board = InMemoryBoard::with_pending(vec![task("t1", url)]);
    let guard = Arc::new(ProcessingGuard::new());
    guard.try_acquire("t1");

    let controller = Controller::new(
        FixtureFetcher::new(&[(url, body.as_str())]),
        MockProvider::working(),
        Arc::new(CollectingSynthesizer::default()),
        Arc::clone(&board),
        Arc::clone(&guard),
        &Config::default(),
    );

    let completed = controller.process_pending().await.unwrap();
    assert_eq!(completed, 0);
    assert!(board.completed.lock().is_empty());
    assert!(board.failed.lock().is_empty());
}

#[tokio::test]
async fn test_pipeline_upstreamFailure_shouldRecordErrorAndReleaseGuard() {
    let url = "https://example.test/article";
    let body = long_body();
    let board = InMemoryBoard::with_pending(vec![task("t1", url)]);
    let guard = Arc::new(ProcessingGuard::new());
    let controller = Controller::new(
        FixtureFetcher::new(&[(url, body.as_str())]),
        MockProvider::failing(),
        Arc::new(CollectingSynthesizer::default()),
        Arc::clone(&board),
        Arc::clone(&guard),
        &Config::default(),
    );

    let completed = controller.process_pending().await.unwrap();
    assert_eq!(completed, 0);
    assert_eq!(board.failed.lock().len(), 1);
    assert_eq!(guard.in_flight_count(), 0);
}
