/*!
 * Unit tests for script generation and content expansion
 */

use articast::app_config::{GenerationConfig, GenerationProvider, PodcastConfig};
use articast::document::{Document, RESEARCH_DELIMITER};
use articast::errors::GenerationError;
use articast::generation::{ContentExpander, GenerationService, ScriptGenerator};
use articast::script_parser::Speaker;
use pretty_assertions::assert_eq;

use crate::common::mock_generators::{FailingGenerator, ScriptedGenerator};
use crate::common::messy_transcript;

fn source_document() -> Document {
    Document::new("The Test Article", "body text ".repeat(500))
}

#[tokio::test]
async fn test_generateScript_messyReply_shouldYieldCleanScript() {
    let generator = ScriptGenerator::new(
        ScriptedGenerator::new(messy_transcript()),
        &GenerationConfig::default(),
        PodcastConfig::default(),
    );

    let script = generator.generate_script(&source_document()).await.unwrap();

    assert_eq!(script.segments.len(), 5);
    assert_eq!(script.segments[0].speaker, Speaker::Host);
    for segment in &script.segments {
        assert!(!segment.text.contains('['));
        assert!(!segment.text.contains('&'));
    }
    assert!(script.total_words > 0);
}

#[tokio::test]
async fn test_generateScript_providerFailure_shouldReturnUpstreamError() {
    let generator = ScriptGenerator::new(
        FailingGenerator,
        &GenerationConfig::default(),
        PodcastConfig::default(),
    );

    let result = generator.generate_script(&source_document()).await;
    assert!(matches!(result, Err(GenerationError::Upstream(_))));
}

#[tokio::test]
async fn test_generateScript_blankReply_shouldReturnUpstreamError() {
    let generator = ScriptGenerator::new(
        ScriptedGenerator::new("   \n  "),
        &GenerationConfig::default(),
        PodcastConfig::default(),
    );

    let result = generator.generate_script(&source_document()).await;
    assert!(matches!(result, Err(GenerationError::Upstream(_))));
}

#[tokio::test]
async fn test_expand_failure_shouldReturnDocumentDeepEqual() {
    let expander = ContentExpander::new(
        FailingGenerator,
        &GenerationConfig::default(),
        &PodcastConfig::default(),
    );
    let document = Document::new("Short", "too short to carry an episode");
    let original = document.clone();

    let result = expander.expand(document).await;
    assert_eq!(result, original);
}

#[tokio::test]
async fn test_expand_success_shouldAppendDelimitedResearch() {
    let expander = ContentExpander::new(
        ScriptedGenerator::new("Supplementary research material for the episode."),
        &GenerationConfig::default(),
        &PodcastConfig::default(),
    );
    let document = Document::new("Short", "too short to carry an episode");

    let expanded = expander.expand(document).await;
    assert!(expanded.body.contains(RESEARCH_DELIMITER));
    assert!(expanded.word_count > 6);
}

#[tokio::test]
async fn test_expand_longDocument_shouldNotCallGenerator() {
    // A failing generator proves the call is skipped entirely
    let expander = ContentExpander::new(
        FailingGenerator,
        &GenerationConfig::default(),
        &PodcastConfig::default(),
    );
    let document = source_document();
    assert!(!expander.needs_expansion(&document));

    let original = document.clone();
    let result = expander.expand(document).await;
    assert_eq!(result, original);
}

#[test]
fn test_serviceFromConfig_openAiWithoutKey_shouldFailConfiguration() {
    let config = GenerationConfig {
        provider: GenerationProvider::OpenAI,
        ..Default::default()
    };

    let result = GenerationService::from_config(&config);
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn test_serviceFromConfig_ollama_shouldUseDefaultModel() {
    let service = GenerationService::from_config(&GenerationConfig::default()).unwrap();
    assert_eq!(service.model(), "llama3.2:3b");
}
