// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use articast::app_config::{Config, GenerationProvider, LogLevel};
use articast::fetcher::{ArticleFetcher, DocumentFetcher};
use articast::generation::{ContentExpander, GenerationService, ScriptGenerator};
use articast::script_parser::Script;

/// CLI wrapper for GenerationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationProvider {
    Ollama,
    OpenAI,
}

impl From<CliGenerationProvider> for GenerationProvider {
    fn from(cli_provider: CliGenerationProvider) -> Self {
        match cli_provider {
            CliGenerationProvider::Ollama => GenerationProvider::Ollama,
            CliGenerationProvider::OpenAI => GenerationProvider::OpenAI,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Output format for the generated script
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Readable speaker-tagged transcript
    Transcript,
    /// Full script structure as JSON
    Json,
}

/// articast - turn saved articles into two-speaker podcast scripts
///
/// Fetches an article, optionally expands short source material with an AI
/// research pass, generates a host/expert dialogue script with an LLM
/// provider, and emits a TTS-ready script.
#[derive(Parser, Debug)]
#[command(name = "articast")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered article-to-podcast script generator")]
#[command(long_about = "articast fetches an article and generates a two-speaker podcast script.

EXAMPLES:
    articast https://example.com/article            # Generate with default config
    articast -p openai -m gpt-4o-mini <URL>         # Use a specific provider and model
    articast --minutes 15 <URL>                     # Target a 15 minute episode
    articast --format json -o episode.json <URL>    # Write the script as JSON

CONFIGURATION:
    Configuration is stored in articast.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically.

SUPPORTED PROVIDERS:
    ollama  - Local Ollama server (default: llama3.2:3b)
    openai  - OpenAI-compatible API (requires API key)")]
struct CommandLineOptions {
    /// Article URL to turn into a podcast script
    #[arg(value_name = "URL")]
    url: String,

    /// Generation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliGenerationProvider>,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Target episode length in minutes
    #[arg(long)]
    minutes: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "articast.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Output format for the script
    #[arg(short, long, value_enum, default_value = "transcript")]
    format: OutputFormat,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Custom logger writing timestamped, colored lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Render the script as a readable speaker-tagged transcript
fn render_transcript(script: &Script) -> String {
    let mut out = String::new();
    for segment in &script.segments {
        out.push_str(&format!("{}: {}\n\n", segment.speaker, segment.text));
    }
    out.push_str(&format!(
        "-- {} words, about {} minutes\n",
        script.total_words, script.estimated_minutes
    ));
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default.
    // The level is updated after the config is loaded.
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let mut config = if Path::new(&options.config_path).exists() {
        Config::from_file(&options.config_path)
            .context(format!("Failed to load config file: {}", options.config_path))?
    } else {
        let config = Config::default();
        config
            .save(&options.config_path)
            .context(format!("Failed to write default config to {}", options.config_path))?;
        info!("Created default configuration at {}", options.config_path);
        config
    };

    // Command line overrides
    if let Some(provider) = options.provider {
        config.generation.provider = provider.into();
    }
    if let Some(model) = options.model {
        config.generation.model = model;
    }
    if let Some(minutes) = options.minutes {
        config.podcast.target_minutes = minutes;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(level_filter(&config.log_level));
    config.validate()?;

    info!(
        "Generating a ~{} minute script via {} ({})",
        config.podcast.target_minutes,
        config.generation.provider.display_name(),
        config.generation.get_model()
    );

    // One-shot pipeline: fetch, expand if short, generate
    let service = Arc::new(
        GenerationService::from_config(&config.generation).map_err(|e| anyhow!(e.to_string()))?,
    );

    let fetcher = ArticleFetcher::new();
    let document = fetcher
        .fetch(&options.url)
        .await
        .map_err(|e| anyhow!(e.to_string()))?;
    info!(
        "Fetched '{}' ({} words)",
        document.title, document.word_count
    );

    let expander = ContentExpander::new(Arc::clone(&service), &config.generation, &config.podcast);
    let document = expander.expand(document).await;

    let generator = ScriptGenerator::new(service, &config.generation, config.podcast.clone());
    let script = generator
        .generate_script(&document)
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    let rendered = match options.format {
        OutputFormat::Json => serde_json::to_string_pretty(&script)?,
        OutputFormat::Transcript => render_transcript(&script),
    };

    match options.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .context(format!("Failed to write script to {}", path.display()))?;
            info!("Script written to {}", path.display());
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}
