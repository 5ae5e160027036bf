/*!
 * Common test utilities for the articast test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Re-export the mock generators module
pub mod mock_generators;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A model reply with all the formatting sins the parser has to survive:
/// name prefixes, lowercase tags, stage directions, annotations, and a
/// too-short fragment.
pub fn messy_transcript() -> String {
    r#"Here is your podcast script:

[HOST]: Alex: Welcome back to the show, everyone. Today we're looking at what happened in 2024.

[Intro music fades]

[expert] Thanks for having me. *laughs* The story really starts back in 1776, believe it or not.

HOST: Wait, seriously? (chuckles warmly) Tell me more about that.

Sarah: The short version is that a 100% increase in funding & a few bold decisions changed everything.
It cost about $50 million in 2005 dollars.

[HOST]: Wow.

dr. sarah: Exactly. she laughs softly, It surprised everyone.
"#
    .to_string()
}

/// A clean, well-formed reply with exactly the requested word volume split
/// over two speakers
pub fn transcript_with_words(total_words: usize) -> String {
    let half = total_words / 2;
    format!(
        "[HOST]: {}\n[EXPERT]: {}\n",
        "word ".repeat(half).trim(),
        "word ".repeat(total_words - half).trim()
    )
}
