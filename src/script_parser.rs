/*!
 * Speaker-tag parsing of freeform model output.
 *
 * Language models do not reliably follow the requested `[HOST]`/`[EXPERT]`
 * tag format: they prefix speaker names, vary capitalization, and interleave
 * asides. The parser here is liberal in what it accepts for tag recognition
 * and strict in what it emits — only `Host`/`Expert` speakers, only
 * normalized TTS-safe text. It never fails; unparseable input degrades to an
 * empty segment list.
 *
 * The scan is an explicit finite-state pass over lines (no speaker yet,
 * inside a host turn, inside an expert turn) so the acceptance rules stay
 * auditable in one place.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::count_words;
use crate::text_normalizer::normalize;

/// Proper-name aliases the model may use in place of the HOST tag.
/// These track the character names used in the generation prompt.
const HOST_ALIASES: &[&str] = &["host", "alex"];

/// Proper-name aliases the model may use in place of the EXPERT tag.
const EXPERT_ALIASES: &[&str] = &["expert", "sarah", "dr. sarah", "dr sarah"];

/// Segments whose raw text is shorter than this are treated as noise
/// (stray punctuation, orphaned tag fragments), not dialogue.
const MIN_RAW_SEGMENT_CHARS: usize = 10;

/// A bracketed tag line, e.g. "[HOST]: text" or "[Expert]"
static BRACKET_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*([^\]]+?)\s*\]\s*:?\s*(.*)$").unwrap());

/// A name-colon tag line, e.g. "HOST: text" or "Dr. Sarah: text"
static COLON_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z. ]{0,30}?)\s*:\s*(.*)$").unwrap());

/// A line that is nothing but a bracketed annotation
static BRACKET_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]$").unwrap());

/// One of the two podcast voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Speaker {
    Host,
    Expert,
}

impl Speaker {
    /// Uppercase tag form used in prompts and display
    pub fn tag(&self) -> &'static str {
        match self {
            Speaker::Host => "HOST",
            Speaker::Expert => "EXPERT",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One speaker's contiguous spoken text, already normalized for TTS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSegment {
    /// Who speaks this segment
    pub speaker: Speaker,

    /// Normalized, non-empty, TTS-safe text
    pub text: String,
}

/// An ordered two-speaker script with derived duration statistics.
/// Segment order is playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Dialogue segments in playback order
    pub segments: Vec<DialogueSegment>,

    /// Sum of whitespace-delimited tokens across all segments
    pub total_words: usize,

    /// Estimated spoken duration in minutes at the configured pace
    pub estimated_minutes: u32,
}

impl Script {
    /// Build a script from finished segments, computing derived statistics
    pub fn from_segments(segments: Vec<DialogueSegment>, words_per_minute: u32) -> Self {
        let total_words: usize = segments.iter().map(|s| count_words(&s.text)).sum();
        let wpm = words_per_minute.max(1);
        let estimated_minutes = (total_words as f64 / wpm as f64).round() as u32;
        Script {
            segments,
            total_words,
            estimated_minutes,
        }
    }

    /// An empty script
    pub fn empty() -> Self {
        Script {
            segments: Vec::new(),
            total_words: 0,
            estimated_minutes: 0,
        }
    }
}

/// Scanner state: which speaker's turn the cursor is inside, if any
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    NoSpeaker,
    InHost,
    InExpert,
}

impl ScanState {
    fn speaker(self) -> Option<Speaker> {
        match self {
            ScanState::NoSpeaker => None,
            ScanState::InHost => Some(Speaker::Host),
            ScanState::InExpert => Some(Speaker::Expert),
        }
    }

    fn for_speaker(speaker: Speaker) -> Self {
        match speaker {
            Speaker::Host => ScanState::InHost,
            Speaker::Expert => ScanState::InExpert,
        }
    }
}

/// Lowercase a tag name and collapse internal runs of whitespace
fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn speaker_for_name(name: &str) -> Option<Speaker> {
    let canonical = canonical_name(name);
    if HOST_ALIASES.contains(&canonical.as_str()) {
        Some(Speaker::Host)
    } else if EXPERT_ALIASES.contains(&canonical.as_str()) {
        Some(Speaker::Expert)
    } else {
        None
    }
}

/// Try to read a trimmed line as a speaker-tag line. Returns the speaker and
/// the inline remainder with any repeated name prefix already stripped.
fn match_speaker_tag(line: &str) -> Option<(Speaker, String)> {
    let (speaker, remainder) = if let Some(caps) = BRACKET_TAG_RE.captures(line) {
        let speaker = speaker_for_name(&caps[1])?;
        (speaker, caps[2].to_string())
    } else if let Some(caps) = COLON_TAG_RE.captures(line) {
        let speaker = speaker_for_name(&caps[1])?;
        (speaker, caps[2].to_string())
    } else {
        return None;
    };

    Some((speaker, strip_name_prefix(&remainder)))
}

/// A tag line may itself start with a proper name and colon ("[HOST]: Alex:
/// Welcome back") which must not leak into the spoken text.
fn strip_name_prefix(text: &str) -> String {
    let mut current = text.trim().to_string();
    while let Some(caps) = COLON_TAG_RE.captures(&current) {
        if speaker_for_name(&caps[1]).is_none() {
            break;
        }
        current = caps[2].trim().to_string();
    }
    current
}

/// Parse a raw model transcript into a two-speaker script.
///
/// Total function: malformed input yields a script with no segments rather
/// than an error. Segment text is normalized via `text_normalizer::normalize`
/// and raw segments under the minimum content threshold are dropped as noise.
pub fn parse_script(raw_transcript: &str, words_per_minute: u32) -> Script {
    let mut state = ScanState::NoSpeaker;
    let mut buffer: Vec<String> = Vec::new();
    let mut raw_segments: Vec<(Speaker, String)> = Vec::new();

    let mut flush = |state: ScanState, buffer: &mut Vec<String>| {
        if let Some(speaker) = state.speaker() {
            if !buffer.is_empty() {
                raw_segments.push((speaker, buffer.join(" ")));
            }
        }
        buffer.clear();
    };

    for line in raw_transcript.lines() {
        let trimmed = line.trim();

        // Blank lines do not terminate a turn
        if trimmed.is_empty() {
            continue;
        }

        if let Some((speaker, inline)) = match_speaker_tag(trimmed) {
            flush(state, &mut buffer);
            state = ScanState::for_speaker(speaker);
            if !inline.is_empty() {
                buffer.push(inline);
            }
            continue;
        }

        // Whole-line annotations are cues, not dialogue
        if BRACKET_ONLY_RE.is_match(trimmed) {
            continue;
        }

        if state != ScanState::NoSpeaker {
            buffer.push(trimmed.to_string());
        }
    }
    flush(state, &mut buffer);

    let segments: Vec<DialogueSegment> = raw_segments
        .into_iter()
        .filter(|(_, raw)| raw.chars().count() >= MIN_RAW_SEGMENT_CHARS)
        .filter_map(|(speaker, raw)| {
            let text = normalize(&raw);
            if text.is_empty() {
                None
            } else {
                Some(DialogueSegment { speaker, text })
            }
        })
        .collect();

    Script::from_segments(segments, words_per_minute)
}
