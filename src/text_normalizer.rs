/*!
 * TTS-safe text normalization.
 *
 * This module turns arbitrary dialogue text into text a speech synthesizer
 * can read aloud: stage directions and bracketed cues are stripped, symbol
 * tokens are spelled out, and four-digit years are verbalized. All functions
 * here are total; unrecognized patterns pass through unchanged.
 *
 * Rule order matters: bracket stripping runs first so the later free-text
 * rules never see content that was only an annotation.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Performance verb stems that mark stage directions rather than dialogue.
/// Matched with common verb suffixes (-s, -es, -ed, -ing).
const PERFORMANCE_VERB_STEMS: &[&str] = &[
    "laugh", "chuckle", "sigh", "smile", "nod", "grin", "shrug", "gesture", "lean", "point",
    "wave", "cough", "snort", "giggle", "beam", "wink", "raise",
];

/// Adverbs that commonly trail a performance verb in narrated asides.
const PERFORMANCE_ADVERBS: &[&str] = &[
    "softly",
    "loudly",
    "quietly",
    "gently",
    "warmly",
    "nervously",
    "slightly",
    "knowingly",
    "thoughtfully",
    "heartily",
    "awkwardly",
    "briefly",
];

fn verb_stem_alternation() -> String {
    // "clear throat" is the one multi-word stem and gets its own clause
    let stems = PERFORMANCE_VERB_STEMS.join("|");
    format!(
        "(?:(?:{})(?:s|es|ed|ing)?|clears?(?:\\s+(?:his|her|their))?\\s+throat)",
        stems
    )
}

fn adverb_alternation() -> String {
    PERFORMANCE_ADVERBS.join("|")
}

/// Anything in square brackets is a cue, never dialogue
static SQUARE_BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Asterisk-delimited actions like *laughs* or *long pause*
static ASTERISK_ACTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*[^*]*\*").unwrap());

/// Parenthetical whose entire content is a performance action,
/// e.g. "(laughs warmly)" or "(clears throat)"
static PAREN_ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\(\s*(?:he\s+|she\s+|they\s+)?{}(?:\s+\w+ly)?\s*[.!]?\s*\)",
        verb_stem_alternation()
    ))
    .unwrap()
});

/// Free-standing narration with an explicit pronoun, e.g. "she laughs softly,"
/// The trailing punctuation (or end of text) requirement keeps real dialogue
/// like "she points out that" intact.
static PRONOUN_ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:he|she|they)\s+{}(?:\s+(?:{}))?\s*(?:[,.!?]|$)",
        verb_stem_alternation(),
        adverb_alternation()
    ))
    .unwrap()
});

/// Free-standing verb+adverb narration without a pronoun, e.g. "laughs warmly."
static VERB_ADVERB_ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{}\s+(?:{})\b\s*[,.!?]?",
        verb_stem_alternation(),
        adverb_alternation()
    ))
    .unwrap()
});

/// Four-digit years a narrator would read as a year: 1400 through 2029
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(1[4-9]\d{2}|20[0-2]\d)\b").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const UNITS: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const TEENS: [&str; 10] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Speak a number 0-99; 0 yields the empty string
fn two_digit_words(n: u32) -> String {
    match n {
        0 => String::new(),
        1..=9 => UNITS[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        _ => {
            let tens = TENS[(n / 10) as usize];
            let units = n % 10;
            if units == 0 {
                tens.to_string()
            } else {
                format!("{}-{}", tens, UNITS[units as usize])
            }
        }
    }
}

/// Verbalize a year in 1400-2029 into its spoken form.
///
/// Years split into a century pair and a remainder: "1776" reads
/// "seventeen seventy-six", "1905" reads "nineteen oh five", "1700" reads
/// "seventeen hundred". The 2000s read "two thousand five" style through
/// 2009, then "twenty fifteen" style through 2029.
fn verbalize_year(year: u32) -> String {
    match year {
        2000 => "two thousand".to_string(),
        2001..=2009 => format!("two thousand {}", UNITS[(year - 2000) as usize]),
        2010..=2029 => format!("twenty {}", two_digit_words(year - 2000)),
        1400..=1999 => {
            let century = two_digit_words(year / 100);
            let remainder = year % 100;
            match remainder {
                0 => format!("{} hundred", century),
                1..=9 => format!("{} oh {}", century, UNITS[remainder as usize]),
                _ => format!("{} {}", century, two_digit_words(remainder)),
            }
        }
        // Outside the rewrite range; callers never pass these
        _ => year.to_string(),
    }
}

/// Normalize arbitrary dialogue text into TTS-safe text.
///
/// Applies, in order: square-bracket stripping, parenthetical and asterisk
/// stage-direction removal, free-standing action-phrase removal, year
/// verbalization, whitespace collapsing, and symbol/quote substitution.
/// Total function; idempotent.
pub fn normalize(raw: &str) -> String {
    // 1. Bracketed cues are purged wholesale
    let text = SQUARE_BRACKET_RE.replace_all(raw, "");

    // 2. Parenthetical and asterisk-delimited actions
    let text = PAREN_ACTION_RE.replace_all(&text, "");
    let text = ASTERISK_ACTION_RE.replace_all(&text, "");

    // 3. Free-standing narration; replaced with a space to avoid word fusion
    let text = PRONOUN_ACTION_RE.replace_all(&text, " ");
    let text = VERB_ADVERB_ACTION_RE.replace_all(&text, " ");

    // 4. Years
    let text = YEAR_RE.replace_all(&text, |caps: &regex::Captures| {
        let year: u32 = caps[1].parse().unwrap_or(0);
        verbalize_year(year)
    });

    // 5. Whitespace
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = text.trim();

    // 6. Symbols and quotes; recollapse so substitution never leaves
    //    doubled spaces behind
    let text = text
        .replace('&', " and ")
        .replace('$', " dollars ")
        .replace('%', " percent ")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"");

    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
