/*!
 * Unit tests for speaker-tag parsing
 */

use articast::script_parser::{parse_script, Speaker};
use pretty_assertions::assert_eq;

use crate::common::{messy_transcript, transcript_with_words};

const WPM: u32 = 150;

#[test]
fn test_parseScript_taggedDialogue_shouldPreserveOrder() {
    let raw = "[HOST]: First segment of dialogue here.\n\
               [EXPERT]: Second segment of dialogue here.\n\
               [HOST]: Third segment of dialogue here.\n";
    let script = parse_script(raw, WPM);

    let speakers: Vec<Speaker> = script.segments.iter().map(|s| s.speaker).collect();
    assert_eq!(speakers, vec![Speaker::Host, Speaker::Expert, Speaker::Host]);
    assert!(script.segments[0].text.contains("First"));
    assert!(script.segments[1].text.contains("Second"));
    assert!(script.segments[2].text.contains("Third"));
}

#[test]
fn test_parseScript_aliasAndCaseVariants_shouldAllResolve() {
    let raw = "alex: The host speaking through a name alias.\n\
               Dr. Sarah: The expert speaking through a name alias.\n\
               [expert] Lowercase bracket tag for the expert.\n\
               HOST: Plain uppercase colon tag.\n";
    let script = parse_script(raw, WPM);

    let speakers: Vec<Speaker> = script.segments.iter().map(|s| s.speaker).collect();
    assert_eq!(
        speakers,
        vec![Speaker::Host, Speaker::Expert, Speaker::Expert, Speaker::Host]
    );
}

#[test]
fn test_parseScript_unknownSpeakerText_shouldBeIgnored() {
    let raw = "Here is your podcast script:\n\
               Narrator: This voice does not exist in the format.\n\
               [HOST]: Only this line counts as dialogue.\n";
    let script = parse_script(raw, WPM);

    assert_eq!(script.segments.len(), 1);
    assert_eq!(script.segments[0].speaker, Speaker::Host);
}

#[test]
fn test_parseScript_multiLineTurn_shouldJoinWithSpaces() {
    let raw = "[EXPERT]: The first line of a longer turn\n\
               continues on a second line\n\
               and a third one.\n";
    let script = parse_script(raw, WPM);

    assert_eq!(script.segments.len(), 1);
    assert_eq!(
        script.segments[0].text,
        "The first line of a longer turn continues on a second line and a third one."
    );
}

#[test]
fn test_parseScript_blankLines_shouldNotEndTurn() {
    let raw = "[HOST]: Part one of the turn.\n\n\nPart two of the same turn.\n";
    let script = parse_script(raw, WPM);

    assert_eq!(script.segments.len(), 1);
    assert!(script.segments[0].text.contains("Part one"));
    assert!(script.segments[0].text.contains("Part two"));
}

#[test]
fn test_parseScript_shortSegments_shouldBeDropped() {
    let raw = "[HOST]: Wow.\n[EXPERT]: This reply is long enough to survive the filter.\n";
    let script = parse_script(raw, WPM);

    assert_eq!(script.segments.len(), 1);
    assert_eq!(script.segments[0].speaker, Speaker::Expert);
}

#[test]
fn test_parseScript_annotationOnlyLines_shouldBeDropped() {
    let raw = "[HOST]: Dialogue before the sound cue.\n\
               [Intro music fades]\n\
               Dialogue after the sound cue.\n";
    let script = parse_script(raw, WPM);

    assert_eq!(script.segments.len(), 1);
    assert!(!script.segments[0].text.contains("music"));
    assert!(script.segments[0].text.contains("before"));
    assert!(script.segments[0].text.contains("after"));
}

#[test]
fn test_parseScript_segmentText_shouldBeNormalized() {
    let script = parse_script(&messy_transcript(), WPM);

    for segment in &script.segments {
        assert!(!segment.text.is_empty());
        assert!(!segment.text.contains('['), "brackets in {:?}", segment.text);
        assert!(!segment.text.contains('*'), "asterisks in {:?}", segment.text);
        assert!(!segment.text.contains('&'), "ampersand in {:?}", segment.text);
        assert!(!segment.text.contains('$'), "dollar sign in {:?}", segment.text);
        assert!(!segment.text.contains('%'), "percent sign in {:?}", segment.text);
    }

    // Name prefixes never leak into spoken text
    assert!(script.segments[0].text.starts_with("Welcome back"));
    // Years are verbalized through the parse
    assert!(script.segments[0].text.contains("twenty twenty-four"));
    assert!(script.segments[1].text.contains("seventeen seventy-six"));
}

#[test]
fn test_parseScript_messyTranscript_shouldKeepExpectedTurns() {
    let script = parse_script(&messy_transcript(), WPM);

    let speakers: Vec<Speaker> = script.segments.iter().map(|s| s.speaker).collect();
    // "Wow." is dropped as too short; everything else survives in order
    assert_eq!(
        speakers,
        vec![
            Speaker::Host,
            Speaker::Expert,
            Speaker::Host,
            Speaker::Expert,
            Speaker::Expert,
        ]
    );
}

#[test]
fn test_parseScript_wordVolume_shouldDriveDurationEstimate() {
    let script = parse_script(&transcript_with_words(1500), WPM);

    assert_eq!(script.total_words, 1500);
    assert_eq!(script.estimated_minutes, 10);
}

#[test]
fn test_parseScript_durationEstimate_shouldRound() {
    // 80 words at 150 wpm is 0.53 minutes, rounding to 1
    let script = parse_script(&transcript_with_words(80), WPM);
    assert_eq!(script.estimated_minutes, 1);

    // 30 words at 150 wpm is 0.2 minutes, rounding to 0
    let script = parse_script(&transcript_with_words(30), WPM);
    assert_eq!(script.estimated_minutes, 0);
}

#[test]
fn test_parseScript_emptyOrUntaggedInput_shouldYieldEmptyScript() {
    assert!(parse_script("", WPM).segments.is_empty());
    assert!(parse_script("\n\n\n", WPM).segments.is_empty());
    assert!(parse_script("Prose with no speaker tags anywhere in it.", WPM)
        .segments
        .is_empty());

    let script = parse_script("", WPM);
    assert_eq!(script.total_words, 0);
    assert_eq!(script.estimated_minutes, 0);
}
