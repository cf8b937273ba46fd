// api_test.rs - Integration tests for the public matching API.

use urex::chunk::{ChunkedText, TextSource};
use urex::engine::EngineStatus;
use urex::prelude::*;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

// === Pattern::new ===

#[test]
fn simple_pattern() {
    let pattern = Pattern::new(r"\d+").unwrap();
    let m = pattern.find("abc 123 def").unwrap().unwrap();
    assert_eq!(m.range(), 4..7);
}

#[test]
fn no_match_returns_none() {
    let pattern = Pattern::new("xyz").unwrap();
    assert!(pattern.find("abc").unwrap().is_none());
}

#[test]
fn empty_pattern() {
    let pattern = Pattern::new("").unwrap();
    let m = pattern.find("hello").unwrap().unwrap();
    assert_eq!(m.range(), 0..0);
    assert!(m.is_empty());
}

#[test]
fn invalid_pattern_reports_offset() {
    let err = Pattern::new("ab(cd").unwrap_err();
    match err {
        RegexError::Compile { pattern, offset, .. } => {
            assert_eq!(pattern, "ab(cd");
            assert_eq!(offset, Some(2));
        }
        other => panic!("expected Compile error, got {:?}", other),
    }
}

// === find_iter ===

#[test]
fn two_matches_with_capture_group() {
    let subject = "xabcabc";
    let pattern = Pattern::new("a(b)c").unwrap();
    let matches: Vec<Match> = pattern
        .find_iter(subject)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].range(), 1..4);
    assert_eq!(matches[1].range(), 4..7);
    for m in &matches {
        let group = m.group(1).unwrap();
        assert_eq!(&subject[group], "b");
    }
}

#[test]
fn matches_never_overlap() {
    let pattern = Pattern::new("aa").unwrap();
    let matches: Vec<Match> = pattern
        .find_iter("aaaa")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].range(), 0..2);
    assert_eq!(matches[1].range(), 2..4);
}

#[test]
fn empty_matches_advance_and_terminate() {
    let pattern = Pattern::new("b*").unwrap();
    let matches: Vec<Match> = pattern
        .find_iter("abb")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    // Empty at 0, "bb" at 1, empty at 3.
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[1].range(), 1..3);
}

// === Anchored matching ===

#[test]
fn anchored_match_yields_exactly_one_result() {
    let pattern = Pattern::new("^ab").unwrap();
    let mut cursor = pattern
        .find_iter_in("ab", 0..2, MatchOptions::ANCHORED)
        .unwrap();
    let first = cursor.next().unwrap().unwrap();
    assert_eq!(first.range(), 0..2);
    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
}

#[test]
fn anchored_match_misses_off_start() {
    let pattern = Pattern::new("^ab").unwrap();
    let mut cursor = pattern
        .find_iter_in("xab", 0..3, MatchOptions::ANCHORED)
        .unwrap();
    assert!(cursor.next().is_none());
}

// === Regions and bounds ===

#[test]
fn region_restricts_matching() {
    let pattern = Pattern::new("abc").unwrap();
    let matches: Vec<Match> = pattern
        .find_iter_in("abcabc", 1..6, MatchOptions::empty())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].range(), 3..6);
}

#[test]
fn out_of_range_region_is_clamped() {
    let pattern = Pattern::new("abc").unwrap();
    let matches: Vec<Match> = pattern
        .find_iter_in("abc", 0..999, MatchOptions::empty())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(matches.len(), 1);
}

#[test]
fn anchoring_bounds_treat_region_as_whole_text() {
    let pattern = Pattern::new("^bc$").unwrap();
    let m = pattern
        .find_iter_in("abcd", 1..3, MatchOptions::empty())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(m.range(), 1..3);
}

#[test]
fn transparent_bounds_see_the_full_text() {
    let pattern = Pattern::new("^bc$").unwrap();
    let options = MatchOptions::TRANSPARENT_BOUNDS | MatchOptions::WITHOUT_ANCHORING_BOUNDS;
    let mut cursor = pattern.find_iter_in("abcd", 1..3, options).unwrap();
    // ^ and $ no longer hold at the region edges.
    assert!(cursor.next().is_none());
}

#[test]
fn mixed_bounds_fail_at_cursor_construction() {
    let pattern = Pattern::new("a").unwrap();
    let err = pattern
        .find_iter_in("a", 0..1, MatchOptions::TRANSPARENT_BOUNDS)
        .err()
        .unwrap();
    assert_eq!(err, RegexError::Engine(EngineStatus::UnsupportedBounds));
}

// === Subject representations ===

#[test]
fn utf16_and_str_subjects_agree() {
    let text = "na\u{ef}ve na\u{ef}ve";
    let wide = units(text);
    let pattern = Pattern::new("na\u{ef}ve").unwrap();

    let from_str: Vec<Match> = pattern
        .find_iter(text)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let from_units: Vec<Match> = pattern
        .find_iter(wide.as_slice())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(from_str.len(), 2);
    assert_eq!(from_units.len(), 2);
    // Host spans differ by index space: bytes vs units.
    assert_eq!(from_str[0].range(), 0..6);
    assert_eq!(from_units[0].range(), 0..5);
}

#[test]
fn surrogate_pair_subject_reports_char_boundaries() {
    let pattern = Pattern::new(r"\u{1f600}").unwrap();
    let m = pattern.find("a\u{1f600}b").unwrap().unwrap();
    assert_eq!(m.range(), 1..5);

    let wide = units("a\u{1f600}b");
    let m = pattern.find(wide.as_slice()).unwrap().unwrap();
    assert_eq!(m.range(), 1..3);
}

// === Compile options ===

#[test]
fn case_insensitive_builder() {
    let pattern = Pattern::builder("hello world")
        .case_insensitive(true)
        .build()
        .unwrap();
    assert!(pattern.is_match("Hello World").unwrap());
}

#[test]
fn literal_patterns_ignore_metacharacters() {
    let pattern = Pattern::builder("a.c")
        .ignore_metacharacters(true)
        .build()
        .unwrap();
    assert!(pattern.is_match("xa.cx").unwrap());
    assert!(!pattern.is_match("abc").unwrap());
}

#[test]
fn literal_retains_case_insensitivity() {
    let pattern = Pattern::builder("a.c")
        .ignore_metacharacters(true)
        .case_insensitive(true)
        .build()
        .unwrap();
    assert!(pattern.is_match("A.C").unwrap());
}

#[test]
fn comments_mode_ignores_pattern_whitespace() {
    let pattern = Pattern::builder("a b c # trailing comment")
        .allow_comments_and_whitespace(true)
        .build()
        .unwrap();
    assert!(pattern.is_match("abc").unwrap());
}

#[test]
fn anchors_match_lines_option() {
    let pattern = Pattern::builder("^b$")
        .anchors_match_lines(true)
        .build()
        .unwrap();
    let m = pattern.find("a\nb\nc").unwrap().unwrap();
    assert_eq!(m.range(), 2..3);
}

#[test]
fn dot_matches_line_separators_option() {
    let strict = Pattern::new("a.b").unwrap();
    assert!(!strict.is_match("a\nb").unwrap());
    let relaxed = Pattern::builder("a.b")
        .dot_matches_line_separators(true)
        .build()
        .unwrap();
    assert!(relaxed.is_match("a\nb").unwrap());
}

// === Pattern accessors ===

#[test]
fn accessors_report_compilation_inputs() {
    let pattern = Pattern::builder(r"(\d+)-(?P<tail>\w+)")
        .case_insensitive(true)
        .build()
        .unwrap();
    assert_eq!(pattern.as_str(), r"(\d+)-(?P<tail>\w+)");
    assert!(pattern.options().contains(PatternOptions::CASE_INSENSITIVE));
    assert_eq!(pattern.group_count(), 2);
    assert_eq!(pattern.group_index("tail"), Some(2));
    assert_eq!(pattern.group_index("head"), None);
}

// === Extraction ===

#[test]
fn extract_overflow_reports_required_units() {
    let subject = units("..hello..");
    let pattern = Pattern::new("hello").unwrap();
    let m = pattern.find(subject.as_slice()).unwrap().unwrap();
    assert_eq!(m.len(), 5);

    let mut text = ChunkedText::new(subject.as_slice());
    let mut small = [0u16; 2];
    let err = text.extract(m.start(), m.end(), &mut small).unwrap_err();
    assert_eq!(err, RegexError::BufferOverflow { required: 5 });

    let mut big = [0u16; 8];
    let copied = text.extract(m.start(), m.end(), &mut big).unwrap();
    assert_eq!(copied, 5);
    assert_eq!(&big[..5], &subject[2..7]);
    assert_eq!(big[5], 0);
}
