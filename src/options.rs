// options.rs - Compile-time and match-time option flags.
//
// `PatternOptions` mirrors the engine's URegexpFlag bit values exactly, so
// flags can be handed to an engine backend without translation.

use bitflags::bitflags;

bitflags! {
    /// Flags applied when a pattern is compiled.
    ///
    /// The bit values are the engine's own: passing `bits()` straight
    /// through to an ICU-style backend is valid.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PatternOptions: u32 {
        /// Only `\u{000A}` is recognized as a line ending by `.`, `^` and `$`.
        const USE_UNIX_LINE_SEPARATORS = 1;
        /// Case-insensitive matching.
        const CASE_INSENSITIVE = 2;
        /// Whitespace and `#` comments in the pattern are ignored.
        const ALLOW_COMMENTS_AND_WHITESPACE = 4;
        /// `^` and `$` match at line boundaries, not just text boundaries.
        const ANCHORS_MATCH_LINES = 8;
        /// The entire pattern is treated as a literal string.
        ///
        /// `CASE_INSENSITIVE` retains its effect; the other flags become
        /// superfluous.
        const IGNORE_METACHARACTERS = 16;
        /// `.` matches line separators.
        const DOT_MATCHES_LINE_SEPARATORS = 32;
        /// `\b` uses the UAX #29 definition of word boundaries.
        const USE_UNICODE_WORD_BOUNDARIES = 256;
        /// Backslash-escaped ASCII letters without a defined meaning are a
        /// compile error instead of matching themselves.
        const FAIL_ON_UNKNOWN_ESCAPES = 512;
    }
}

bitflags! {
    /// Flags applied to a single matching operation.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MatchOptions: u32 {
        /// Match only at the start of the search region; the cursor yields
        /// at most one result.
        const ANCHORED = 1;
        /// Lookaround constructs may see text outside the search region.
        const TRANSPARENT_BOUNDS = 1 << 1;
        /// `^` and `$` do not match at the region edges, only at the real
        /// text boundaries.
        const WITHOUT_ANCHORING_BOUNDS = 1 << 2;
    }
}

impl MatchOptions {
    /// Whether lookaround may see outside the region under these options.
    pub fn transparent_bounds(self) -> bool {
        self.contains(MatchOptions::TRANSPARENT_BOUNDS)
    }

    /// Whether `^`/`$` anchor to the region edges under these options.
    pub fn anchoring_bounds(self) -> bool {
        !self.contains(MatchOptions::WITHOUT_ANCHORING_BOUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_flag_bits_match_engine_values() {
        assert_eq!(PatternOptions::USE_UNIX_LINE_SEPARATORS.bits(), 1);
        assert_eq!(PatternOptions::CASE_INSENSITIVE.bits(), 2);
        assert_eq!(PatternOptions::ALLOW_COMMENTS_AND_WHITESPACE.bits(), 4);
        assert_eq!(PatternOptions::ANCHORS_MATCH_LINES.bits(), 8);
        assert_eq!(PatternOptions::IGNORE_METACHARACTERS.bits(), 16);
        assert_eq!(PatternOptions::DOT_MATCHES_LINE_SEPARATORS.bits(), 32);
        assert_eq!(PatternOptions::USE_UNICODE_WORD_BOUNDARIES.bits(), 256);
        assert_eq!(PatternOptions::FAIL_ON_UNKNOWN_ESCAPES.bits(), 512);
    }

    #[test]
    fn default_bounds_are_opaque_and_anchoring() {
        let opts = MatchOptions::empty();
        assert!(!opts.transparent_bounds());
        assert!(opts.anchoring_bounds());
    }

    #[test]
    fn bounds_flags_flip_both_modes() {
        let opts = MatchOptions::TRANSPARENT_BOUNDS | MatchOptions::WITHOUT_ANCHORING_BOUNDS;
        assert!(opts.transparent_bounds());
        assert!(!opts.anchoring_bounds());
    }
}
