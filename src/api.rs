// api.rs - Idiomatic surface: compiled patterns and match cursors.
//
// Wraps the engine boundary, the chunked text adapter and the checkout pool
// into Pattern, PatternBuilder, Match and the Matches cursor.

use std::ops::Range;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::automata::AUTOMATA;
use crate::chunk::ChunkedText;
use crate::engine::{CompiledPattern, Engine, EngineStatus};
use crate::error::RegexError;
use crate::options::{MatchOptions, PatternOptions};
use crate::pool::{CheckoutPool, Lease};
use crate::units::CodeUnits;

/// A compiled regular expression, shareable across threads.
///
/// A `Pattern` owns one canonical matcher; concurrent matching operations
/// against the same `Pattern` never block each other and never interfere —
/// whoever finds the canonical matcher busy works on an independent clone.
///
/// # Examples
///
/// ```
/// use urex::prelude::*;
///
/// let pattern = Pattern::new(r"a(b)c")?;
/// let matches = pattern
///     .find_iter("xabcabc")?
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].range(), 1..4);
/// assert_eq!(matches[0].group(1), Some(2..3));
/// assert_eq!(matches[1].range(), 4..7);
/// # Ok::<(), RegexError>(())
/// ```
pub struct Pattern {
    source: String,
    options: PatternOptions,
    compiled: Arc<dyn CompiledPattern>,
    pool: CheckoutPool,
}

impl Pattern {
    /// Compile `pattern` with default options and the default engine.
    pub fn new(pattern: &str) -> Result<Pattern, RegexError> {
        Pattern::builder(pattern).build()
    }

    /// Create a [`PatternBuilder`] for fine-grained control over
    /// compilation.
    pub fn builder(pattern: &str) -> PatternBuilder {
        PatternBuilder::new(pattern)
    }

    /// The source text this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The option flags this pattern was compiled with.
    pub fn options(&self) -> PatternOptions {
        self.options
    }

    /// Number of capture groups in the pattern, excluding group 0.
    pub fn group_count(&self) -> usize {
        self.compiled.group_count()
    }

    /// Resolve a named capture group to its index.
    ///
    /// ```
    /// use urex::prelude::*;
    ///
    /// let pattern = Pattern::new(r"(?P<word>\w+)")?;
    /// assert_eq!(pattern.group_index("word"), Some(1));
    /// assert_eq!(pattern.group_index("missing"), None);
    /// # Ok::<(), RegexError>(())
    /// ```
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.compiled.group_index(name)
    }

    /// Iterate over all non-overlapping matches in `subject`.
    pub fn find_iter<S: CodeUnits>(&self, subject: S) -> Result<Matches<'_, S>, RegexError> {
        self.cursor(subject, None, MatchOptions::empty())
    }

    /// Iterate over matches constrained to `range` of `subject` (host
    /// index space) under `options`.
    pub fn find_iter_in<S: CodeUnits>(
        &self,
        subject: S,
        range: Range<usize>,
        options: MatchOptions,
    ) -> Result<Matches<'_, S>, RegexError> {
        self.cursor(subject, Some(range), options)
    }

    /// Return the first match in `subject`, or `None`.
    pub fn find<S: CodeUnits>(&self, subject: S) -> Result<Option<Match>, RegexError> {
        let mut matches = self.find_iter(subject)?;
        matches.next().transpose()
    }

    /// Whether `subject` contains a match.
    pub fn is_match<S: CodeUnits>(&self, subject: S) -> Result<bool, RegexError> {
        Ok(self.find(subject)?.is_some())
    }

    fn cursor<S: CodeUnits>(
        &self,
        subject: S,
        range: Option<Range<usize>>,
        options: MatchOptions,
    ) -> Result<Matches<'_, S>, RegexError> {
        let mut lease = self.pool.checkout(options)?;
        let mut text = ChunkedText::new(subject);
        let region = range.map(|r| text.to_native_position(r.start)..text.to_native_position(r.end));
        let matcher = lease
            .matcher()
            .ok_or(RegexError::Engine(EngineStatus::InvalidState))?;
        matcher.bind(&mut text, region)?;
        matcher.set_bounds(options.transparent_bounds(), options.anchoring_bounds())?;
        Ok(Matches {
            lease,
            text,
            anchored: options.contains(MatchOptions::ANCHORED),
            done: false,
        })
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// === PatternBuilder ===

/// Builder for compiling a [`Pattern`] with custom options.
///
/// # Examples
///
/// ```
/// use urex::prelude::*;
///
/// let pattern = Pattern::builder("hello")
///     .case_insensitive(true)
///     .build()?;
/// assert!(pattern.is_match("say Hello")?);
/// # Ok::<(), RegexError>(())
/// ```
pub struct PatternBuilder {
    pattern: String,
    options: PatternOptions,
    engine: &'static dyn Engine,
}

impl PatternBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> PatternBuilder {
        PatternBuilder {
            pattern: pattern.to_string(),
            options: PatternOptions::empty(),
            engine: &AUTOMATA,
        }
    }

    fn flag(mut self, flag: PatternOptions, yes: bool) -> Self {
        self.options.set(flag, yes);
        self
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(self, yes: bool) -> Self {
        self.flag(PatternOptions::CASE_INSENSITIVE, yes)
    }

    /// Ignore whitespace and `#` comments within the pattern.
    pub fn allow_comments_and_whitespace(self, yes: bool) -> Self {
        self.flag(PatternOptions::ALLOW_COMMENTS_AND_WHITESPACE, yes)
    }

    /// Let `.` match line separators.
    pub fn dot_matches_line_separators(self, yes: bool) -> Self {
        self.flag(PatternOptions::DOT_MATCHES_LINE_SEPARATORS, yes)
    }

    /// Treat the entire pattern as a literal string. Case-insensitivity
    /// retains its effect.
    pub fn ignore_metacharacters(self, yes: bool) -> Self {
        self.flag(PatternOptions::IGNORE_METACHARACTERS, yes)
    }

    /// Let `^` and `$` match at line boundaries.
    pub fn anchors_match_lines(self, yes: bool) -> Self {
        self.flag(PatternOptions::ANCHORS_MATCH_LINES, yes)
    }

    /// Recognize only `\u{000A}` as a line ending.
    pub fn use_unix_line_separators(self, yes: bool) -> Self {
        self.flag(PatternOptions::USE_UNIX_LINE_SEPARATORS, yes)
    }

    /// Use UAX #29 word boundaries for `\b`.
    pub fn use_unicode_word_boundaries(self, yes: bool) -> Self {
        self.flag(PatternOptions::USE_UNICODE_WORD_BOUNDARIES, yes)
    }

    /// Fail compilation on unknown backslash escapes.
    pub fn fail_on_unknown_escapes(self, yes: bool) -> Self {
        self.flag(PatternOptions::FAIL_ON_UNKNOWN_ESCAPES, yes)
    }

    /// Set the whole option set at once.
    pub fn options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    /// Select the engine to compile with (default: the regex-automata
    /// backend).
    pub fn engine(mut self, engine: &'static dyn Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Compile the pattern into a [`Pattern`].
    pub fn build(self) -> Result<Pattern, RegexError> {
        let compiled = self.engine.compile(&self.pattern, self.options)?;
        let pool = CheckoutPool::new(Arc::clone(&compiled))?;
        Ok(Pattern {
            source: self.pattern,
            options: self.options,
            compiled,
            pool,
        })
    }
}

// === Match ===

/// A single match result, expressed in the subject's host index space.
///
/// Group 0 is the whole match; groups `1..=group_count()` correspond to
/// `(...)` in the pattern, `None` when the group did not participate.
/// Owns its spans and borrows nothing from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    whole: Range<usize>,
    groups: SmallVec<[Option<Range<usize>>; 8]>,
}

impl Match {
    /// Host position of the start of the match.
    pub fn start(&self) -> usize {
        self.whole.start
    }

    /// Host position of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.whole.end
    }

    /// Host range of the match.
    pub fn range(&self) -> Range<usize> {
        self.whole.clone()
    }

    /// Length of the match in host units.
    pub fn len(&self) -> usize {
        self.whole.end - self.whole.start
    }

    /// Whether the match is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.whole.start == self.whole.end
    }

    /// Host range of capture group `i`, or `None` if the group did not
    /// participate. Group 0 is the whole match.
    pub fn group(&self, i: usize) -> Option<Range<usize>> {
        if i == 0 {
            Some(self.whole.clone())
        } else {
            self.groups.get(i - 1).cloned().flatten()
        }
    }

    /// Number of capture groups, excluding group 0.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

// === Matches ===

/// A forward-only lazy sequence of [`Match`] results.
///
/// Holds a lease on a matcher for its whole life; the lease is released
/// exactly once, whether the cursor is exhausted, abandoned early, or
/// terminated by an error. An engine error is yielded once and ends the
/// sequence.
pub struct Matches<'p, S> {
    lease: Lease<'p>,
    text: ChunkedText<S>,
    anchored: bool,
    done: bool,
}

impl<S: CodeUnits> Matches<'_, S> {
    /// Whether this cursor runs on a cloned matcher rather than the
    /// canonical one.
    pub fn is_cloned(&self) -> bool {
        self.lease.is_cloned()
    }

    fn advance(&mut self) -> Result<Option<Match>, RegexError> {
        let matcher = match self.lease.matcher() {
            Some(matcher) => matcher,
            None => return Ok(None),
        };
        let found = if self.anchored {
            matcher.looking_at(None)?
        } else {
            matcher.find_next()?
        };
        if !found {
            return Ok(None);
        }
        let group_count = matcher.group_count();
        let mut whole = None;
        let mut groups = SmallVec::with_capacity(group_count);
        for i in 0..=group_count {
            let native = matcher.group_span(i)?;
            let host = native.map(|span| {
                self.text.to_host_position(span.start)..self.text.to_host_position(span.end)
            });
            if i == 0 {
                whole = host;
            } else {
                groups.push(host);
            }
        }
        match whole {
            Some(whole) => Ok(Some(Match { whole, groups })),
            None => Err(RegexError::Engine(EngineStatus::Internal(
                "match without group 0",
            ))),
        }
    }
}

impl<S: CodeUnits> Iterator for Matches<'_, S> {
    type Item = Result<Match, RegexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(result)) => {
                if self.anchored {
                    // At most one anchored result; give the matcher back
                    // right away.
                    self.done = true;
                    self.lease.release();
                }
                Some(Ok(result))
            }
            Ok(None) => {
                self.done = true;
                self.lease.release();
                None
            }
            Err(err) => {
                self.done = true;
                self.lease.release();
                Some(Err(err))
            }
        }
    }
}
