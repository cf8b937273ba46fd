// engine.rs - The narrow boundary to the matching engine.
//
// The engine is an external collaborator consumed through three traits:
// compile a pattern, spawn independent matchers from the compiled state,
// and drive one matcher over a bound text. All positions cross this
// boundary in native (UTF-16 code unit) index space.

use std::ops::Range;
use std::sync::Arc;

use crate::chunk::TextSource;
use crate::error::RegexError;
use crate::options::PatternOptions;

/// Status reported by engine-level calls.
///
/// The C interface reports these through an out-parameter error code on
/// every call; here each fallible operation returns one directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    /// A search region that is not a sub-range of the bound text.
    BadRegion {
        start: usize,
        end: usize,
        length: usize,
    },
    /// An index outside the valid range for the operation.
    IndexOutOfBounds { index: usize, length: usize },
    /// Group boundaries were requested with no successful match on record.
    InvalidState,
    /// The backend cannot express the requested boundary-mode combination.
    UnsupportedBounds,
    /// An invariant the engine relies on did not hold.
    Internal(&'static str),
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineStatus::BadRegion { start, end, length } => {
                write!(f, "region [{}, {}) exceeds text length {}", start, end, length)
            }
            EngineStatus::IndexOutOfBounds { index, length } => {
                write!(f, "index {} out of bounds for length {}", index, length)
            }
            EngineStatus::InvalidState => write!(f, "no match state available"),
            EngineStatus::UnsupportedBounds => {
                write!(f, "unsupported boundary-mode combination")
            }
            EngineStatus::Internal(message) => write!(f, "internal: {}", message),
        }
    }
}

/// A matching engine: compiles pattern source into shareable compiled state.
pub trait Engine: Send + Sync {
    /// Compile `pattern` under `options`.
    fn compile(
        &self,
        pattern: &str,
        options: PatternOptions,
    ) -> Result<Arc<dyn CompiledPattern>, RegexError>;
}

/// Immutable compiled pattern state, shared read-only by every matcher
/// spawned from it.
pub trait CompiledPattern: Send + Sync + std::fmt::Debug {
    /// Create an independent matcher over this compiled state.
    ///
    /// This duplicates automaton state only; the pattern source is never
    /// re-parsed. Failure surfaces as [`RegexError::CloneFailed`].
    fn spawn_matcher(&self) -> Result<Box<dyn Matcher>, RegexError>;

    /// Number of capture groups in the pattern, excluding group 0.
    fn group_count(&self) -> usize;

    /// Resolve a named capture group to its index.
    fn group_index(&self, name: &str) -> Option<usize>;
}

/// A mutable matcher: one compiled pattern bound to one subject text, with
/// the state of the most recent scan.
///
/// At most one logical owner may drive a matcher at any instant; the
/// checkout pool enforces this.
pub trait Matcher: Send {
    /// Associate `text` as the active subject, optionally narrowed to
    /// `region` (native units, end exclusive). Clears prior match state.
    ///
    /// The matcher may pull the subject through `text` during this call; it
    /// retains no reference to it afterwards.
    fn bind(
        &mut self,
        text: &mut dyn TextSource,
        region: Option<Range<usize>>,
    ) -> Result<(), EngineStatus>;

    /// Configure whether lookaround may see outside the region and whether
    /// `^`/`$` anchor to region edges rather than text edges.
    fn set_bounds(&mut self, transparent: bool, anchoring: bool) -> Result<(), EngineStatus>;

    /// Advance from the end of the previous match (or the region start) and
    /// report whether a further match exists.
    fn find_next(&mut self) -> Result<bool, EngineStatus>;

    /// Attempt a match anchored exactly at `at`, or at the region start
    /// when `at` is `None`. The match need not extend to the text end.
    fn looking_at(&mut self, at: Option<usize>) -> Result<bool, EngineStatus>;

    /// Number of capture groups in the pattern, excluding group 0.
    fn group_count(&self) -> usize;

    /// Boundaries of capture group `group` from the most recent successful
    /// match, in native units. Group 0 is the whole match; a group that did
    /// not participate reports `None`.
    fn group_span(&self, group: usize) -> Result<Option<Range<usize>>, EngineStatus>;

    /// Return to the neutral state: zero-length text, opaque bounds,
    /// anchoring bounds on, no match state. Safe to call at any time.
    fn reset(&mut self);
}
