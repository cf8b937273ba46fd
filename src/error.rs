// error.rs - Error types for pattern compilation and matching.
//
// One public enum covering the four failure surfaces: compilation, clone
// fallback at checkout, engine status during a scan, and extraction into an
// undersized buffer.

use std::fmt;

use crate::engine::EngineStatus;

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// The pattern source failed to compile.
    ///
    /// Carries the offending pattern and, when the backend can locate the
    /// syntax fault, the code-point offset of the error within it.
    Compile {
        pattern: String,
        message: String,
        offset: Option<usize>,
    },
    /// The engine failed to duplicate compiled pattern state.
    ///
    /// Raised at checkout time when the canonical matcher is busy and a
    /// clone could not be produced. The pool stays valid for future
    /// checkouts.
    CloneFailed { message: String },
    /// A scan, bind or group-access call reported a non-success status.
    Engine(EngineStatus),
    /// `extract` was handed a destination buffer that is too small.
    ///
    /// `required` is the unit count a retry needs; nothing was truncated.
    BufferOverflow { required: usize },
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexError::Compile { message, offset, .. } => match offset {
                Some(at) => write!(f, "compile error at offset {}: {}", at, message),
                None => write!(f, "compile error: {}", message),
            },
            RegexError::CloneFailed { message } => {
                write!(f, "failed to clone compiled pattern: {}", message)
            }
            RegexError::Engine(status) => write!(f, "engine error: {}", status),
            RegexError::BufferOverflow { required } => {
                write!(f, "destination buffer too small: {} units required", required)
            }
        }
    }
}

impl std::error::Error for RegexError {}

impl From<EngineStatus> for RegexError {
    fn from(status: EngineStatus) -> Self {
        RegexError::Engine(status)
    }
}
