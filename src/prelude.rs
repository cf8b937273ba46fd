// prelude.rs - Convenient re-exports for the public API.
//
//! # Prelude
//!
//! ```
//! use urex::prelude::*;
//!
//! let pattern = Pattern::new(r"\d+")?;
//! let m = pattern.find("answer: 42")?.unwrap();
//! assert_eq!(m.range(), 8..10);
//! # Ok::<(), RegexError>(())
//! ```

pub use crate::api::{Match, Matches, Pattern, PatternBuilder};
pub use crate::error::RegexError;
pub use crate::options::{MatchOptions, PatternOptions};
