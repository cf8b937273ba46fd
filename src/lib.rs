//! # Urex
//!
//! Chunked text access and pooled matcher checkout over ICU-style regex
//! engines.
//!
//! Two pieces work together here. A [`chunk::ChunkedText`] adapter presents
//! any host string with a UTF-16 code-unit view — a `&str`, a `&[u16]`
//! buffer — to a matching engine as bounded windows materialized on demand,
//! with bidirectional index translation, so the subject is never copied as
//! a whole. A [`pool::CheckoutPool`] turns the single mutable matcher of a
//! compiled pattern into a safely shareable resource: a matching operation
//! takes the canonical matcher if it is free, and otherwise works on an
//! independent clone — concurrent callers never block and never corrupt
//! each other's state.
//!
//! ## Quick Start
//!
//! ```
//! use urex::prelude::*;
//!
//! let pattern = Pattern::new(r"a(b)c")?;
//! let matches = pattern
//!     .find_iter("xabcabc")?
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].range(), 1..4);
//! assert_eq!(matches[0].group(1), Some(2..3));
//! # Ok::<(), RegexError>(())
//! ```
//!
//! For fine-grained control, use [`api::PatternBuilder`]:
//!
//! ```
//! use urex::prelude::*;
//!
//! let pattern = Pattern::builder("hello")
//!     .case_insensitive(true)
//!     .build()?;
//! assert!(pattern.is_match("Hello World")?);
//! # Ok::<(), RegexError>(())
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | `Pattern`, `PatternBuilder`, `Match`, `Matches` cursor |
//! | [`units`] | Host string code-unit boundary (`CodeUnits`) |
//! | [`chunk`] | Chunked text adapter and engine-facing pull interface |
//! | [`engine`] | Narrow engine boundary traits and status codes |
//! | [`automata`] | Shipped engine backend over regex-automata |
//! | [`pool`] | Checkout pool and leases |
//! | [`options`] | Compile-time and match-time flags |
//! | [`error`] | Error type |

pub mod api;
pub mod automata;
pub mod chunk;
pub mod engine;
pub mod error;
pub mod options;
pub mod pool;
pub mod prelude;
pub mod units;
