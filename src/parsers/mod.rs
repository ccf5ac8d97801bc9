//! Normalization of raw chat JSON into the shared conversation model
//!
//! # Error Handling Strategy
//!
//! Parsing follows the same **graceful degradation** approach as the rest of the crate:
//!
//! - **Invalid JSON**: [`SchemaNormalizer::normalize`] returns a [`ParseError`]. Callers handle it
//!   per record (log and skip), so one bad record never affects its siblings.
//!
//! - **Unknown shapes**: Valid JSON that is neither a tabbed object nor a flat timeline yields
//!   zero conversations. The batch processor counts these so silent drops stay visible.
//!
//! - **Malformed fields**: Wrong-typed fields are read as absent and take their defaults
//!   (see [`deserializers`]). Tabs, bubbles or timeline entries that are not JSON objects are skipped.

pub mod deserializers;
pub mod error;
pub mod normalizer;

pub use error::ParseError;
pub use normalizer::{MIN_PLAUSIBLE_EPOCH_MS, RawShape, SchemaNormalizer};
