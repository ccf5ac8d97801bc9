//! Per-conversation analytics.
//!
//! - [`ContentAnalyzer`] - code blocks, list items, text volume
//! - [`ContextAnalyzer`] - technology and category labels from keyword tables
//! - [`TagExtractor`] - frequency-ranked keyword stems over pluggable [`Tokenizer`]/[`Stemmer`]
//! - [`MetadataGenerator`] - runs all three and builds the display tag list
//!
//! Every analyzer is a pure function of the message slice, so conversations can be analyzed in
//! parallel without coordination.

pub mod content;
pub mod context;
pub mod metadata;
pub mod stemmer;
pub mod stopwords;
pub mod tags;
pub mod tokenizer;

pub use content::ContentAnalyzer;
pub use context::{CATEGORY_PATTERNS, ContextAnalyzer, Detector, TECHNOLOGY_PATTERNS};
pub use metadata::{MetadataGenerator, synthesize_tags};
pub use stemmer::{BilingualStemmer, SnowballStemmer, Stemmer, stemmer_for};
pub use stopwords::StopWordSet;
pub use tags::{DEFAULT_MAX_TERMS, TagExtractor};
pub use tokenizer::{Tokenizer, WordTokenizer};
