//! Markdown report rendering and output.

pub mod markdown;
pub mod writer;

pub use markdown::render_markdown;
pub use writer::{WriteSummary, write_reports};
