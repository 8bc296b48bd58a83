//! Report module for feedback-insights
//!
//! Renders statistics and insight sections into the fixed Markdown template
//! and writes the result to disk.

mod markdown;
mod writer;

pub use markdown::{Report, SECTION_HEADINGS};
pub use writer::write_report;
