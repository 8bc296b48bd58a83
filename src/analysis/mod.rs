//! Analysis module for feedback-insights
//!
//! KPI computation over the full record set and sampling for the prompt.

mod sampler;
mod stats;

pub use sampler::{sample, SampleStrategy, DEFAULT_SAMPLE_SIZE};
pub use stats::{compute_stats, Statistics};
