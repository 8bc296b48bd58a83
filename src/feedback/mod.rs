//! Feedback module for feedback-insights
//!
//! Typed feedback records and the CSV loader that produces them.

mod loader;
mod models;

pub use loader::{load_feedback, ColumnMap};
pub use models::FeedbackRecord;
