//! feedback-insights - Customer feedback analysis with AI-written insight reports
//!
//! Reads a CSV of feedback, computes a few KPIs, asks a language model for a
//! structured summary and renders everything into a Markdown report.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod feedback;
pub mod guards;
pub mod llm;
pub mod pipeline;
pub mod report;

use thiserror::Error;

/// Main error type for feedback-insights
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for InsightsError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => Self::Config(format!("Invalid CSV at line {}: {}", pos.line(), err)),
            None => Self::Config(format!("Invalid CSV: {}", err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "feedback-insights";
