//! Configuration module for feedback-insights
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{ColumnSettings, GuardSettings, LlmSettings, Settings};
