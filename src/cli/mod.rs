//! CLI module for feedback-insights
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;

pub use args::{AnalyzeArgs, Cli, Commands, ConfigCommand};
