//! Analysis pipeline orchestration
//!
//! Load, aggregate and sample, guard, prompt, call, render. Every step runs
//! once and in order; the report file is only touched after the provider
//! call has succeeded.

use chrono::{DateTime, Local};
use std::path::PathBuf;

use crate::analysis::{compute_stats, sample, SampleStrategy, Statistics};
use crate::config::Settings;
use crate::feedback::{load_feedback, ColumnMap};
use crate::guards::{guard_rails_summary, sanitize_samples};
use crate::llm::{build_insight_prompt, LlmProvider};
use crate::report::{write_report, Report};
use crate::{InsightsError, Result};

/// Inputs for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub csv_path: PathBuf,
    pub out_path: PathBuf,
    pub columns: ColumnMap,
    pub sample_size: usize,
    pub strategy: SampleStrategy,
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub out_path: PathBuf,
    pub stats: Statistics,
    pub samples_analyzed: usize,
    pub warnings: Vec<String>,
}

/// Run the full pipeline and write the report.
pub async fn run_analysis(
    options: &AnalyzeOptions,
    settings: &Settings,
    provider: &dyn LlmProvider,
    generated_at: DateTime<Local>,
) -> Result<AnalysisOutcome> {
    if options.sample_size == 0 {
        return Err(InsightsError::Config(
            "Sample size must be greater than zero".to_string(),
        ));
    }

    tracing::info!("Reading {}", options.csv_path.display());
    let records = load_feedback(&options.csv_path, &options.columns)?;

    let stats = compute_stats(&records);
    tracing::info!(
        "{} responses, average rating {}",
        stats.total_count,
        stats.average_display()
    );

    let sampled = sample(&records, options.sample_size, options.strategy);
    let texts: Vec<&str> = sampled.iter().map(|r| r.text.as_str()).collect();
    tracing::debug!(
        "Sampled {} of {} records ({:?})",
        texts.len(),
        records.len(),
        options.strategy
    );

    let sanitized = sanitize_samples(&texts, &settings.guards);
    let guard_note = guard_rails_summary(&sanitized.warnings);

    let prompt = build_insight_prompt(&sanitized.texts, &stats, settings.guards.max_prompt_chars);

    tracing::info!("Requesting AI insights from {}", provider.name());
    let insights = provider.generate_insights(&prompt).await?;

    let samples_analyzed = sanitized.texts.len();
    let report = Report::new(stats.clone(), insights, generated_at, samples_analyzed)
        .with_guard_note(guard_note);
    write_report(&options.out_path, &report)?;

    Ok(AnalysisOutcome {
        out_path: options.out_path.clone(),
        stats,
        samples_analyzed,
        warnings: sanitized.warnings,
    })
}
