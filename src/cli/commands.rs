//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{AnalyzeArgs, Cli, ConfigCommand};
use crate::config::Settings;
use crate::feedback::ColumnMap;
use crate::llm::build_provider;
use crate::pipeline::{run_analysis, AnalyzeOptions};

/// Write the completion script for `shell` to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

/// Analyze a feedback CSV and write the Markdown report
pub async fn analyze(settings: &Settings, args: AnalyzeArgs) -> Result<()> {
    let options = analyze_options(settings, args)?;
    let provider = build_provider(settings)?;

    let outcome = run_analysis(&options, settings, provider.as_ref(), Local::now()).await?;

    if !outcome.warnings.is_empty() {
        eprintln!("Guard rails warnings:");
        for warning in &outcome.warnings {
            eprintln!("- {}", warning);
        }
    }

    println!(
        "Analyzed {} responses ({} sampled, average rating {})",
        outcome.stats.total_count,
        outcome.samples_analyzed,
        outcome.stats.average_display()
    );
    println!("Report created: {}", outcome.out_path.display());

    Ok(())
}

fn analyze_options(settings: &Settings, args: AnalyzeArgs) -> Result<AnalyzeOptions> {
    let csv_path = args
        .csv_path
        .context("Missing input CSV path. Usage: feedback-insights <CSV_PATH> [OPTIONS]")?;

    let sample_size =
        usize::try_from(args.sample_size).context("Sample size does not fit this platform")?;

    Ok(AnalyzeOptions {
        csv_path,
        out_path: args.out_path,
        columns: ColumnMap {
            text: args.text_col,
            rating: args.rating_col,
            date: args.date_col,
            id: settings.columns.id.clone(),
        },
        sample_size,
        strategy: args.sample_strategy,
    })
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&settings.redacted())?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
