//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::analysis::{SampleStrategy, DEFAULT_SAMPLE_SIZE};

/// feedback-insights - Turn customer feedback CSVs into AI insight reports
#[derive(Parser, Debug)]
#[command(name = "feedback-insights")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default analyze run
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// CSV file with one feedback record per row
    pub csv_path: Option<PathBuf>,

    /// Where to write the Markdown report
    #[arg(long, default_value = "report.md")]
    pub out_path: PathBuf,

    /// Column holding the feedback text
    #[arg(long, default_value = "feedback")]
    pub text_col: String,

    /// Column holding the numeric rating
    #[arg(long, default_value = "rating")]
    pub rating_col: String,

    /// Column holding the submission date
    #[arg(long, default_value = "date")]
    pub date_col: String,

    /// Maximum number of records sent to the model
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_size: u64,

    /// How records are picked for the sample
    #[arg(long, value_enum, default_value_t = SampleStrategy::Prefix)]
    pub sample_strategy: SampleStrategy,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["feedback-insights", "data.csv"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.analyze.csv_path, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.analyze.out_path, PathBuf::from("report.md"));
        assert_eq!(cli.analyze.text_col, "feedback");
        assert_eq!(cli.analyze.rating_col, "rating");
        assert_eq!(cli.analyze.date_col, "date");
        assert_eq!(cli.analyze.sample_size, 200);
        assert_eq!(cli.analyze.sample_strategy, SampleStrategy::Prefix);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "feedback-insights",
            "in.csv",
            "--out-path",
            "out/summary.md",
            "--text-col",
            "comment",
            "--sample-size",
            "25",
            "--sample-strategy",
            "newest",
        ])
        .unwrap();

        assert_eq!(cli.analyze.out_path, PathBuf::from("out/summary.md"));
        assert_eq!(cli.analyze.text_col, "comment");
        assert_eq!(cli.analyze.sample_size, 25);
        assert_eq!(cli.analyze.sample_strategy, SampleStrategy::Newest);
    }

    #[test]
    fn rejects_zero_sample_size() {
        assert!(Cli::try_parse_from(["feedback-insights", "in.csv", "--sample-size", "0"]).is_err());
    }

    #[test]
    fn parses_config_subcommand() {
        let cli = Cli::try_parse_from(["feedback-insights", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommand::Init { force: true }))
        ));
    }
}
