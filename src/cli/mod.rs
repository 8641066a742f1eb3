//! Command-line parsing for the production gap analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Jurisdiction;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pg", version, about = "Oil & Gas Production Gap Analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze production CSVs: classify months, extract gaps and shut-in
    /// periods, print the report, and optionally plot/export.
    Analyze(AnalyzeArgs),
    /// Download per-well production records from a state agency.
    Fetch(FetchArgs),
    /// Run the analysis on bundled (or seeded random) sample data.
    Sample(SampleArgs),
    /// Plot a previously exported summary JSON.
    Plot(PlotArgs),
}

/// Options for analyzing CSV files.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Production CSV files, one per well.
    #[arg(required = true, value_name = "CSV")]
    pub inputs: Vec<PathBuf>,

    /// Well identifier for each input file, in order (defaults to the
    /// file stem).
    #[arg(long = "well", value_name = "ID")]
    pub wells: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for fetching records from a state agency.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// API numbers (or state file numbers) of the wells to fetch.
    #[arg(required = true, value_name = "WELL")]
    pub wells: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory for the downloaded per-well CSV files.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Seconds to pause between wells.
    #[arg(long, default_value_t = 1)]
    pub pause_secs: u64,
}

/// Options for the bundled sample run.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Generate random histories instead of the fixed scenario.
    #[arg(long)]
    pub random: bool,

    /// Random seed (only with --random).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of wells to generate (only with --random).
    #[arg(long, default_value_t = 4)]
    pub wells: usize,

    /// Number of months to generate (only with --random).
    #[arg(long, default_value_t = 120)]
    pub months: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for plotting a saved summary.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Summary JSON file produced by `--export-summary`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Re-render the production chart to SVG.
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,
}

/// Where the column configuration comes from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Jurisdiction whose built-in column preset to use.
    #[arg(short = 's', long, value_enum)]
    pub state: Option<Jurisdiction>,

    /// Column configuration JSON file (instead of --state).
    #[arg(long, value_name = "JSON", conflicts_with = "state")]
    pub config: Option<PathBuf>,
}

/// Shared presentation/export options.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Minimum gap length (days) for an interval to be listed.
    #[arg(short = 't', long, default_value_t = 0)]
    pub threshold_days: i64,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Export qualifying intervals to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full analysis summary to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,

    /// Render the production chart to an SVG file.
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_args_parse() {
        let cli = Cli::parse_from([
            "pg", "analyze", "well_a.csv", "well_b.csv", "--state", "co", "--well",
            "05-001-07727", "--threshold-days", "90", "--export", "gaps.csv",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert_eq!(args.wells, vec!["05-001-07727".to_string()]);
                assert_eq!(args.source.state, Some(Jurisdiction::Co));
                assert_eq!(args.output.threshold_days, 90);
                assert_eq!(args.output.export, Some(PathBuf::from("gaps.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn state_and_config_conflict() {
        let result = Cli::try_parse_from([
            "pg", "analyze", "a.csv", "--state", "co", "--config", "cols.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn sample_defaults() {
        let cli = Cli::parse_from(["pg", "sample"]);
        match cli.command {
            Command::Sample(args) => {
                assert!(!args.random);
                assert_eq!(args.seed, 42);
                assert_eq!(args.output.threshold_days, 0);
                assert!(args.output.plot);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
