//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads records (CSV files, agency fetch, or bundled samples)
//! - runs the classification/gap-extraction pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, FetchArgs, OutputArgs, PlotArgs, SampleArgs, SourceArgs};
use crate::config::ColumnConfig;
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::StripRow;

pub mod pipeline;

/// Entry point for the `pg` binary.
pub fn run() -> Result<(), AppError> {
    // We want plain `pg` (and `pg --threshold-days 90`) to behave like
    // `pg sample ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Fetch(args) => handle_fetch(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.source)?;
    let run = run_config_from_args(&args.output);

    let ingested = crate::io::ingest::load_csv_files(&args.inputs, &args.wells, &config)?;
    println!(
        "Read {} rows -> {} monthly records across {} wells.\n",
        ingested.rows_read,
        ingested.rows_used,
        ingested.wells.len()
    );
    let output = pipeline::run_analysis(&ingested, &config, &run)?;

    present_output(&output, &run)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::sample::scenario_config()?;
    let run = run_config_from_args(&args.output);

    let ingested = if args.random {
        crate::data::sample::generate_random(args.seed, args.wells, args.months)?
    } else {
        crate::data::sample::scenario_records()
    };
    let output = pipeline::run_analysis(&ingested, &config, &run)?;

    present_output(&output, &run)
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.source)?;
    let client = crate::data::agency::AgencyClient::from_config(&config)?;

    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        AppError::new(4, format!("Failed to create '{}': {e}", args.out_dir.display()))
    })?;

    for (i, well) in args.wells.iter().enumerate() {
        if i > 0 && args.pause_secs > 0 {
            std::thread::sleep(std::time::Duration::from_secs(args.pause_secs));
        }
        let components = crate::data::agency::url_components_from_api(well);
        let url = client.production_url(&components);
        println!("Fetching {well} ...");
        let text = client.fetch_text(&url)?;

        let path = args.out_dir.join(format!("{well}.csv"));
        std::fs::write(&path, text)
            .map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))?;
        println!("  saved {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let summary = crate::io::summary::read_summary_json(&args.summary)?;

    for section in &summary.analyses {
        let analysis = section.to_analysis(summary.threshold_days);
        println!(
            "{}\n",
            crate::report::format_analysis_section(&analysis, summary.threshold_days)
        );
    }

    let strips: Vec<StripRow> = summary
        .analyses
        .iter()
        .map(|a| StripRow {
            label: a.label.clone(),
            states: a.states.clone(),
        })
        .collect();
    let plot = crate::plot::render_ascii_plot(
        &summary.months,
        &summary.monthly_oil,
        &summary.monthly_gas,
        &strips,
        args.width,
        args.height,
    );
    println!("{plot}");

    if let Some(path) = &args.chart {
        let first = summary
            .analyses
            .first()
            .ok_or_else(|| AppError::new(2, "Summary JSON contains no analyses."))?;
        let gaps = first.to_analysis(summary.threshold_days);
        crate::plot::render_svg_chart(
            path,
            &summary.months,
            &summary.monthly_oil,
            &summary.monthly_gas,
            &gaps,
        )?;
        println!("Chart written to {}", path.display());
    }

    Ok(())
}

/// Print the report/plot and write any requested exports.
fn present_output(output: &pipeline::AnalysisOutput, run: &RunConfig) -> Result<(), AppError> {
    println!("{}", crate::report::format_report(output, run.threshold_days));

    if run.plot && !output.timeline.is_empty() {
        let months: Vec<chrono::NaiveDate> =
            output.timeline.months.iter().map(|m| m.month).collect();
        let oil: Vec<f64> = output.monthly_totals.iter().map(|t| t.oil).collect();
        let gas: Vec<f64> = output.monthly_totals.iter().map(|t| t.gas).collect();
        let strips = vec![
            StripRow {
                label: output.gaps_excluded.label.clone(),
                states: output.combined_excluded.iter().map(|&(_, s)| s).collect(),
            },
            StripRow {
                label: output.gaps_included.label.clone(),
                states: output.combined_included.iter().map(|&(_, s)| s).collect(),
            },
            StripRow {
                label: output.shutin_periods.label.clone(),
                states: output.combined_shutin.iter().map(|&(_, s)| s).collect(),
            },
        ];
        let plot = crate::plot::render_ascii_plot(
            &months,
            &oil,
            &gas,
            &strips,
            run.plot_width,
            run.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &run.export_intervals {
        crate::io::export::write_intervals_csv(path, &output.analyses())?;
        println!("Intervals written to {}", path.display());
    }
    if let Some(path) = &run.export_summary {
        let summary = crate::io::summary::SummaryFile::from_output(output, run.threshold_days);
        crate::io::summary::write_summary_json(path, &summary)?;
        println!("Summary written to {}", path.display());
    }
    if let Some(path) = &run.chart {
        let months: Vec<chrono::NaiveDate> =
            output.timeline.months.iter().map(|m| m.month).collect();
        let oil: Vec<f64> = output.monthly_totals.iter().map(|t| t.oil).collect();
        let gas: Vec<f64> = output.monthly_totals.iter().map(|t| t.gas).collect();
        crate::plot::render_svg_chart(path, &months, &oil, &gas, &output.gaps_excluded)?;
        println!("Chart written to {}", path.display());
    }

    Ok(())
}

/// Pick the column configuration from `--config` or `--state`.
fn resolve_config(source: &SourceArgs) -> Result<ColumnConfig, AppError> {
    if let Some(path) = &source.config {
        return crate::config::load_config_file(path);
    }
    if let Some(state) = source.state {
        return crate::config::preset(state);
    }
    Err(AppError::new(
        2,
        "No column configuration: pass --state <co|mt|nd|wy> or --config <file>.",
    ))
}

pub fn run_config_from_args(args: &OutputArgs) -> RunConfig {
    RunConfig {
        threshold_days: args.threshold_days,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_intervals: args.export.clone(),
        export_summary: args.export_summary.clone(),
        chart: args.chart.clone(),
    }
}

/// Rewrite argv so `pg` defaults to `pg sample`.
///
/// Rules:
/// - `pg`                      -> `pg sample`
/// - `pg -t 90 ...`            -> `pg sample -t 90 ...`
/// - `pg --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sample".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "fetch" | "sample" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "sample flags".
    if arg1.starts_with('-') {
        argv.insert(1, "sample".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
