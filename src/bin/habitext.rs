//! Habitext CLI - Command-line interface for habitext
//!
//! Commands:
//! - transform: Normalize habit logs into tabular series output
//! - validate: Parse logs and report malformed files without emitting output
//!
//! Inputs are markdown habit logs: a single file, a directory of `.md`
//! files, or `-` for one log on stdin. Malformed files are skipped and
//! reported; the remaining files still produce output.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use habitext::export::{CompleteRow, EntryRow, ReportEncoder};
use habitext::pipeline::{process_batch, BatchOutcome};
use habitext::HABITEXT_VERSION;

/// Habitext - habit-log parsing and calendar normalization engine
#[derive(Parser)]
#[command(name = "habitext")]
#[command(version = HABITEXT_VERSION)]
#[command(about = "Normalize markdown habit logs into daily time series", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize habit logs into tabular series output
    Transform {
        /// Input path: a log file, a directory of .md logs, or - for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Which series to emit
        #[arg(long, default_value = "report")]
        stage: StageSelect,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Parse logs and report malformed files without emitting output
    Validate {
        /// Input path: a log file, a directory of .md logs, or - for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StageSelect {
    /// Pre-aggregation observations (Name..Goal columns)
    Records,
    /// One row per (habit, date) with summed minutes
    Daily,
    /// Calendar-complete daily series with the two-week lead-in
    Complete,
    /// Full report payload with secondary aggregations and provenance
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one row per line)
    Ndjson,
    /// JSON array
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Returns Ok(true) when every input processed cleanly.
fn run(cli: Cli) -> Result<bool, HabitextCliError> {
    match cli.command {
        Commands::Transform {
            input,
            output,
            stage,
            output_format,
        } => cmd_transform(&input, &output, stage, output_format),
        Commands::Validate { input, json } => cmd_validate(&input, json),
    }
}

fn cmd_transform(
    input: &Path,
    output: &Path,
    stage: StageSelect,
    output_format: OutputFormat,
) -> Result<bool, HabitextCliError> {
    let inputs = read_inputs(input)?;
    let outcome = process_batch(
        inputs
            .iter()
            .map(|(label, text)| (label.as_str(), text.as_str())),
    );

    report_failures(&outcome);

    let output_data = match stage {
        StageSelect::Records => {
            let rows: Vec<EntryRow> = outcome
                .reports
                .iter()
                .flat_map(|(_, r)| r.entries.iter().map(EntryRow::from))
                .collect();
            format_rows(&rows, output_format)?
        }
        StageSelect::Daily => {
            let rows: Vec<_> = outcome
                .reports
                .iter()
                .flat_map(|(_, r)| r.daily.iter().cloned())
                .collect();
            format_rows(&rows, output_format)?
        }
        StageSelect::Complete => {
            let rows: Vec<CompleteRow> = outcome
                .reports
                .iter()
                .flat_map(|(_, r)| r.complete.iter().map(CompleteRow::from))
                .collect();
            format_rows(&rows, output_format)?
        }
        StageSelect::Report => {
            let encoder = ReportEncoder::new();
            let reports: Vec<_> = outcome.reports.iter().map(|(_, r)| r.clone()).collect();
            let payload = encoder.encode(&reports, &outcome.failures);
            match output_format {
                OutputFormat::Ndjson | OutputFormat::Json => serde_json::to_string(&payload)?,
                OutputFormat::JsonPretty => serde_json::to_string_pretty(&payload)?,
            }
        }
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(outcome.failures.is_empty())
}

fn cmd_validate(input: &Path, json: bool) -> Result<bool, HabitextCliError> {
    let inputs = read_inputs(input)?;
    let outcome = process_batch(
        inputs
            .iter()
            .map(|(label, text)| (label.as_str(), text.as_str())),
    );

    let report = ValidationReport {
        total_files: inputs.len(),
        valid_files: outcome.reports.len(),
        skipped_files: outcome.skipped.clone(),
        failures: &outcome.failures,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total files:   {}", report.total_files);
        println!("Valid files:   {}", report.valid_files);
        println!("Skipped files: {}", report.skipped_files.len());
        println!("Failed files:  {}", report.failures.len());

        for skipped in &report.skipped_files {
            println!("  - {} skipped: log body is empty", skipped);
        }
        if !report.failures.is_empty() {
            println!("\nErrors:");
            for failure in report.failures {
                println!(
                    "  - {} failed at {}: {}",
                    failure.file,
                    failure.stage.as_str(),
                    failure.error
                );
            }
        }
    }

    Ok(outcome.failures.is_empty())
}

// Helper functions

/// Collect (label, text) inputs from a file, a directory of .md logs, or stdin.
fn read_inputs(input: &Path) -> Result<Vec<(String, String)>, HabitextCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading log text from terminal; pipe a file or press Ctrl-D to finish");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![("<stdin>".to_string(), buffer)]);
    }

    if input.is_dir() {
        let mut paths: Vec<PathBuf> = fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(HabitextCliError::NoInputs(input.display().to_string()));
        }

        let mut inputs = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path)?;
            inputs.push((path.display().to_string(), text));
        }
        return Ok(inputs);
    }

    let text = fs::read_to_string(input)?;
    Ok(vec![(input.display().to_string(), text)])
}

fn report_failures(outcome: &BatchOutcome) {
    for skipped in &outcome.skipped {
        eprintln!("{}: skipped, log body is empty", skipped);
    }
    for failure in &outcome.failures {
        eprintln!(
            "{}: failed at {} stage: {}",
            failure.file,
            failure.stage.as_str(),
            failure.error
        );
    }
}

fn format_rows<T: serde::Serialize>(
    rows: &[T],
    format: OutputFormat,
) -> Result<String, HabitextCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::with_capacity(rows.len());
            for row in rows {
                lines.push(serde_json::to_string(row)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(rows)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(rows)?),
    }
}

// Error types

#[derive(Debug)]
enum HabitextCliError {
    Io(io::Error),
    Json(serde_json::Error),
    NoInputs(String),
}

impl From<io::Error> for HabitextCliError {
    fn from(e: io::Error) -> Self {
        HabitextCliError::Io(e)
    }
}

impl From<serde_json::Error> for HabitextCliError {
    fn from(e: serde_json::Error) -> Self {
        HabitextCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<HabitextCliError> for CliError {
    fn from(e: HabitextCliError) -> Self {
        match e {
            HabitextCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            HabitextCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check output destination".to_string()),
            },
            HabitextCliError::NoInputs(dir) => CliError {
                code: "NO_INPUTS".to_string(),
                message: format!("No .md log files found in {dir}"),
                hint: Some("Point --input at a log file or a directory containing .md logs".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport<'a> {
    total_files: usize,
    valid_files: usize,
    skipped_files: Vec<String>,
    failures: &'a [habitext::FileFailure],
}
