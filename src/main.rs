//! CLI entry point for the rank grader.
//!
//! Provides subcommands for grading a single subject, averaging a file of
//! subject records, and listing the percentile ranges of the active scale.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rank_grader::config::Settings;
use rank_grader::grading::grade::percentile;
use rank_grader::grading::{GradeEngine, Subject};
use rank_grader::input::load_subjects;
use rank_grader::output::{append_records, print_json, print_pretty, write_json};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rank_grader")]
#[command(about = "Percentile grades from class rank data", long_about = None)]
struct Cli {
    /// Grading scale: "9" or "5" (overrides GRADE_SCALE)
    #[arg(short, long, global = true)]
    scale: Option<String>,

    /// JSON file with a custom boundary table (overrides GRADE_TABLE_PATH)
    #[arg(short, long, global = true, value_name = "FILE")]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single subject
    Grade {
        /// Subject name
        name: String,

        /// Rank within the cohort (1 = top)
        #[arg(long, allow_negative_numbers = true)]
        rank: i64,

        /// Number of students sharing this rank
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        same_rank: i64,

        /// Number of students in the cohort
        #[arg(long, allow_negative_numbers = true)]
        completer: i64,

        /// Credit units of the subject
        #[arg(long, default_value_t = 1)]
        unit: i64,
    },
    /// Grade every subject in a CSV or JSON file and report the average
    Average {
        /// Path to the subject file (.csv or .json)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the full report as JSON to this path
        #[arg(short, long)]
        output: Option<String>,

        /// CSV file to append per-subject rows to
        #[arg(long)]
        csv: Option<String>,
    },
    /// List the percentile range of each grade
    Boundaries,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_overrides(cli.scale.as_deref(), cli.table.clone())?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rank_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let engine = settings.engine()?;
    info!(scale = %settings.scale, table = engine.table().name(), "Grade engine ready");

    match cli.command {
        Commands::Grade {
            name,
            rank,
            same_rank,
            completer,
            unit,
        } => {
            let subject = Subject::new(&name, unit, rank, same_rank, completer);
            grade_one(&engine, &subject)?;
        }
        Commands::Average { input, output, csv } => {
            average_file(&engine, &input, output.as_deref(), csv.as_deref())?;
        }
        Commands::Boundaries => {
            for (boundary, range) in engine
                .table()
                .boundaries()
                .iter()
                .zip(engine.grade_boundaries())
            {
                info!(grade = boundary.grade, range = %range, "Grade range");
            }
        }
    }

    Ok(())
}

/// Grades a single subject given on the command line.
#[tracing::instrument(skip(engine, subject), fields(subject = %subject.name))]
fn grade_one(engine: &GradeEngine, subject: &Subject) -> Result<()> {
    let grade = engine.grade_subject(subject)?;

    info!(
        percentile = percentile(subject.rank, subject.same_rank, subject.completer),
        grade,
        "Subject graded"
    );
    Ok(())
}

/// Loads a subject file, grades it, and writes the requested outputs.
#[tracing::instrument(skip(engine, input), fields(input = %input.display()))]
fn average_file(
    engine: &GradeEngine,
    input: &Path,
    output: Option<&str>,
    csv: Option<&str>,
) -> Result<()> {
    let loaded = load_subjects(input)?;
    if !loaded.rejected.is_empty() {
        warn!(
            rejected = loaded.rejected.len(),
            "Some records could not be read"
        );
    }

    let mut report = engine
        .report(&loaded.subjects)
        .with_context(|| format!("failed to grade subjects from {}", input.display()))?;
    report.rejected = loaded.rejected;

    print_pretty(&report);
    print_json(&report)?;

    if let Some(path) = output {
        write_json(path, &report)?;
        info!(path, "Report saved");
    }
    if let Some(path) = csv {
        append_records(path, &report.subjects)?;
        info!(path, "Rows appended");
    }

    info!(
        average = report.summary.average,
        graded = report.summary.graded_count,
        skipped = report.summary.skipped.len(),
        rejected = report.rejected.len(),
        "Average grade"
    );
    Ok(())
}
