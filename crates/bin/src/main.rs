//! factsheet CLI binary.
//!
//! Reads a spreadsheet of CIKs, fetches each company's SEC EDGAR facts and
//! exports the latest value of every whitelisted metric.

use clap::Parser;
use factsheet::{Pipeline, PipelineConfig, load_ciks};
use factsheet_output::{DEFAULT_EXPORT_FILE, ExportFormat, Exporter, to_ascii_table};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "factsheet")]
#[command(about = "SEC financial data extractor: latest US GAAP metrics for a list of CIKs", long_about = None)]
#[command(version)]
struct Cli {
    /// Workbook (.xlsx, .xls, .ods) or CSV file with a "CIK" column
    input: PathBuf,

    /// Export file (defaults to financials.csv, or financials.json for JSON formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format: csv, json or pretty-json
    #[arg(long, default_value = "csv")]
    format: ExportFormat,

    /// Config file (defaults to the platform config directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause before each SEC request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// User-Agent identity sent to the SEC
    #[arg(long)]
    user_agent: Option<String>,

    /// Reporting unit to read
    #[arg(long)]
    unit: Option<String>,

    /// Do not print the result table
    #[arg(long)]
    no_table: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = resolve_config(&cli)?;

    // Validation errors surface here, before any request is made
    let ciks = load_ciks(&cli.input)?;

    let client = config.edgar_client()?;
    let pipeline = Pipeline::from_config(client, &config);

    let pb = ProgressBar::new(ciks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Fetching data from SEC...");

    let output = pipeline
        .run_with_progress(&ciks, |progress| {
            pb.set_position(progress.index as u64 + 1);
            pb.set_message(format!("CIK {}", progress.cik));
        })
        .await;
    pb.finish_and_clear();

    if output.is_empty() {
        println!(
            "No financial data retrieved for {} identifier(s); nothing to export.",
            ciks.len()
        );
        return Ok(());
    }

    println!(
        "Data retrieved successfully! {} records for {} of {} companies.",
        output.summary.records,
        output.summary.companies_with_records,
        output.summary.identifiers
    );

    if !cli.no_table {
        print!("{}", to_ascii_table(&output.records));
    }

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(cli.format));
    output.records.export_to_file(&path, cli.format)?;
    info!(path = %path.display(), "export written");
    println!("Saved {}", path.display());

    Ok(())
}

/// Config file (explicit or default location) with command-line overrides applied.
fn resolve_config(cli: &Cli) -> Result<PipelineConfig, factsheet::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::load_or_default()?,
    };

    if let Some(delay_ms) = cli.delay_ms {
        config.courtesy_delay_ms = delay_ms;
    }
    if let Some(user_agent) = &cli.user_agent {
        config.identity_string = user_agent.clone();
    }
    if let Some(unit) = &cli.unit {
        config.reporting_unit = unit.clone();
    }

    config.validate()?;
    Ok(config)
}

fn default_output_path(format: ExportFormat) -> PathBuf {
    Path::new(DEFAULT_EXPORT_FILE).with_extension(format.extension())
}

/// Log to stderr so the table on stdout stays clean. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,factsheet={level},factsheet_data={level},factsheet_bin={level}"
        ))
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
