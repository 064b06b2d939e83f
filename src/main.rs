// Entry point and high-level CLI flow.
//
// Reads a Meta Ads CSV export, derives CTR/CPC, writes the Excel report
// and prints a short preview. Exit code 0 on success, 1 on any report
// failure; clap exits with 2 on bad arguments.
use std::path::PathBuf;
use std::process::ExitCode;

use admetric_pro::config::DEFAULT_CPC_THRESHOLD;
use admetric_pro::error::ErrorKind;
use admetric_pro::{assembler, loader, metrics, output, util, ReportConfig, ReportError};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Number of flagged campaigns shown in the console preview.
const FLAGGED_PREVIEW_ROWS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "AdMetric Pro")]
#[command(about = "Transform Meta Ads CSV exports into client-ready Excel reports.")]
#[command(version)]
struct Cli {
    /// Path to the Meta Ads CSV file exported from Ads Manager
    input_file: PathBuf,

    /// Output directory for the Excel report
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// CPC threshold for red highlighting, in ZAR
    #[arg(short = 't', long, default_value_t = DEFAULT_CPC_THRESHOLD, value_parser = parse_threshold)]
    cpc_threshold: f64,

    /// Enable verbose logging output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("threshold must be a non-negative number, got {}", s));
    }
    Ok(value)
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "admetric_pro=debug"
    } else {
        "admetric_pro=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<PathBuf, ReportError> {
    let config = ReportConfig::default().with_cpc_threshold(cli.cpc_threshold);
    let style = &config.style;

    info!("Step 1/3: Reading Meta Ads CSV...");
    let records = loader::load_campaigns(&cli.input_file)?;
    info!(
        "Loaded {} campaigns from {}",
        util::format_int(records.len() as u64),
        cli.input_file.display()
    );

    info!("Step 2/3: Calculating CTR and CPC metrics...");
    let enriched = metrics::enrich_all(records)?;
    if config.cpc_threshold != DEFAULT_CPC_THRESHOLD {
        info!("Using custom CPC threshold: {:.2}", config.cpc_threshold);
    }

    info!("Step 3/3: Generating Excel report...");
    let outcome = assembler::generate_report(&enriched, &config, &cli.output)?;
    let symbol = &style.currency_symbol;
    info!("Total Spend: {}", util::format_currency(symbol, outcome.summary.total_spend));
    info!("Average CPC: {}", util::format_currency(symbol, outcome.summary.average_cpc));
    info!(
        "Campaigns with CPC > {}: {}",
        util::format_currency(symbol, config.cpc_threshold),
        outcome.flagged
    );

    output::preview_summary(&outcome.summary, style);
    if outcome.flagged > 0 {
        output::preview_flagged(&enriched, config.cpc_threshold, style, FLAGGED_PREVIEW_ROWS);
    }
    Ok(outcome.path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("AdMetric Pro - Meta Ads Report Generator");
    match run(&cli) {
        Ok(path) => {
            println!("Report generated: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let label = match e.kind() {
                ErrorKind::Input => "Input error",
                ErrorKind::MalformedRecord => "Data validation error",
                ErrorKind::RenderFailure => "Failed to write report",
            };
            error!(kind = ?e.kind(), "report generation failed");
            eprintln!("{}: {}", label, e);
            ExitCode::FAILURE
        }
    }
}
