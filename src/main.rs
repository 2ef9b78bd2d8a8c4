//! prsweep CLI entrypoint: runs every report for the configured repositories.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prsweep::telemetry::init_tracing;
use prsweep::{PrSweepConfig, ReportError, RepositorySummary, run_reports};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReportError> {
    let config = load_config()?;
    let summaries = run_reports(&config).await?;

    write_summary(&summaries)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PrSweepConfig, ReportError> {
    PrSweepConfig::load().map_err(|error| ReportError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(summaries: &[RepositorySummary]) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    for summary in summaries {
        writeln!(
            stdout,
            "{}: {} pull requests across {} reports ({} with errors)",
            summary.repository,
            summary.total_pull_requests(),
            summary.reports.len(),
            summary.failed_reports()
        )
        .map_err(|error| ReportError::Io {
            message: error.to_string(),
        })?;
    }
    Ok(())
}
