//! Top-level driver: one task per repository, joined before returning.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::config::PrSweepConfig;
use crate::github::{
    PullRequestFetcher, ReportError, ReportPlan, RepositoryLocator, SearchGateway, Sleeper,
};

use super::{GoogleSheetsSink, ReportJob, RepositorySummary, SpreadsheetSink, TextFileSink};

/// Builds the fetcher and sinks from `config` and reports on every
/// configured repository.
///
/// Configuration is validated before any task starts, so a missing token or
/// malformed repository list fails without contacting GitHub.
///
/// # Errors
///
/// Returns [`ReportError::MissingToken`], [`ReportError::InvalidRepository`],
/// [`ReportError::InvalidUrl`], or [`ReportError::Configuration`] when the
/// configuration cannot produce a working job. Failures during the run are
/// logged and recorded in the summaries instead.
pub async fn run_reports(config: &PrSweepConfig) -> Result<Vec<RepositorySummary>, ReportError> {
    let repositories = config.repository_locators()?;
    let fetcher = PullRequestFetcher::from_config(&config.search_config()?)?;
    let spreadsheet_sink = config
        .sheets_config()
        .map(|sheets| GoogleSheetsSink::from_config(&sheets))
        .transpose()?
        .map(|sink| Arc::new(sink) as Arc<dyn SpreadsheetSink>);
    if spreadsheet_sink.is_none() {
        info!("spreadsheet sink not configured; writing text reports only");
    }

    let plan = ReportPlan::new(Utc::now().date_naive(), config.stale_after_days);
    let job = ReportJob::new(
        fetcher,
        Arc::new(TextFileSink::new(config.output_dir())),
        spreadsheet_sink,
        plan,
    );

    Ok(run_jobs(Arc::new(job), repositories).await)
}

/// Runs `job` for each repository on its own task and waits for all of
/// them.
///
/// Summaries are returned in input order. A task that panics is logged and
/// left out of the result.
pub async fn run_jobs<G, S>(
    job: Arc<ReportJob<G, S>>,
    repositories: Vec<RepositoryLocator>,
) -> Vec<RepositorySummary>
where
    G: SearchGateway + 'static,
    S: Sleeper + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, repository) in repositories.into_iter().enumerate() {
        let task_job = Arc::clone(&job);
        tasks.spawn(async move { (index, task_job.run(&repository).await) });
    }

    let mut completed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, summary)) => {
                info!(
                    repository = %summary.repository,
                    pull_requests = summary.total_pull_requests(),
                    failed_reports = summary.failed_reports(),
                    "repository reports finished"
                );
                completed.push((index, summary));
            }
            Err(join_error) => error!("repository report task failed: {join_error}"),
        }
    }

    completed.sort_by_key(|(index, _)| *index);
    completed.into_iter().map(|(_, summary)| summary).collect()
}
