//! The per-repository report job.

use std::sync::Arc;

use camino::Utf8PathBuf;
use tracing::{info, warn};

use crate::github::{
    PullRequest, PullRequestFetcher, ReportError, ReportPlan, ReportQuery, RepositoryLocator, SearchGateway,
    SearchQuery, Sleeper,
};

use super::{FileSink, SpreadsheetSink, report_file_name};

/// What happened to one report for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// The report that ran.
    pub query: ReportQuery,
    /// Pull requests gathered, including partial results.
    pub pull_requests: usize,
    /// False when the fetch stopped early on a failure.
    pub complete: bool,
    /// Fetch and sink failures, in the order they occurred.
    pub errors: Vec<ReportError>,
}

/// Outcome of every report for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Repository the reports ran against.
    pub repository: RepositoryLocator,
    /// One entry per report, in run order.
    pub reports: Vec<QueryOutcome>,
}

impl RepositorySummary {
    /// Total pull requests gathered across all reports.
    #[must_use]
    pub fn total_pull_requests(&self) -> usize {
        self.reports.iter().map(|report| report.pull_requests).sum()
    }

    /// Number of reports that recorded at least one error.
    #[must_use]
    pub fn failed_reports(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| !report.errors.is_empty())
            .count()
    }
}

/// Runs the report plan against a repository and delivers each result.
pub struct ReportJob<G, S> {
    fetcher: PullRequestFetcher<G, S>,
    file_sink: Arc<dyn FileSink>,
    spreadsheet_sink: Option<Arc<dyn SpreadsheetSink>>,
    plan: ReportPlan,
}

impl<G, S> ReportJob<G, S>
where
    G: SearchGateway,
    S: Sleeper,
{
    /// Creates a job that writes text files and, optionally, spreadsheet
    /// rows.
    #[must_use]
    pub fn new(
        fetcher: PullRequestFetcher<G, S>,
        file_sink: Arc<dyn FileSink>,
        spreadsheet_sink: Option<Arc<dyn SpreadsheetSink>>,
        plan: ReportPlan,
    ) -> Self {
        Self {
            fetcher,
            file_sink,
            spreadsheet_sink,
            plan,
        }
    }

    /// Runs every report for `repository` in order.
    ///
    /// Failures are logged and recorded in the summary; they never stop the
    /// remaining reports.
    pub async fn run(&self, repository: &RepositoryLocator) -> RepositorySummary {
        let mut reports = Vec::with_capacity(ReportQuery::ALL.len());
        for (query, fragment) in self.plan.entries() {
            reports.push(self.run_query(repository, query, fragment).await);
        }

        RepositorySummary {
            repository: repository.clone(),
            reports,
        }
    }

    async fn run_query(
        &self,
        repository: &RepositoryLocator,
        query: ReportQuery,
        fragment: String,
    ) -> QueryOutcome {
        let sheet = query.sheet_name();
        let results = self
            .fetcher
            .fetch(&SearchQuery::new(repository.clone(), fragment))
            .await;

        let mut outcome = QueryOutcome {
            query,
            pull_requests: results.pull_requests.len(),
            complete: results.is_complete(),
            errors: Vec::new(),
        };

        if let Some(failure) = results.failure {
            warn!(
                %repository,
                report = sheet,
                fetched = outcome.pull_requests,
                "report fetch incomplete: {failure}"
            );
            outcome.errors.push(failure);
        }

        if results.pull_requests.is_empty() {
            info!(%repository, report = sheet, "no pull requests found; skipping report");
            return outcome;
        }

        let pull_requests: Arc<[PullRequest]> = results.pull_requests.into();
        let file_name = report_file_name(repository.repository(), query);
        match self.write_file(file_name, Arc::clone(&pull_requests)).await {
            Ok(path) => info!(
                %repository,
                report = sheet,
                path = %path,
                count = outcome.pull_requests,
                "wrote report file"
            ),
            Err(error) => {
                warn!(%repository, report = sheet, "failed to write report file: {error}");
                outcome.errors.push(error);
            }
        }

        if let Some(sink) = &self.spreadsheet_sink {
            if let Err(error) = sink.append_report(sheet, &pull_requests).await {
                warn!(%repository, report = sheet, "failed to update spreadsheet: {error}");
                outcome.errors.push(error);
            }
        }

        outcome
    }

    /// File writes block, so they run on the blocking pool.
    async fn write_file(
        &self,
        file_name: String,
        pull_requests: Arc<[PullRequest]>,
    ) -> Result<Utf8PathBuf, ReportError> {
        let sink = Arc::clone(&self.file_sink);
        tokio::task::spawn_blocking(move || sink.write_report(&file_name, &pull_requests))
            .await
            .map_err(|error| ReportError::Io {
                message: format!("report file task failed: {error}"),
            })?
    }
}
