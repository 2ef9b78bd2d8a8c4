//! Scenario state and execution for the report run behavioural tests.

use std::str::FromStr;

use camino::Utf8PathBuf;
use prsweep::{PrSweepConfig, ReportError, RepositorySummary, run_reports};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;
use wiremock::MockServer;

use super::runtime::{SharedRuntime, ensure_runtime_and_server, server_uri};

/// Count of pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PullRequestCount(u64);

impl PullRequestCount {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for PullRequestCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Count of files or requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileCount(usize);

impl FileCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for FileCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct ReportRunState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) output: Slot<TempDir>,
    pub(crate) token: Slot<String>,
    pub(crate) repositories: Slot<String>,
    pub(crate) spreadsheet_id: Slot<String>,
    pub(crate) summaries: Slot<Vec<RepositorySummary>>,
    pub(crate) error: Slot<ReportError>,
}

impl ReportRunState {
    /// Directory that receives the text reports for this scenario.
    pub(crate) fn output_dir(&self) -> Utf8PathBuf {
        if self.output.with_ref(|_| ()).is_none() {
            let created = TempDir::new()
                .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
            self.output.set(created);
        }

        self.output
            .with_ref(|dir| Utf8PathBuf::from_path_buf(dir.path().join("reports")))
            .unwrap_or_else(|| panic!("output directory missing"))
            .unwrap_or_else(|path| panic!("non UTF-8 output path: {}", path.display()))
    }
}

/// Ensures the runtime and server are initialised in `ReportRunState`.
pub(crate) fn ensure_runtime(report_run_state: &ReportRunState) -> SharedRuntime {
    ensure_runtime_and_server(&report_run_state.runtime, &report_run_state.server)
}

/// Runs every report using configuration assembled from the scenario.
///
/// `GITHUB_TOKEN` is cleared so only the scenario token applies.
pub(crate) fn run(
    report_run_state: &ReportRunState,
) -> Result<Vec<RepositorySummary>, ReportError> {
    let runtime = ensure_runtime(report_run_state);
    let base = server_uri(&report_run_state.server);
    let config = PrSweepConfig {
        token: report_run_state.token.get(),
        repositories: report_run_state.repositories.get(),
        api_base: base.clone(),
        output_dir: report_run_state.output_dir().to_string(),
        spreadsheet_id: report_run_state.spreadsheet_id.get(),
        sheets_token: Some("ya29.bdd".to_owned()),
        sheets_api_base: base,
        ..Default::default()
    };

    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    runtime.block_on(run_reports(&config))
}
