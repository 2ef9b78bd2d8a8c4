//! Pull request report library built on GitHub issue search.
//!
//! The library runs a fixed set of report queries (stale, review required,
//! passing checks, no reviewers) against configured repositories. Each search
//! is drained across pages while waiting out rate limits, and results are
//! written to text files and, optionally, a Google spreadsheet.

pub mod config;
pub mod github;
pub mod report;
pub mod telemetry;

pub use config::PrSweepConfig;
pub use github::{
    OctocrabSearchGateway, PersonalAccessToken, PullRequest, PullRequestFetcher, ReportError,
    ReportPlan, ReportQuery, RepositoryLocator, SearchClientConfig, SearchQuery, SearchResults,
};
pub use report::{RepositorySummary, run_reports};
