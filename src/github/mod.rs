//! GitHub issue search for pull request reports.
//!
//! This module wraps Octocrab to run repository-scoped issue searches, drain
//! every result page, and wait out rate-limit responses. Errors are mapped
//! into [`ReportError`] variants so callers can log precise failures without
//! exposing Octocrab internals.

pub mod backoff;
pub mod error;
pub mod fetcher;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod query;
pub mod rate_limit;

pub use backoff::{Sleeper, TokioSleeper};
pub use error::ReportError;
pub use fetcher::{PullRequestFetcher, SearchResults};
pub use gateway::{OctocrabSearchGateway, SearchClientConfig, SearchGateway, SearchPage};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::PullRequest;
pub use query::{ReportPlan, ReportQuery, SearchQuery};

#[cfg(any(test, feature = "test-support"))]
pub use backoff::RecordingSleeper;

#[cfg(test)]
pub use backoff::MockSleeper;
#[cfg(test)]
pub use gateway::MockSearchGateway;
