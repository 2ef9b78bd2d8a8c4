//! Gateways for running issue searches through Octocrab.
//!
//! [`SearchGateway`] issues a single page request. Pagination and backoff live
//! in [`crate::github::fetcher`], so tests can drive that loop with a mocked
//! gateway while the Octocrab implementation handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod search;

pub use search::{DEFAULT_API_BASE, OctocrabSearchGateway, SearchClientConfig};

use async_trait::async_trait;

use crate::github::error::ReportError;
use crate::github::models::PullRequest;
use crate::github::rate_limit::RateLimitSignal;

/// Outcome of a single search page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPage {
    /// The page was served; items are in API order.
    Items(Vec<PullRequest>),
    /// GitHub refused the request because the quota is exhausted.
    RateLimited(RateLimitSignal),
}

/// Gateway that can run one page of an issue search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Fetch page `page` (1-based) of the search `query`.
    async fn search_page(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage, ReportError>;
}
