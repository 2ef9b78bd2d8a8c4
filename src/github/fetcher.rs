//! Draining a repository search across pages.
//!
//! [`PullRequestFetcher`] walks the search result set page by page, waits out
//! rate-limit responses on the same page, and stops on a short page or at the
//! page cap. Failures do not discard earlier pages: the fetcher returns what
//! it gathered together with the error that stopped it.

use tracing::{debug, warn};

use super::backoff::{Sleeper, TokioSleeper};
use super::error::ReportError;
use super::gateway::{OctocrabSearchGateway, SearchClientConfig, SearchGateway, SearchPage};
use super::models::PullRequest;
use super::pagination::PageCursor;
use super::query::SearchQuery;

/// Pull requests gathered for one query.
///
/// When `failure` is set the list holds only the pages fetched before the
/// failure and callers should treat it as best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Pull requests in API order.
    pub pull_requests: Vec<PullRequest>,
    /// The error that ended pagination early, if any.
    pub failure: Option<ReportError>,
}

impl SearchResults {
    /// Returns true when every page up to the natural end or the cap was read.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns true when no pull requests were gathered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pull_requests.is_empty()
    }
}

/// Fetches every pull request matching a search query.
pub struct PullRequestFetcher<G, S = TokioSleeper> {
    gateway: G,
    sleeper: S,
}

impl PullRequestFetcher<OctocrabSearchGateway, TokioSleeper> {
    /// Builds a fetcher that talks to GitHub through Octocrab.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingToken` when the configuration has no
    /// usable token; no request is sent in that case. See
    /// [`OctocrabSearchGateway::from_config`] for the other failures.
    pub fn from_config(config: &SearchClientConfig) -> Result<Self, ReportError> {
        let gateway = OctocrabSearchGateway::from_config(config)?;
        Ok(Self::new(gateway, TokioSleeper))
    }
}

impl<G, S> PullRequestFetcher<G, S>
where
    G: SearchGateway,
    S: Sleeper,
{
    /// Creates a fetcher from a gateway and a backoff sleeper.
    #[must_use]
    pub const fn new(gateway: G, sleeper: S) -> Self {
        Self { gateway, sleeper }
    }

    /// Fetches all pages for `query`.
    ///
    /// Rate-limited pages are retried after the server-requested wait with no
    /// retry limit. Pagination stops on the first page with fewer than a full
    /// page of items, after the page cap, or on any other failure.
    pub async fn fetch(&self, query: &SearchQuery) -> SearchResults {
        let rendered = query.render();
        let mut cursor = PageCursor::default();
        let mut pull_requests = Vec::new();

        loop {
            let page = cursor.current_page();
            let outcome = self
                .gateway
                .search_page(&rendered, page, cursor.per_page())
                .await;

            match outcome {
                Ok(SearchPage::RateLimited(signal)) => {
                    let wait = signal.backoff();
                    warn!(
                        query = %rendered,
                        page,
                        wait_secs = wait.as_secs(),
                        "search rate limited; waiting before retrying the same page"
                    );
                    self.sleeper.sleep(wait).await;
                }
                Ok(SearchPage::Items(items)) => {
                    let item_count = items.len();
                    debug!(query = %rendered, page, item_count, "fetched search page");
                    pull_requests.extend(items);

                    if !cursor.advance(item_count) {
                        break;
                    }
                }
                Err(error) => {
                    warn!(
                        query = %rendered,
                        page,
                        fetched = pull_requests.len(),
                        "search failed: {error}"
                    );
                    return SearchResults {
                        pull_requests,
                        failure: Some(error),
                    };
                }
            }
        }

        SearchResults {
            pull_requests,
            failure: None,
        }
    }
}
