//! Scenario state for the search pagination behavioural tests.

use prsweep::github::RecordingSleeper;
use prsweep::{
    OctocrabSearchGateway, PullRequestFetcher, ReportError, RepositoryLocator, SearchClientConfig,
    SearchQuery, SearchResults,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::{SharedRuntime, ensure_runtime_and_server, server_uri};

const QUERY_FRAGMENT: &str = "is:pr is:open";

#[derive(ScenarioState, Default)]
pub(crate) struct SearchState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) sleeper: Slot<RecordingSleeper>,
    pub(crate) results: Slot<SearchResults>,
}

/// Ensures the runtime and server are initialised in `SearchState`.
pub(crate) fn ensure_runtime(search_state: &SearchState) -> SharedRuntime {
    ensure_runtime_and_server(&search_state.runtime, &search_state.server)
}

/// Drains the search for `slug` against the mock server.
pub(crate) fn run_fetch(
    search_state: &SearchState,
    slug: &str,
) -> Result<SearchResults, ReportError> {
    let runtime = ensure_runtime(search_state);
    let locator = RepositoryLocator::parse_slug(slug)?;
    let config = SearchClientConfig::with_token("ghp_bdd").api_base(server_uri(&search_state.server));
    let sleeper = RecordingSleeper::default();
    search_state.sleeper.set(sleeper.clone());

    runtime.block_on(async {
        let gateway = OctocrabSearchGateway::from_config(&config)?;
        let fetcher = PullRequestFetcher::new(gateway, sleeper);
        Ok(fetcher.fetch(&SearchQuery::new(locator, QUERY_FRAGMENT)).await)
    })
}
