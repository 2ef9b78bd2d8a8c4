//! Mock search API responses for the search pagination behavioural tests.

use prsweep::github::models::test_support::search_page_json;
use rstest_bdd::Slot;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::domain::{HttpStatus, PageNumber, PullRequestCount, WaitSeconds};
use super::runtime::{SharedRuntime, mount};

const SEARCH_PATH: &str = "/search/issues";
const PAGE_SIZE: u64 = 100;
const FAILURE_PRIORITY: u8 = 1;

/// Serves `total` pull requests, numbered from 1, in pages of 100.
///
/// A page past the end of the data returns an empty item list.
pub(crate) fn mount_search_results(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    total: PullRequestCount,
) {
    let mut page: u64 = 1;
    loop {
        let first = (page - 1) * PAGE_SIZE + 1;
        let remaining = total.value().saturating_sub(first - 1);
        let count = remaining.min(PAGE_SIZE);
        let mock = Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page_json(first, count)));
        mount(runtime, server, mock);

        if count < PAGE_SIZE {
            break;
        }
        page += 1;
    }
}

/// Answers the first request for `page` with an exhausted-quota 403.
pub(crate) fn mount_rate_limited_page(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    page: PageNumber,
    wait: WaitSeconds,
) {
    let response = ResponseTemplate::new(403)
        .set_body_json(json!({ "message": "API rate limit exceeded for user" }))
        .insert_header("X-RateLimit-Remaining", "0")
        .insert_header("Retry-After", wait.value().to_string());
    let mock = Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page.value().to_string()))
        .respond_with(response)
        .up_to_n_times(1)
        .with_priority(FAILURE_PRIORITY);
    mount(runtime, server, mock);
}

/// Makes every request for `page` fail with `status`.
pub(crate) fn mount_failing_page(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    page: PageNumber,
    status: HttpStatus,
) {
    let response = ResponseTemplate::new(status.value())
        .set_body_json(json!({ "message": "Server Error" }));
    let mock = Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page.value().to_string()))
        .respond_with(response)
        .with_priority(FAILURE_PRIORITY);
    mount(runtime, server, mock);
}
