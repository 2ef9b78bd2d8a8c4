//! Test helpers for constructing `PullRequest` fixtures and search payloads.
//!
//! # Examples
//!
//! ```
//! use prsweep::github::models::test_support::{pull_request, search_page_json};
//!
//! let pr = pull_request(42);
//! assert_eq!(pr.title, "PR #42");
//!
//! let page = search_page_json(1, 3);
//! assert_eq!(page["items"].as_array().map(Vec::len), Some(3));
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use super::PullRequest;

/// Fixed creation timestamp used by every fixture.
#[must_use]
pub fn fixture_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Constructs a pull request whose title and URL derive from `number`.
#[must_use]
pub fn pull_request(number: u64) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR #{number}"),
        url: format!("https://github.com/owner/repo/pull/{number}"),
        created_at: fixture_created_at(),
    }
}

/// Builds a `/search/issues` response body with `count` items numbered from
/// `first_number` upwards.
#[must_use]
pub fn search_page_json(first_number: u64, count: u64) -> Value {
    let items: Vec<Value> = (first_number..first_number.saturating_add(count))
        .map(|number| {
            json!({
                "number": number,
                "title": format!("PR #{number}"),
                "html_url": format!("https://github.com/owner/repo/pull/{number}"),
                "state": "open",
                "created_at": "2024-01-01T00:00:00Z"
            })
        })
        .collect();

    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items
    })
}
