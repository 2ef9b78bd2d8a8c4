//! Data models for pull requests returned by the issue search API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// A pull request matched by a report query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: String,
    /// HTML URL for displaying to a user.
    pub url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PullRequest {
    /// Creation timestamp in the `2024-01-01T00:00:00Z` form GitHub uses.
    #[must_use]
    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// One page of the `/search/issues` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiSearchPage {
    #[serde(default)]
    pub(crate) total_count: u64,
    #[serde(default)]
    pub(crate) incomplete_results: bool,
    #[serde(default)]
    pub(crate) items: Vec<ApiIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<ApiIssue> for PullRequest {
    fn from(value: ApiIssue) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_default(),
            url: value.html_url.unwrap_or_default(),
            created_at: value.created_at,
        }
    }
}

impl ApiSearchPage {
    pub(crate) fn into_pull_requests(self) -> Vec<PullRequest> {
        self.items.into_iter().map(ApiIssue::into).collect()
    }
}
