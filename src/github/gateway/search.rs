//! Octocrab-backed gateway for the `/search/issues` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use http::Uri;
use http::header::HeaderMap;
use octocrab::Octocrab;
use url::Url;
use url::form_urlencoded;

use crate::github::error::ReportError;
use crate::github::locator::PersonalAccessToken;
use crate::github::models::ApiSearchPage;
use crate::github::rate_limit::rate_limited;

use super::client::build_octocrab_client;
use super::error_mapping::{map_http_error, map_octocrab_error};
use super::http_utils::{build_search_headers, extract_github_message};
use super::{SearchGateway, SearchPage};

/// Public GitHub API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SEARCH_PATH: &str = "/search/issues";

/// Settings for [`OctocrabSearchGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClientConfig {
    /// API base URL (e.g., `https://api.github.com`).
    pub api_base: String,
    /// Token sent as a bearer credential.
    pub token: Option<String>,
    /// Upper bound on a single page request.
    pub timeout: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchClientConfig {
    /// Creates configuration for the public API with the given token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Octocrab-backed search gateway.
pub struct OctocrabSearchGateway {
    client: Octocrab,
    headers: HeaderMap,
    timeout: Duration,
}

impl OctocrabSearchGateway {
    /// Builds a gateway from explicit configuration.
    ///
    /// The token is validated first, so a missing credential fails before a
    /// client is built or any request is sent.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingToken` when no usable token is configured,
    /// `ReportError::InvalidUrl` when the API base cannot be parsed, or
    /// `ReportError::Api` when Octocrab fails to construct a client.
    pub fn from_config(config: &SearchClientConfig) -> Result<Self, ReportError> {
        let token = PersonalAccessToken::new(config.token.as_deref().unwrap_or_default())?;
        let api_base = Url::parse(&config.api_base)
            .map_err(|error| ReportError::InvalidUrl(error.to_string()))?;

        let client = build_octocrab_client(&api_base)?;
        let headers = build_search_headers(&token)?;

        Ok(Self {
            client,
            headers,
            timeout: config.timeout,
        })
    }
}

fn search_uri(query: &str, page: u32, per_page: u8) -> Result<Uri, ReportError> {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("per_page", &per_page.to_string())
        .append_pair("page", &page.to_string())
        .finish();

    format!("{SEARCH_PATH}?{encoded}")
        .parse::<Uri>()
        .map_err(|error| ReportError::InvalidUrl(error.to_string()))
}

#[async_trait]
impl SearchGateway for OctocrabSearchGateway {
    async fn search_page(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage, ReportError> {
        let uri = search_uri(query, page, per_page)?;
        let request = self
            .client
            ._get_with_headers(uri, Some(self.headers.clone()));

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ReportError::Network {
                message: format!(
                    "search issues timed out after {}s",
                    self.timeout.as_secs()
                ),
            })?
            .map_err(|error| map_octocrab_error("search issues", &error))?;

        let status = response.status();
        if let Some(signal) = rate_limited(status, response.headers()) {
            return Ok(SearchPage::RateLimited(signal));
        }

        if !status.is_success() {
            let body = self
                .client
                .body_to_string(response)
                .await
                .unwrap_or_else(|_| String::new());

            return Err(map_http_error(
                "search issues",
                status,
                extract_github_message(&body),
            ));
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| ReportError::Api {
                message: format!("search response decode failed: {error}"),
            })?;

        let api: ApiSearchPage =
            serde_json::from_str(&body).map_err(|error| ReportError::Api {
                message: format!("search response deserialisation failed: {error}"),
            })?;

        tracing::debug!(
            page,
            total_count = api.total_count,
            incomplete_results = api.incomplete_results,
            "search page received"
        );

        Ok(SearchPage::Items(api.into_pull_requests()))
    }
}
