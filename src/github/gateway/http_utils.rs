//! Shared HTTP utilities for the search gateway.

use http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::github::error::ReportError;
use crate::github::locator::PersonalAccessToken;

pub(super) const GITHUB_JSON: &str = "application/vnd.github+json";

pub(super) fn build_search_headers(token: &PersonalAccessToken) -> Result<HeaderMap, ReportError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.value()))
        .map_err(|error| ReportError::Configuration {
            message: format!("GitHub token is not a valid header value: {error}"),
        })?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
