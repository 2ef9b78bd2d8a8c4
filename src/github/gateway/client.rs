//! Octocrab client construction for the search gateway.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use url::Url;

use crate::github::error::ReportError;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client rooted at `api_base`.
///
/// Authentication headers are attached per request. Octocrab's own retry
/// middleware is disabled so that only rate-limit responses are retried.
///
/// # Errors
///
/// Returns `ReportError::InvalidUrl` when the base URI cannot be parsed or
/// `ReportError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(api_base: &Url) -> Result<Octocrab, ReportError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| ReportError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| ReportError::Api {
            message: format!("build client failed: {error}"),
        })?
        .add_retry_config(RetryConfig::None)
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
