//! Error mapping helpers for the Octocrab search gateway.

use http::StatusCode;

use crate::github::error::ReportError;

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ReportError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return ReportError::Api {
            message: format!(
                "{operation} failed with status {status}: {message}",
                status = source.status_code,
                message = source.message
            ),
        };
    }

    if is_network_error(error) {
        return ReportError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ReportError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ReportError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    ReportError::Api {
        message: format!("{operation} failed with status {status}: {message}"),
    }
}
