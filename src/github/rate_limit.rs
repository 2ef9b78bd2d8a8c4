//! Rate limit signals from GitHub API responses.
//!
//! A search request is considered rate limited when GitHub answers 403 and
//! the `X-RateLimit-Remaining` header reads zero. The wait before retrying
//! comes from `Retry-After` and defaults to [`DEFAULT_RETRY_AFTER`].

use std::time::Duration;

use http::StatusCode;
use http::header::{HeaderMap, RETRY_AFTER};

/// Header carrying the remaining request quota.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Wait applied when a rate-limited response has no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Rate limit headers extracted from a response.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use prsweep::github::rate_limit::RateLimitSignal;
///
/// let signal = RateLimitSignal::new(Some(0), Some(Duration::from_secs(5)));
/// assert!(signal.is_exhausted());
/// assert_eq!(signal.backoff(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSignal {
    /// Remaining requests in the current window, when reported.
    remaining: Option<u32>,
    /// Server-requested wait before retrying, when reported.
    retry_after: Option<Duration>,
}

impl RateLimitSignal {
    /// Creates a signal from already-parsed values.
    #[must_use]
    pub const fn new(remaining: Option<u32>, retry_after: Option<Duration>) -> Self {
        Self {
            remaining,
            retry_after,
        }
    }

    /// Reads `X-RateLimit-Remaining` and `Retry-After` from response headers.
    ///
    /// Values that are missing or not plain integers are treated as absent.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = header_u64(headers, RATE_LIMIT_REMAINING)
            .and_then(|value| u32::try_from(value).ok());
        let retry_after = header_u64(headers, RETRY_AFTER.as_str()).map(Duration::from_secs);

        Self::new(remaining, retry_after)
    }

    /// Returns the remaining quota if the header was present.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Returns true when the remaining quota is reported as zero.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Returns how long to wait before retrying.
    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.retry_after.unwrap_or(DEFAULT_RETRY_AFTER)
    }
}

/// Returns the backoff signal when `status` and `headers` describe a
/// rate-limited response.
#[must_use]
pub fn rate_limited(status: StatusCode, headers: &HeaderMap) -> Option<RateLimitSignal> {
    if status != StatusCode::FORBIDDEN {
        return None;
    }

    let signal = RateLimitSignal::from_headers(headers);
    signal.is_exhausted().then_some(signal)
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|raw| raw.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}
