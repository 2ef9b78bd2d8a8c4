//! Support modules for the search pagination behavioural tests.

pub(crate) mod domain;
pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use domain::{HttpStatus, PageNumber, PullRequestCount, RequestCount, WaitSeconds};
pub(crate) use harness::{mount_failing_page, mount_rate_limited_page, mount_search_results};
pub(crate) use state::{SearchState, ensure_runtime, run_fetch};
