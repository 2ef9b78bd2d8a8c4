//! Support modules for the report run behavioural tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use runtime::mount;
pub(crate) use state::{FileCount, PullRequestCount, ReportRunState, ensure_runtime, run};
