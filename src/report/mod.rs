//! Report delivery: text files, spreadsheet tabs, and the per-repository job.
//!
//! Each repository runs the fixed [`ReportQuery`](crate::github::ReportQuery)
//! set. Non-empty results are written to a text file and, when configured,
//! appended to a spreadsheet tab named after the report.

mod driver;
mod job;
mod sheets;
mod text_file;

pub use driver::{run_jobs, run_reports};
pub use job::{QueryOutcome, ReportJob, RepositorySummary};
pub use sheets::{DEFAULT_SHEETS_API_BASE, GoogleSheetsSink, SheetsConfig};
pub use text_file::{TextFileSink, render_report, report_file_name};

use async_trait::async_trait;
use camino::Utf8PathBuf;

use crate::github::{PullRequest, ReportError};

/// Header row written above every spreadsheet append.
pub const SHEET_HEADER: [&str; 4] = ["PR Number", "Title", "URL", "Created At"];

/// Destination for per-report text files.
#[cfg_attr(test, mockall::automock)]
pub trait FileSink: Send + Sync {
    /// Writes `pull_requests` to `file_name`, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the file cannot be written.
    fn write_report(
        &self,
        file_name: &str,
        pull_requests: &[PullRequest],
    ) -> Result<Utf8PathBuf, ReportError>;
}

/// Destination for spreadsheet rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpreadsheetSink: Send + Sync {
    /// Appends `pull_requests` below a header row on the tab `sheet_name`,
    /// creating the tab when missing. Returns the number of rows appended.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Spreadsheet`] when the spreadsheet service
    /// rejects a request.
    async fn append_report(
        &self,
        sheet_name: &str,
        pull_requests: &[PullRequest],
    ) -> Result<usize, ReportError>;
}
