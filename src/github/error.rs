//! Error types shared by the search, report, and configuration layers.

use thiserror::Error;

/// Errors surfaced while configuring the tool, talking to GitHub, or
/// delivering reports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The GitHub token was missing or blank.
    #[error("GitHub token is required (use --token, PRSWEEP_TOKEN, or GITHUB_TOKEN)")]
    MissingToken,

    /// A repository slug could not be parsed.
    #[error("repository must be given as owner/repo, got `{input}`")]
    InvalidRepository {
        /// The rejected input.
        input: String,
    },

    /// A configured URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// GitHub returned a non-success, non-rate-limited response.
    #[error("GitHub API error: {message}")]
    Api {
        /// Status and message returned by GitHub.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The spreadsheet service rejected a request or could not be reached.
    #[error("spreadsheet error: {message}")]
    Spreadsheet {
        /// Details about the spreadsheet failure.
        message: String,
    },
}
