//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prsweep.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRSWEEP_TOKEN`, `PRSWEEP_REPOSITORIES`,
//!    and so on, plus the fallbacks `GITHUB_TOKEN` and
//!    `GOOGLE_SHEETS_ACCESS_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--repositories`/`-r`,
//!    `--output-dir`/`-o`, and long flags for the remaining fields
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! repositories = "octocat/hello-world, octocat/spoon-knife"
//! output_dir = "reports"
//! spreadsheet_id = "1AbCdEf"
//! stale_after_days = 14
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::query::DEFAULT_STALE_AFTER_DAYS;
use crate::github::{
    PersonalAccessToken, ReportError, RepositoryLocator, SearchClientConfig,
    gateway::DEFAULT_API_BASE,
};
use crate::report::{DEFAULT_SHEETS_API_BASE, SheetsConfig};

const DEFAULT_OUTPUT_DIR: &str = "reports";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
const SHEETS_TOKEN_ENV: &str = "GOOGLE_SHEETS_ACCESS_TOKEN";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use prsweep::PrSweepConfig;
///
/// let config = PrSweepConfig::load().expect("failed to load configuration");
/// let repositories = config.repository_locators().expect("repositories required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRSWEEP",
    discovery(
        dotfile_name = ".prsweep.toml",
        config_file_name = "prsweep.toml",
        app_name = "prsweep"
    )
)]
pub struct PrSweepConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PRSWEEP_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Comma-separated `owner/repo` list to report on.
    ///
    /// Can be provided via:
    /// - CLI: `--repositories <LIST>` or `-r <LIST>`
    /// - Environment: `PRSWEEP_REPOSITORIES`
    /// - Config file: `repositories = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repositories: Option<String>,

    /// GitHub API base URL. Override for GitHub Enterprise or tests.
    #[ortho_config()]
    pub api_base: String,

    /// Directory receiving the text reports. Created when missing.
    #[ortho_config(cli_short = 'o')]
    pub output_dir: String,

    /// Target spreadsheet. The spreadsheet sink is enabled only when this
    /// and a sheets token are both present.
    #[ortho_config()]
    pub spreadsheet_id: Option<String>,

    /// OAuth access token for the Sheets API; falls back to
    /// `GOOGLE_SHEETS_ACCESS_TOKEN`.
    #[ortho_config()]
    pub sheets_token: Option<String>,

    /// Sheets API base URL.
    #[ortho_config()]
    pub sheets_api_base: String,

    /// Age in days after which an open pull request is reported as old.
    #[ortho_config()]
    pub stale_after_days: u64,

    /// Timeout applied to every HTTP request, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for PrSweepConfig {
    fn default() -> Self {
        Self {
            token: None,
            repositories: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            output_dir: DEFAULT_OUTPUT_DIR.to_owned(),
            spreadsheet_id: None,
            sheets_token: None,
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_owned(),
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl PrSweepConfig {
    /// Resolves the GitHub token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, ReportError> {
        let token = non_blank(self.token.clone())
            .or_else(|| non_blank(env::var(GITHUB_TOKEN_ENV).ok()))
            .ok_or(ReportError::MissingToken)?;
        PersonalAccessToken::new(token)
    }

    /// Parses the configured repository list.
    ///
    /// Empty entries between commas are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when no repository is
    /// configured, or [`ReportError::InvalidRepository`] for a malformed
    /// entry.
    pub fn repository_locators(&self) -> Result<Vec<RepositoryLocator>, ReportError> {
        let locators = self
            .repositories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(RepositoryLocator::parse_slug)
            .collect::<Result<Vec<_>, _>>()?;

        if locators.is_empty() {
            return Err(ReportError::Configuration {
                message: "at least one repository is required (use --repositories or -r)"
                    .to_owned(),
            });
        }
        Ok(locators)
    }

    /// HTTP timeout for GitHub and Sheets requests.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Search client settings for the GitHub gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when no token can be resolved.
    pub fn search_config(&self) -> Result<SearchClientConfig, ReportError> {
        let token = self.resolve_token()?;
        Ok(SearchClientConfig::with_token(token.value())
            .api_base(self.api_base.clone())
            .with_timeout(self.request_timeout()))
    }

    /// Spreadsheet settings, or `None` when the sink is not configured.
    #[must_use]
    pub fn sheets_config(&self) -> Option<SheetsConfig> {
        let spreadsheet_id = non_blank(self.spreadsheet_id.clone())?;
        let access_token = non_blank(self.sheets_token.clone())
            .or_else(|| non_blank(env::var(SHEETS_TOKEN_ENV).ok()))?;

        Some(
            SheetsConfig::new(spreadsheet_id, access_token)
                .with_base_url(self.sheets_api_base.clone())
                .with_timeout(self.request_timeout()),
        )
    }

    /// Directory receiving text reports.
    #[must_use]
    pub fn output_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.output_dir.as_str())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|candidate| !candidate.trim().is_empty())
}

#[cfg(test)]
mod tests;
