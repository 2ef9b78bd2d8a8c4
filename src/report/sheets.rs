//! Google Sheets v4 implementation of [`SpreadsheetSink`].
//!
//! The sink lists the spreadsheet's tab titles, adds the report tab when it
//! is missing, then appends a header row followed by one row per pull
//! request. Authentication is a caller-supplied OAuth access token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::github::{PullRequest, ReportError};

use super::{SHEET_HEADER, SpreadsheetSink};

/// Default Google Sheets API base URL.
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`GoogleSheetsSink`].
#[derive(Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    /// Base API URL (e.g. `https://sheets.googleapis.com`).
    pub base_url: String,
    /// Target spreadsheet identifier.
    pub spreadsheet_id: String,
    /// OAuth access token used for bearer authentication.
    pub access_token: String,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl SheetsConfig {
    /// Constructs configuration against the public Sheets API.
    #[must_use]
    pub fn new(spreadsheet_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_SHEETS_API_BASE.to_owned(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("access_token", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Appends report rows to tabs of one Google spreadsheet.
#[derive(Debug, Clone)]
pub struct GoogleSheetsSink {
    client: Client,
    api_root: Url,
    spreadsheet_id: String,
    access_token: String,
}

impl GoogleSheetsSink {
    /// Builds a sink for the configured spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when the token is blank, the
    /// base URL cannot be parsed, or the HTTP client cannot be built.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, ReportError> {
        let access_token = config.access_token.trim();
        if access_token.is_empty() {
            return Err(ReportError::Configuration {
                message: "spreadsheet access token is required".to_owned(),
            });
        }

        let mut api_root =
            Url::parse(&config.base_url).map_err(|error| ReportError::Configuration {
                message: format!("invalid spreadsheet API base '{}': {error}", config.base_url),
            })?;
        api_root
            .path_segments_mut()
            .map_err(|()| ReportError::Configuration {
                message: format!(
                    "spreadsheet API base '{}' cannot carry a path",
                    config.base_url
                ),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"]);

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ReportError::Configuration {
                message: format!("failed to configure spreadsheet HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            api_root,
            spreadsheet_id: config.spreadsheet_id.trim().to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    async fn sheet_titles(&self) -> Result<Vec<String>, ReportError> {
        let mut url = self.endpoint("", &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| transport_error("list sheets", &error))?;
        let metadata: SpreadsheetMetadata = ensure_success("list sheets", response)
            .await?
            .json()
            .await
            .map_err(|error| ReportError::Spreadsheet {
                message: format!("list sheets returned an unreadable body: {error}"),
            })?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    async fn add_sheet(&self, sheet_name: &str) -> Result<(), ReportError> {
        let url = self.endpoint(":batchUpdate", &[])?;
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": sheet_name } } }]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|error| transport_error("add sheet", &error))?;
        ensure_success("add sheet", response).await?;
        info!(sheet = sheet_name, "created spreadsheet tab");
        Ok(())
    }

    async fn append_rows(&self, sheet_name: &str, rows: &ValueRange) -> Result<(), ReportError> {
        let range = format!("{}!A1:append", quote_sheet_name(sheet_name));
        let mut url = self.endpoint("", &["values", range.as_str()])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(rows)
            .send()
            .await
            .map_err(|error| transport_error("append rows", &error))?;
        ensure_success("append rows", response).await?;
        Ok(())
    }

    fn endpoint(&self, suffix: &str, extra: &[&str]) -> Result<Url, ReportError> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|()| ReportError::Spreadsheet {
                message: "spreadsheet URL cannot carry a path".to_owned(),
            })?
            .push(&format!("{}{suffix}", self.spreadsheet_id))
            .extend(extra);
        Ok(url)
    }
}

#[async_trait]
impl SpreadsheetSink for GoogleSheetsSink {
    async fn append_report(
        &self,
        sheet_name: &str,
        pull_requests: &[PullRequest],
    ) -> Result<usize, ReportError> {
        if pull_requests.is_empty() {
            debug!(sheet = sheet_name, "no rows to append");
            return Ok(0);
        }

        let titles = self.sheet_titles().await?;
        if !titles.iter().any(|title| title == sheet_name) {
            self.add_sheet(sheet_name).await?;
        }

        self.append_rows(sheet_name, &ValueRange::from_pull_requests(pull_requests))
            .await?;
        info!(
            sheet = sheet_name,
            rows = pull_requests.len(),
            "appended rows to spreadsheet"
        );
        Ok(pull_requests.len())
    }
}

/// Quotes a tab title for A1 notation. Embedded single quotes are doubled.
fn quote_sheet_name(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

fn transport_error(operation: &str, error: &reqwest::Error) -> ReportError {
    ReportError::Spreadsheet {
        message: format!("{operation} transport failed: {error}"),
    }
}

async fn ensure_success(operation: &str, response: Response) -> Result<Response, ReportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "(failed to read error response body)".to_owned());
    Err(ReportError::Spreadsheet {
        message: format!(
            "{operation} failed with status {}: {}",
            status.as_u16(),
            body.trim()
        ),
    })
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Serialize)]
struct ValueRange {
    values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    fn from_pull_requests(pull_requests: &[PullRequest]) -> Self {
        let header = SHEET_HEADER.iter().map(|cell| json!(cell)).collect();
        let rows = pull_requests.iter().map(|pr| {
            vec![
                json!(pr.number),
                json!(pr.title),
                json!(pr.url),
                json!(pr.created_at_rfc3339()),
            ]
        });

        Self {
            values: std::iter::once(header).chain(rows).collect(),
        }
    }
}
