//! Plain-text report files.
//!
//! Each report becomes `{repo}_{sheet name}.txt` in the output directory, one
//! block per pull request:
//!
//! ```text
//! PR #42 - Add search
//! URL: https://github.com/octo/repo/pull/42
//! Created At: 2024-01-01T00:00:00Z
//! ----
//! ```
//!
//! Blocks are separated by a blank line.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};

use crate::github::{PullRequest, ReportError, ReportQuery, RepositoryName};

use super::FileSink;

/// Writes report files beneath a fixed output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileSink {
    output_dir: Utf8PathBuf,
}

impl TextFileSink {
    /// Creates a sink rooted at `output_dir`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory that receives report files.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }
}

impl FileSink for TextFileSink {
    fn write_report(
        &self,
        file_name: &str,
        pull_requests: &[PullRequest],
    ) -> Result<Utf8PathBuf, ReportError> {
        let path = self.output_dir.join(file_name);
        let mut file = create_file_with_parents(&path)?;

        render_report(&mut file, pull_requests)?;
        file.flush().map_err(|error| ReportError::Io {
            message: format!("failed to flush report '{path}': {error}"),
        })?;

        Ok(path)
    }
}

/// Renders `pull_requests` in the report file layout.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if writing to the output fails.
pub fn render_report<W: Write>(
    writer: &mut W,
    pull_requests: &[PullRequest],
) -> Result<(), ReportError> {
    for (index, pull_request) in pull_requests.iter().enumerate() {
        if index > 0 {
            writeln!(writer).map_err(|e| io_error(&e))?;
        }
        writeln!(
            writer,
            "PR #{number} - {title}\nURL: {url}\nCreated At: {created_at}\n----",
            number = pull_request.number,
            title = pull_request.title,
            url = pull_request.url,
            created_at = pull_request.created_at_rfc3339(),
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// File name for a repository's report, with unsafe characters replaced.
#[must_use]
pub fn report_file_name(repository: &RepositoryName, query: ReportQuery) -> String {
    let raw = format!("{}_{}", repository.as_str(), query.sheet_name());
    let sanitised: String = raw
        .chars()
        .map(|ch| if is_safe_for_filename(ch) { ch } else { '-' })
        .collect();
    format!("{sanitised}.txt")
}

const fn is_safe_for_filename(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '_' | '.' | '-')
}

fn io_error(error: &std::io::Error) -> ReportError {
    ReportError::Io {
        message: error.to_string(),
    }
}

/// Creates (or truncates) the file at `path`, creating parent directories
/// first.
fn create_file_with_parents(path: &Utf8Path) -> Result<File, ReportError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| ReportError::Io {
        message: format!("invalid report path '{path}': no file name"),
    })?;

    let (dir, rel_parent) = if parent.is_absolute() {
        let root =
            Dir::open_ambient_dir("/", ambient_authority()).map_err(|error| ReportError::Io {
                message: format!("failed to open root directory for reports: {error}"),
            })?;
        let rel = parent.strip_prefix("/").map_err(|_| ReportError::Io {
            message: format!("failed to normalise report directory '{parent}'"),
        })?;
        (root, rel)
    } else {
        let cwd =
            Dir::open_ambient_dir(".", ambient_authority()).map_err(|error| ReportError::Io {
                message: format!("failed to open current directory for reports: {error}"),
            })?;
        (cwd, parent)
    };

    let target_dir = if rel_parent.as_str().is_empty() || rel_parent == Utf8Path::new(".") {
        dir
    } else {
        dir.create_dir_all(rel_parent)
            .map_err(|error| ReportError::Io {
                message: format!("failed to create report directory '{parent}': {error}"),
            })?;
        dir.open_dir(rel_parent).map_err(|error| ReportError::Io {
            message: format!("failed to open report directory '{parent}': {error}"),
        })?
    };

    target_dir
        .create(file_name)
        .map_err(|error| ReportError::Io {
            message: format!("failed to create report file '{path}': {error}"),
        })
}
