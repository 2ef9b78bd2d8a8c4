//! Repository identity wrappers and token validation.

use std::fmt;

use super::error::ReportError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ReportError> {
        if !is_valid_segment(value) {
            return Err(ReportError::InvalidRepository {
                input: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ReportError> {
        if !is_valid_segment(value) {
            return Err(ReportError::InvalidRepository {
                input: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_valid_segment(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|ch| ch.is_whitespace() || ch == '/')
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReportError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

/// A GitHub repository identified by owner and name.
///
/// # Example
///
/// ```
/// use prsweep::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse_slug("octo/hello-world")
///     .expect("should parse repository slug");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "hello-world");
/// assert_eq!(locator.to_string(), "octo/hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator from owner and repository name strings.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidRepository` when either part is empty or
    /// contains whitespace or a slash.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ReportError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Parses an `owner/repo` slug. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidRepository` when the slug does not have
    /// exactly two non-empty parts.
    pub fn parse_slug(input: &str) -> Result<Self, ReportError> {
        let trimmed = input.trim();
        let invalid = || ReportError::InvalidRepository {
            input: trimmed.to_owned(),
        };

        let (owner, repo) = trimmed.split_once('/').ok_or_else(invalid)?;
        Self::from_owner_repo(owner, repo).map_err(|_| invalid())
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}
