//! Search query construction and the fixed report categories.

use chrono::{Days, NaiveDate};

use super::locator::RepositoryLocator;

/// A repository-scoped issue search.
///
/// # Example
///
/// ```
/// use prsweep::{RepositoryLocator, SearchQuery};
///
/// let locator = RepositoryLocator::from_owner_repo("octo", "repo")
///     .expect("should create locator");
/// let query = SearchQuery::new(locator, "is:pr is:open review:required");
/// assert_eq!(query.render(), "repo:octo/repo is:pr is:open review:required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    locator: RepositoryLocator,
    fragment: String,
}

impl SearchQuery {
    /// Creates a query for `fragment` scoped to the given repository.
    #[must_use]
    pub fn new(locator: RepositoryLocator, fragment: impl Into<String>) -> Self {
        Self {
            locator,
            fragment: fragment.into(),
        }
    }

    /// Repository the query is scoped to.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// The filter clause appended to the repository scope.
    #[must_use]
    pub const fn fragment(&self) -> &str {
        self.fragment.as_str()
    }

    /// Renders the `q` parameter sent to the search API.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "repo:{}/{} {}",
            self.locator.owner().as_str(),
            self.locator.repository().as_str(),
            self.fragment
        )
    }
}

/// Default age, in days, after which an open pull request counts as stale.
pub const DEFAULT_STALE_AFTER_DAYS: u64 = 14;

/// The report categories produced for every repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportQuery {
    /// Open pull requests created before the staleness cut-off.
    Stale,
    /// Open pull requests still waiting on a required review.
    ReviewRequired,
    /// Open pull requests whose status checks succeeded.
    ReviewSucceeded,
    /// Open pull requests without a required review request.
    NoReviewers,
}

impl ReportQuery {
    /// All report categories in the order they run.
    pub const ALL: [Self; 4] = [
        Self::Stale,
        Self::ReviewRequired,
        Self::ReviewSucceeded,
        Self::NoReviewers,
    ];

    /// Sheet (and text file) name for this report.
    #[must_use]
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::Stale => "Old Pull Requests",
            Self::ReviewRequired => "Pull Requests with Review Required",
            Self::ReviewSucceeded => "Pull Requests with Success Status",
            Self::NoReviewers => "Pull Requests with No Reviews Requested",
        }
    }

    /// Builds the search fragment for this report.
    ///
    /// `today` and `stale_after_days` only affect [`ReportQuery::Stale`].
    #[must_use]
    pub fn fragment(self, today: NaiveDate, stale_after_days: u64) -> String {
        match self {
            Self::Stale => {
                let cutoff = today
                    .checked_sub_days(Days::new(stale_after_days))
                    .unwrap_or(NaiveDate::MIN);
                format!("is:pr is:open created:<{}", cutoff.format("%Y-%m-%d"))
            }
            Self::ReviewRequired => "is:pr is:open review:required".to_owned(),
            Self::ReviewSucceeded => "is:pr is:open status:success".to_owned(),
            Self::NoReviewers => "is:pr is:open -review:required".to_owned(),
        }
    }
}

/// The dated set of report queries for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPlan {
    today: NaiveDate,
    stale_after_days: u64,
}

impl ReportPlan {
    /// Creates a plan evaluated against `today`.
    #[must_use]
    pub const fn new(today: NaiveDate, stale_after_days: u64) -> Self {
        Self {
            today,
            stale_after_days,
        }
    }

    /// Returns each report with its search fragment, in run order.
    pub fn entries(&self) -> impl Iterator<Item = (ReportQuery, String)> + '_ {
        ReportQuery::ALL
            .into_iter()
            .map(|query| (query, query.fragment(self.today, self.stale_after_days)))
    }
}
