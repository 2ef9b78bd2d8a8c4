//! Domain wrapper types for the search pagination behavioural tests.

use std::str::FromStr;

/// Page number for pagination (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageNumber(u32);

impl PageNumber {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for PageNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u32>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("PageNumber must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

/// Count of pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PullRequestCount(u64);

impl PullRequestCount {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for PullRequestCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Number of HTTP requests observed by the mock server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestCount(usize);

impl RequestCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for RequestCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}

/// A `Retry-After` value in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WaitSeconds(u64);

impl WaitSeconds {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for WaitSeconds {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// HTTP status code returned by a failing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HttpStatus(u16);

impl HttpStatus {
    pub(crate) const fn value(self) -> u16 {
        self.0
    }
}

impl FromStr for HttpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u16>().map_err(|error| error.to_string())?;
        if !(100..=599).contains(&value) {
            return Err(format!("{value} is not an HTTP status code"));
        }

        Ok(Self(value))
    }
}
