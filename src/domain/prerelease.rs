//! Pre-release tags for semantic versions
//!
//! A pre-release tag is split into a label and an optional trailing number,
//! separated by the last dot: "beta.4" has label "beta" and number 4.
//! Tags without a dot-separated number ("Unstable4", "alpha") are pure labels,
//! so formatting always reproduces the parsed text.
//! According to semver.org: https://semver.org/#spec-item-9

use crate::error::{GitSemverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Pre-release tag with optional number
///
/// # Examples
/// - "alpha" -> PreReleaseTag { name: "alpha", number: None }
/// - "beta.1" -> PreReleaseTag { name: "beta", number: Some(1) }
/// - "4" -> PreReleaseTag { name: "", number: Some(4) }
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreReleaseTag {
    /// The label part (alpha, beta, rc, a branch name, ...)
    pub name: String,
    /// Optional number, incremented per pre-release build
    pub number: Option<u64>,
}

impl PreReleaseTag {
    /// Create a new pre-release tag
    pub fn new(name: impl Into<String>, number: Option<u64>) -> Self {
        PreReleaseTag {
            name: name.into(),
            number,
        }
    }

    /// Parse a pre-release tag from the text following the '-' of a version
    ///
    /// # Returns
    /// * `Ok(PreReleaseTag)` - Parsed tag
    /// * `Err` - If the text is empty or is not a valid semver pre-release
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(GitSemverError::version("Empty pre-release tag"));
        }

        semver::Prerelease::new(s).map_err(|e| {
            GitSemverError::version(format!("Invalid pre-release tag '{}': {}", s, e))
        })?;

        if let Ok(number) = s.parse::<u64>() {
            return Ok(PreReleaseTag::new("", Some(number)));
        }

        match s.rsplit_once('.') {
            Some((name, tail)) => match tail.parse::<u64>() {
                Ok(number) => Ok(PreReleaseTag::new(name, Some(number))),
                Err(_) => Ok(PreReleaseTag::new(s, None)),
            },
            None => Ok(PreReleaseTag::new(s, None)),
        }
    }

    /// Increment the number
    ///
    /// If number is None, returns Some(1). Otherwise increments by 1, failing
    /// when the number is already at its maximum.
    pub fn increment_number(&self) -> Result<Self> {
        let number = match self.number {
            Some(n) => n.checked_add(1).ok_or_else(|| {
                GitSemverError::version(format!("Pre-release number overflow in '{}'", self))
            })?,
            None => 1,
        };

        Ok(PreReleaseTag {
            name: self.name.clone(),
            number: Some(number),
        })
    }

    /// True when the tag has neither a label nor a number
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.number.is_none()
    }
}

impl FromStr for PreReleaseTag {
    type Err = GitSemverError;

    fn from_str(s: &str) -> Result<Self> {
        PreReleaseTag::parse(s)
    }
}

impl Ord for PreReleaseTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.number.cmp(&other.number))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for PreReleaseTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.is_empty(), self.number) {
            (true, Some(n)) => write!(f, "{}", n),
            (false, Some(n)) => write!(f, "{}.{}", self.name, n),
            (_, None) => write!(f, "{}", self.name),
        }
    }
}
