use crate::domain::prerelease::PreReleaseTag;
use crate::error::{GitSemverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Immutable once built: incrementing returns a new value. Precedence
/// follows semver: major, minor, patch, then a release sorts above any
/// pre-release of the same numbers. Build metadata never changes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<PreReleaseTag>,
    pub build_metadata: Option<String>,
}

/// Version field to increment
///
/// Ordered so that the larger bump compares greater, which lets callers
/// combine several increment decisions with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionField {
    None,
    Patch,
    Minor,
    Major,
}

impl SemanticVersion {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Replace the pre-release tag
    pub fn with_pre_release(mut self, pre_release: Option<PreReleaseTag>) -> Self {
        self.pre_release = pre_release.filter(|tag| !tag.is_empty());
        self
    }

    /// Parse a version string such as "1", "1.2", "1.2.3", "1.2.3-beta.4+5"
    ///
    /// Missing minor or patch components default to 0. Pre-release and
    /// build metadata must be valid semver identifiers.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(GitSemverError::version("Empty version string"));
        }

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(GitSemverError::version(format!(
                "Invalid version format: '{}' - expected X[.Y[.Z]]",
                input
            )));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(GitSemverError::version(format!(
                    "Invalid version component '{}' in '{}'",
                    part, input
                )));
            }
            *slot = part.parse::<u64>().map_err(|_| {
                GitSemverError::version(format!("Version component out of range: {}", part))
            })?;
        }

        let pre_release = pre.map(PreReleaseTag::parse).transpose()?;

        let build_metadata = match build {
            Some("") => {
                return Err(GitSemverError::version(format!(
                    "Empty build metadata in '{}'",
                    input
                )));
            }
            Some(b) => {
                semver::BuildMetadata::new(b).map_err(|e| {
                    GitSemverError::version(format!("Invalid build metadata '{}': {}", b, e))
                })?;
                Some(b.to_string())
            }
            None => None,
        };

        Ok(SemanticVersion {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            pre_release,
            build_metadata,
        })
    }

    /// Increment the version
    ///
    /// A version carrying a pre-release tag bumps its pre-release number and
    /// keeps its numeric fields. A release bumps the requested field and
    /// resets the lower ones. Build metadata is always dropped. Fails rather
    /// than wrapping when the bumped component is already `u64::MAX`.
    pub fn increment(&self, field: VersionField) -> Result<Self> {
        let mut next = SemanticVersion {
            build_metadata: None,
            ..self.clone()
        };

        if let Some(pre) = &self.pre_release {
            if field != VersionField::None {
                next.pre_release = Some(pre.increment_number()?);
            }
            return Ok(next);
        }

        let overflow =
            || GitSemverError::version(format!("Cannot increment {:?} of '{}'", field, self));
        match field {
            VersionField::None => {}
            VersionField::Major => {
                next.major = self.major.checked_add(1).ok_or_else(overflow)?;
                next.minor = 0;
                next.patch = 0;
            }
            VersionField::Minor => {
                next.minor = self.minor.checked_add(1).ok_or_else(overflow)?;
                next.patch = 0;
            }
            VersionField::Patch => {
                next.patch = self.patch.checked_add(1).ok_or_else(overflow)?;
            }
        }
        Ok(next)
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// "major.minor.patch" without any suffix
    pub fn major_minor_patch(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Semver precedence, ignoring build metadata
    pub fn precedence_cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
            .then_with(|| self.build_metadata.cmp(&other.build_metadata))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for SemanticVersion {
    type Err = GitSemverError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
