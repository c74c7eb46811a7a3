use crate::domain::branch::friendly_name;
use crate::domain::version::SemanticVersion;
use crate::error::{GitSemverError, Result};
use regex::Regex;

/// Tag prefix matcher (e.g., "[vV]", "release-")
///
/// The prefix is a regular expression anchored at the start of the tag name.
#[derive(Debug, Clone)]
pub struct TagPrefix {
    regex: Regex,
}

impl TagPrefix {
    /// Compile a tag prefix pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            GitSemverError::config(format!("Invalid tag prefix '{}': {}", pattern, e))
        })?;
        Ok(TagPrefix { regex })
    }

    /// Strip the prefix from a name, if present
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        match self.regex.find(name) {
            Some(m) => &name[m.end()..],
            None => name,
        }
    }

    /// Parse the version carried by a tag name, or None when it carries none
    pub fn version_from_tag(&self, tag: &str) -> Option<SemanticVersion> {
        SemanticVersion::parse(self.strip(tag)).ok()
    }

    /// Extract a version from a branch name
    ///
    /// Each '/'-separated segment is tried whole and at every position after
    /// a '-'. Only versions with at least "major.minor" count, so issue
    /// numbers like "feature/issue-123" are not mistaken for versions.
    ///
    /// # Example
    /// ```ignore
    /// let prefix = TagPrefix::new("[vV]")?;
    /// assert_eq!(prefix.version_from_branch("release/v1.2").unwrap().to_string(), "1.2.0");
    /// assert_eq!(prefix.version_from_branch("release-2.0.0-beta.1").unwrap().to_string(), "2.0.0-beta.1");
    /// assert!(prefix.version_from_branch("feature/issue-123").is_none());
    /// ```
    pub fn version_from_branch(&self, branch: &str) -> Option<SemanticVersion> {
        let branch = friendly_name(branch);
        for segment in branch.split('/') {
            let mut candidates = vec![segment];
            candidates.extend(
                segment
                    .match_indices('-')
                    .map(|(idx, _)| &segment[idx + 1..]),
            );

            for candidate in candidates {
                let text = self.strip(candidate);
                if !has_minor_component(text) {
                    continue;
                }
                if let Ok(version) = SemanticVersion::parse(text) {
                    return Some(version);
                }
            }
        }
        None
    }
}

fn has_minor_component(text: &str) -> bool {
    let core = text.split(['-', '+']).next().unwrap_or_default();
    core.contains('.')
}

/// Represents a git tag that carries a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: SemanticVersion,
}
