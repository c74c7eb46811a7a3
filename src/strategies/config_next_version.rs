use crate::domain::SemanticVersion;
use crate::error::{GitSemverError, Result};
use crate::strategies::{BaseVersion, StrategyKind, VersionContext, VersionStrategy};
use tracing::debug;

/// Provenance text for candidates from the `next_version` setting
pub const NEXT_VERSION_SOURCE: &str = "NextVersion in config";

/// Version taken verbatim from the `next_version` configuration setting
///
/// The candidate is an explicit override: it never gets incremented and has
/// no anchor commit.
pub struct ConfigNextVersionStrategy;

impl ConfigNextVersionStrategy {
    /// Candidates for a raw `next_version` value
    ///
    /// An unset or blank value yields nothing; an unparsable one is a
    /// configuration error.
    pub fn versions_for(next_version: Option<&str>) -> Result<Vec<BaseVersion>> {
        let Some(raw) = next_version.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Vec::new());
        };

        let version = SemanticVersion::parse(raw).map_err(|e| {
            GitSemverError::config(format!("Invalid next_version '{}': {}", raw, e))
        })?;
        debug!(%version, "Using next_version from configuration");

        Ok(vec![BaseVersion::new(
            StrategyKind::ConfigNextVersion,
            NEXT_VERSION_SOURCE,
            false,
            version,
            None,
        )])
    }
}

impl VersionStrategy for ConfigNextVersionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ConfigNextVersion
    }

    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>> {
        Self::versions_for(context.effective.next_version.as_deref())
    }
}
