use crate::calculation::IncrementFinder;
use crate::config::{Config, EffectiveConfiguration, VersioningMode};
use crate::domain::{BranchContext, PreReleaseTag, SemanticVersion};
use crate::error::{GitSemverError, Result};
use crate::git::Repository;
use crate::strategies::{enabled_strategies, BaseVersion, VersionContext};
use git2::Oid;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// Outcome of one version calculation
#[derive(Debug, Clone)]
pub struct VersionResult {
    pub version: SemanticVersion,
    /// Candidate the version was derived from
    pub base_version: BaseVersion,
    /// Commits reachable from HEAD but not from the version source
    pub commits_since: usize,
    pub branch: BranchContext,
    pub sha: String,
    /// HEAD commit time, seconds since the Unix epoch
    pub commit_timestamp: i64,
    pub version_source_sha: Option<String>,
    pub mode: VersioningMode,
}

/// Runs the enabled strategies and turns the winning candidate into a version
pub struct VersionCalculator<'a> {
    repo: &'a dyn Repository,
    config: &'a Config,
}

impl<'a> VersionCalculator<'a> {
    pub fn new(repo: &'a dyn Repository, config: &'a Config) -> Self {
        VersionCalculator { repo, config }
    }

    /// Calculate the version for the repository's current branch
    pub fn calculate(&self) -> Result<VersionResult> {
        let branch_name = self.repo.current_branch()?;
        let effective = self.config.resolve(&branch_name)?;
        self.calculate_with(&effective)
    }

    /// Calculate the version with an already resolved configuration
    pub fn calculate_with(&self, effective: &EffectiveConfiguration) -> Result<VersionResult> {
        let context = VersionContext::new(self.repo, self.config, effective)?;

        let mut candidates = Vec::new();
        for strategy in enabled_strategies(effective) {
            let found = strategy.versions(&context)?;
            for candidate in &found {
                debug!(strategy = %strategy.kind(), %candidate, "Base version candidate");
            }
            candidates.extend(found);
        }

        let base_version = select_base_version(&candidates, |candidate| {
            let anchor = candidate.base_version_source.as_ref().map(|c| c.oid);
            Ok(self.repo.commits_since(anchor)?.len())
        })
        .map_err(|e| match e {
            GitSemverError::NoBaseVersionFound(_) => GitSemverError::no_base_version(format!(
                "no strategy produced a version for branch '{}'",
                context.branch.name
            )),
            other => other,
        })?;

        let anchor = base_version.base_version_source.as_ref();
        let commits = self.repo.commits_since(anchor.map(|c| c.oid))?;
        let commits_since = commits.len();

        let mut version = if base_version.should_increment {
            let field = IncrementFinder::new(effective).find(&commits);
            base_version.semantic_version.increment(field)?
        } else {
            base_version.semantic_version.clone()
        };

        if !effective.label.is_empty() && !version.is_pre_release() {
            let number = match effective.mode {
                VersioningMode::ContinuousDeployment => commits_since as u64,
                _ => 1,
            };
            let label = PreReleaseTag::new(effective.label.clone(), Some(number));
            version = version.with_pre_release(Some(label));
        }

        info!(
            %version,
            source = %base_version.source,
            commits_since,
            branch = %context.branch.name,
            "Calculated version"
        );

        Ok(VersionResult {
            version,
            version_source_sha: anchor.map(|c| c.sha()),
            base_version,
            commits_since,
            sha: context.head.sha(),
            commit_timestamp: context.head.timestamp,
            branch: context.branch,
            mode: effective.mode,
        })
    }
}

/// Pick the winning base version
///
/// Explicit overrides win outright, and several overrides naming different
/// versions are an error. Otherwise the highest version wins; ties go to the
/// candidate with fewer commits since its anchor, then to a non-incrementing
/// one, then to the lexically smaller source. The choice does not depend on
/// candidate order.
///
/// `commits_since` is only consulted for candidates tied at the highest
/// version, once per distinct anchor commit.
pub fn select_base_version<F>(candidates: &[BaseVersion], commits_since: F) -> Result<BaseVersion>
where
    F: Fn(&BaseVersion) -> Result<usize>,
{
    let overrides: Vec<&BaseVersion> = candidates
        .iter()
        .filter(|c| c.is_explicit_override())
        .collect();

    if let Some(first) = overrides.first() {
        if overrides
            .iter()
            .any(|o| o.semantic_version != first.semantic_version)
        {
            let listed: Vec<String> = overrides.iter().map(|o| o.to_string()).collect();
            return Err(GitSemverError::ambiguous(format!(
                "conflicting explicit versions: {}",
                listed.join(", ")
            )));
        }
        return Ok((*first).clone());
    }

    let Some(highest) = candidates.iter().map(|c| &c.semantic_version).max() else {
        return Err(GitSemverError::no_base_version("no strategy produced a version"));
    };

    let mut counts: HashMap<Option<Oid>, usize> = HashMap::new();
    let mut ranked = Vec::new();
    for candidate in candidates
        .iter()
        .filter(|c| c.semantic_version.cmp(highest) == Ordering::Equal)
    {
        let anchor = candidate.base_version_source.as_ref().map(|c| c.oid);
        let count = match counts.get(&anchor) {
            Some(count) => *count,
            None => {
                let count = commits_since(candidate)?;
                counts.insert(anchor, count);
                count
            }
        };
        ranked.push((candidate, count));
    }

    ranked
        .into_iter()
        .max_by(|(a, a_count), (b, b_count)| rank(a, *a_count, b, *b_count))
        .map(|(winner, _)| winner.clone())
        .ok_or_else(|| GitSemverError::no_base_version("no strategy produced a version"))
}

fn rank(a: &BaseVersion, a_count: usize, b: &BaseVersion, b_count: usize) -> Ordering {
    a.semantic_version
        .cmp(&b.semantic_version)
        .then(b_count.cmp(&a_count))
        .then(b.should_increment.cmp(&a.should_increment))
        .then_with(|| b.source.cmp(&a.source))
        .then(b.strategy.cmp(&a.strategy))
}
