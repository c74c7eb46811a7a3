//! Base version strategies
//!
//! Each strategy inspects the repository and configuration and proposes zero
//! or more [`BaseVersion`] candidates. The set of strategies is closed: they
//! are listed in [`StrategyKind::ALL`] and built by [`strategy_for`], and the
//! orchestrator in [`crate::calculation`] picks among their candidates.
//!
//! A strategy with nothing to say returns an empty `Vec`, never a sentinel.

pub mod config_next_version;
pub mod mainline;
pub mod merge_message;
pub mod tagged_commit;
pub mod version_in_branch_name;

pub use config_next_version::ConfigNextVersionStrategy;
pub use mainline::MainlineStrategy;
pub use merge_message::MergeMessageStrategy;
pub use tagged_commit::TaggedCommitStrategy;
pub use version_in_branch_name::VersionInBranchNameStrategy;

use crate::config::{Config, EffectiveConfiguration};
use crate::domain::{BranchContext, SemanticVersion};
use crate::error::Result;
use crate::git::{CommitInfo, Repository};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a strategy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ConfigNextVersion,
    TaggedCommit,
    MergeMessage,
    VersionInBranchName,
    Mainline,
}

impl StrategyKind {
    /// Every strategy, in evaluation order
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::ConfigNextVersion,
        StrategyKind::TaggedCommit,
        StrategyKind::MergeMessage,
        StrategyKind::VersionInBranchName,
        StrategyKind::Mainline,
    ];

    /// True for strategies whose candidates are explicit operator overrides
    pub fn is_override(&self) -> bool {
        matches!(self, StrategyKind::ConfigNextVersion)
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::ConfigNextVersion => "config-next-version",
            StrategyKind::TaggedCommit => "tagged-commit",
            StrategyKind::MergeMessage => "merge-message",
            StrategyKind::VersionInBranchName => "version-in-branch-name",
            StrategyKind::Mainline => "mainline",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate base version proposed by one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct BaseVersion {
    /// Human-readable provenance ("Git tag 'v1.0.0'", "NextVersion in config", ...)
    pub source: String,
    pub should_increment: bool,
    pub semantic_version: SemanticVersion,
    /// Commit the candidate is anchored to; None means the start of history
    pub base_version_source: Option<CommitInfo>,
    pub strategy: StrategyKind,
}

impl BaseVersion {
    pub fn new(
        strategy: StrategyKind,
        source: impl Into<String>,
        should_increment: bool,
        semantic_version: SemanticVersion,
        base_version_source: Option<CommitInfo>,
    ) -> Self {
        BaseVersion {
            source: source.into(),
            should_increment,
            semantic_version,
            base_version_source,
            strategy,
        }
    }

    /// Explicit, non-incrementing override that outranks history
    pub fn is_explicit_override(&self) -> bool {
        self.strategy.is_override() && !self.should_increment
    }
}

impl fmt::Display for BaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} with commit {}",
            self.source,
            self.semantic_version,
            self.base_version_source
                .as_ref()
                .map(|c| c.short_sha())
                .unwrap_or_else(|| "<none>".to_string())
        )
    }
}

/// Read-only inputs shared by every strategy during one run
pub struct VersionContext<'a> {
    pub repo: &'a dyn Repository,
    pub config: &'a Config,
    pub effective: &'a EffectiveConfiguration,
    pub branch: BranchContext,
    pub head: CommitInfo,
}

impl<'a> VersionContext<'a> {
    /// Build a context for the repository's current branch
    pub fn new(
        repo: &'a dyn Repository,
        config: &'a Config,
        effective: &'a EffectiveConfiguration,
    ) -> Result<Self> {
        let branch = BranchContext::new(repo.current_branch()?);
        let head = repo.head()?;
        Ok(VersionContext {
            repo,
            config,
            effective,
            branch,
            head,
        })
    }
}

/// Proposes base version candidates from one signal
pub trait VersionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Compute the candidates for the current state; recomputed on each call
    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>>;
}

/// Build the strategy for a kind
pub fn strategy_for(kind: StrategyKind) -> Box<dyn VersionStrategy> {
    match kind {
        StrategyKind::ConfigNextVersion => Box::new(ConfigNextVersionStrategy),
        StrategyKind::TaggedCommit => Box::new(TaggedCommitStrategy),
        StrategyKind::MergeMessage => Box::new(MergeMessageStrategy),
        StrategyKind::VersionInBranchName => Box::new(VersionInBranchNameStrategy),
        StrategyKind::Mainline => Box::new(MainlineStrategy),
    }
}

/// Strategies enabled by a configuration, in registry order and without duplicates
pub fn enabled_strategies(effective: &EffectiveConfiguration) -> Vec<Box<dyn VersionStrategy>> {
    StrategyKind::ALL
        .iter()
        .filter(|kind| effective.strategies.contains(*kind))
        .map(|kind| strategy_for(*kind))
        .collect()
}
