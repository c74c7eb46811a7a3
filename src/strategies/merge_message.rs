use crate::domain::MergeMessage;
use crate::error::Result;
use crate::strategies::{BaseVersion, StrategyKind, VersionContext, VersionStrategy};
use tracing::debug;

/// Versions named by release branches merged into the current history
///
/// Only merges whose source branch matches a release branch configuration
/// count, so merging `feature/2.0-prep` never produces a candidate.
pub struct MergeMessageStrategy;

impl VersionStrategy for MergeMessageStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MergeMessage
    }

    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>> {
        let should_increment = !context.effective.prevent_increment_of_merged_branch_version;
        let mut candidates = Vec::new();

        for commit in context.repo.commits_from_head()? {
            if !commit.is_merge() {
                continue;
            }
            let Some(merge) = MergeMessage::parse(&commit.message) else {
                continue;
            };
            if !context.config.is_release_branch(&merge.merged_branch)? {
                continue;
            }
            let Some(version) = context
                .effective
                .tag_prefix
                .version_from_branch(&merge.merged_branch)
            else {
                continue;
            };

            debug!(
                branch = %merge.merged_branch,
                format = ?merge.format,
                %version,
                "Found version in merge message"
            );
            candidates.push(BaseVersion::new(
                StrategyKind::MergeMessage,
                format!("Merge message '{}'", commit.summary()),
                should_increment,
                version,
                Some(commit.clone()),
            ));
        }

        Ok(candidates)
    }
}
