use crate::config::VersioningMode;
use crate::domain::{MergeMessage, SemanticVersion, VersionField};
use crate::error::Result;
use crate::git::CommitInfo;
use crate::strategies::{BaseVersion, StrategyKind, VersionContext, VersionStrategy};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Every commit on the first-parent history bumps the version once
///
/// Counting starts at the most recent tagged first-parent commit, or at
/// 0.0.0 before the root commit. The result is final and never incremented
/// again by the calculator.
pub struct MainlineStrategy;

impl MainlineStrategy {
    fn field_for(context: &VersionContext<'_>, commit: &CommitInfo) -> Result<VersionField> {
        if context.effective.commit_message_incrementing {
            if let Some(field) = context.effective.bump_patterns.field_for(&commit.message) {
                return Ok(field);
            }
        }
        if commit.is_merge() {
            if let Some(merge) = MergeMessage::parse(&commit.message) {
                return context.config.increment_for(&merge.merged_branch);
            }
        }
        Ok(context.effective.increment)
    }
}

impl VersionStrategy for MainlineStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mainline
    }

    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>> {
        if context.effective.mode != VersioningMode::Mainline {
            return Ok(Vec::new());
        }

        let mut tagged: HashMap<_, SemanticVersion> = HashMap::new();
        for tag in context.repo.tags()? {
            if let Some(version) = context.effective.tag_prefix.version_from_tag(&tag.name) {
                let entry = tagged.entry(tag.target).or_insert_with(|| version.clone());
                if version > *entry {
                    *entry = version;
                }
            }
        }

        let history = context.repo.first_parent_history()?;
        let tagged_index = history.iter().position(|c| tagged.contains_key(&c.oid));

        let (mut version, anchor, newer) = match tagged_index {
            Some(idx) => (
                tagged[&history[idx].oid].clone(),
                Some(history[idx].clone()),
                &history[..idx],
            ),
            None => (SemanticVersion::new(0, 0, 0), None, &history[..]),
        };

        for commit in newer.iter().rev() {
            let field = Self::field_for(context, commit)?;
            version = version.increment(field)?;
            trace!(sha = %commit.short_sha(), ?field, %version, "Mainline increment");
        }

        debug!(%version, commits = newer.len(), "Mainline version computed");
        Ok(vec![BaseVersion::new(
            StrategyKind::Mainline,
            "Mainline versioning",
            false,
            version,
            anchor,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::MockRepository;

    fn mainline_config() -> Config {
        Config {
            mode: VersioningMode::Mainline,
            ..Config::default()
        }
    }

    #[test]
    fn test_inactive_outside_mainline_mode() {
        let mut repo = MockRepository::new();
        repo.commit("initial");
        let config = Config::default();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        assert!(MainlineStrategy.versions(&context).unwrap().is_empty());
    }

    #[test]
    fn test_counts_commits_after_tag() {
        let mut repo = MockRepository::new();
        let tagged = repo.commit("initial");
        repo.add_tag("v1.0.0", tagged);
        repo.commit("fix one");
        repo.commit("fix two");

        let config = mainline_config();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = MainlineStrategy.versions(&context).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].semantic_version.to_string(), "1.0.2");
        assert!(!versions[0].should_increment);
        assert_eq!(
            versions[0].base_version_source.as_ref().map(|c| c.oid),
            Some(tagged)
        );
    }

    #[test]
    fn test_directives_and_merged_branch_increments() {
        let mut repo = MockRepository::new();
        let tagged = repo.commit("initial");
        repo.add_tag("1.0.0", tagged);
        repo.checkout("develop");
        let develop = repo.commit("work");
        repo.checkout("main");
        repo.merge(develop, "Merge branch 'develop'");
        repo.commit("api change +semver: major");

        let config = mainline_config();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = MainlineStrategy.versions(&context).unwrap();
        // develop merge bumps minor, directive bumps major
        assert_eq!(versions[0].semantic_version.to_string(), "2.0.0");
    }

    #[test]
    fn test_untagged_history_starts_from_zero() {
        let mut repo = MockRepository::new();
        repo.commit("initial");
        repo.commit("second");

        let config = mainline_config();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = MainlineStrategy.versions(&context).unwrap();
        assert_eq!(versions[0].semantic_version.to_string(), "0.0.2");
        assert!(versions[0].base_version_source.is_none());
    }

    #[test]
    fn test_increment_overflow_is_reported() {
        let mut repo = MockRepository::new();
        let tagged = repo.commit("initial");
        repo.add_tag("v1.18446744073709551615.0", tagged);
        repo.commit("feature +semver: minor");

        let config = mainline_config();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        assert!(MainlineStrategy.versions(&context).is_err());
    }
}
