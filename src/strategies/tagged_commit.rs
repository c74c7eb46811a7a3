use crate::domain::VersionTag;
use crate::error::Result;
use crate::strategies::{BaseVersion, StrategyKind, VersionContext, VersionStrategy};
use std::collections::HashMap;
use tracing::debug;

/// Versions carried by tags on commits reachable from HEAD
pub struct TaggedCommitStrategy;

impl VersionStrategy for TaggedCommitStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TaggedCommit
    }

    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>> {
        let tags = context.repo.tags()?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let reachable: HashMap<_, _> = context
            .repo
            .commits_from_head()?
            .into_iter()
            .map(|commit| (commit.oid, commit))
            .collect();

        let mut candidates = Vec::new();
        for tag in tags {
            let Some(version) = context.effective.tag_prefix.version_from_tag(&tag.name) else {
                debug!(tag = %tag.name, "Skipping tag without a version");
                continue;
            };
            let Some(commit) = reachable.get(&tag.target) else {
                continue;
            };

            let tagged = VersionTag {
                name: tag.name,
                version,
            };
            debug!(tag = %tagged.name, version = %tagged.version, "Found version tag");

            candidates.push(BaseVersion::new(
                StrategyKind::TaggedCommit,
                format!("Git tag '{}'", tagged.name),
                commit.oid != context.head.oid,
                tagged.version,
                Some(commit.clone()),
            ));
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::MockRepository;

    #[test]
    fn test_tag_on_head_does_not_increment() {
        let mut repo = MockRepository::new();
        let oid = repo.commit("initial");
        repo.add_tag("v1.2.3", oid);

        let config = Config::default();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = TaggedCommitStrategy.versions(&context).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].semantic_version.to_string(), "1.2.3");
        assert!(!versions[0].should_increment);
        assert_eq!(versions[0].source, "Git tag 'v1.2.3'");
    }

    #[test]
    fn test_older_tag_increments() {
        let mut repo = MockRepository::new();
        let oid = repo.commit("initial");
        repo.add_tag("1.0.0", oid);
        repo.commit("more work");

        let config = Config::default();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = TaggedCommitStrategy.versions(&context).unwrap();
        assert_eq!(versions.len(), 1);
        assert!(versions[0].should_increment);
        assert_eq!(
            versions[0].base_version_source.as_ref().map(|c| c.oid),
            Some(oid)
        );
    }

    #[test]
    fn test_ignores_unreachable_and_non_version_tags() {
        let mut repo = MockRepository::new();
        let base = repo.commit("initial");
        repo.add_tag("nightly", base);
        repo.checkout("feature/other");
        let other = repo.commit("elsewhere");
        repo.add_tag("v9.0.0", other);
        repo.checkout("main");

        let config = Config::default();
        let effective = config.resolve("main").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        assert!(TaggedCommitStrategy.versions(&context).unwrap().is_empty());
    }
}
