use crate::error::Result;
use crate::strategies::{BaseVersion, StrategyKind, VersionContext, VersionStrategy};
use tracing::debug;

const MAIN_BRANCH_NAMES: [&str; 2] = ["main", "master"];

/// Version embedded in the name of a release branch, e.g. `release/1.2.0`
pub struct VersionInBranchNameStrategy;

impl VersionStrategy for VersionInBranchNameStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::VersionInBranchName
    }

    fn versions(&self, context: &VersionContext<'_>) -> Result<Vec<BaseVersion>> {
        if !context.effective.is_release_branch {
            return Ok(Vec::new());
        }
        let Some(version) = context
            .effective
            .tag_prefix
            .version_from_branch(&context.branch.name)
        else {
            return Ok(Vec::new());
        };

        let mut anchor = None;
        for main in MAIN_BRANCH_NAMES {
            let Some(tip) = context.repo.branch_tip(main)? else {
                continue;
            };
            if let Some(base) = context.repo.merge_base(context.head.oid, tip)? {
                anchor = context
                    .repo
                    .commits_from_head()?
                    .into_iter()
                    .find(|commit| commit.oid == base);
                break;
            }
        }

        debug!(
            branch = %context.branch.name,
            %version,
            anchor = ?anchor.as_ref().map(|c| c.short_sha()),
            "Found version in branch name"
        );

        Ok(vec![BaseVersion::new(
            StrategyKind::VersionInBranchName,
            "Version in branch name",
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

    #[test]
    fn test_release_branch_anchored_at_branch_point() {
        let mut repo = MockRepository::new();
        let branch_point = repo.commit("initial");
        repo.checkout("release/1.4.0");
        repo.commit("stabilize");

        let config = Config::default();
        let effective = config.resolve("release/1.4.0").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        let versions = VersionInBranchNameStrategy.versions(&context).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].semantic_version.to_string(), "1.4.0");
        assert!(!versions[0].should_increment);
        assert_eq!(
            versions[0].base_version_source.as_ref().map(|c| c.oid),
            Some(branch_point)
        );
    }

    #[test]
    fn test_non_release_branch_yields_nothing() {
        let mut repo = MockRepository::new();
        repo.commit("initial");
        repo.checkout("feature/1.4.0-docs");

        let config = Config::default();
        let effective = config.resolve("feature/1.4.0-docs").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        assert!(VersionInBranchNameStrategy
            .versions(&context)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_release_branch_without_version_yields_nothing() {
        let mut repo = MockRepository::new();
        repo.commit("initial");
        repo.checkout("release/next");

        let config = Config::default();
        let effective = config.resolve("release/next").unwrap();
        let context = VersionContext::new(&repo, &config, &effective).unwrap();

        assert!(VersionInBranchNameStrategy
            .versions(&context)
            .unwrap()
            .is_empty());
    }
}
