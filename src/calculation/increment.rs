use crate::config::EffectiveConfiguration;
use crate::domain::VersionField;
use crate::git::CommitInfo;
use tracing::debug;

/// Decides which field to bump for an incrementing base version
///
/// Commit message directives (`+semver: minor`, ...) found in the commits
/// since the version source take precedence over the branch increment; the
/// largest directive wins.
pub struct IncrementFinder<'a> {
    effective: &'a EffectiveConfiguration,
}

impl<'a> IncrementFinder<'a> {
    pub fn new(effective: &'a EffectiveConfiguration) -> Self {
        IncrementFinder { effective }
    }

    /// Field to increment given the commits since the version source
    pub fn find(&self, commits: &[CommitInfo]) -> VersionField {
        if !self.effective.commit_message_incrementing {
            return self.effective.increment;
        }

        let directive = commits
            .iter()
            .filter_map(|commit| self.effective.bump_patterns.field_for(&commit.message))
            .max();

        match directive {
            Some(field) => {
                debug!(?field, "Increment taken from commit messages");
                field
            }
            None => self.effective.increment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, IncrementStrategy};
    use git2::Oid;

    fn commit(message: &str) -> CommitInfo {
        CommitInfo {
            oid: Oid::zero(),
            message: message.to_string(),
            parents: vec![],
            timestamp: 0,
        }
    }

    #[test]
    fn test_branch_increment_without_directives() {
        let effective = Config::default().resolve("develop").unwrap();
        let finder = IncrementFinder::new(&effective);
        assert_eq!(finder.find(&[commit("work")]), VersionField::Minor);
        assert_eq!(finder.find(&[]), VersionField::Minor);
    }

    #[test]
    fn test_largest_directive_wins() {
        let effective = Config::default().resolve("main").unwrap();
        let finder = IncrementFinder::new(&effective);
        let commits = [
            commit("small +semver: patch"),
            commit("bigger +semver: minor"),
            commit("unrelated"),
        ];
        assert_eq!(finder.find(&commits), VersionField::Minor);
    }

    #[test]
    fn test_none_directive_suppresses_bump() {
        let effective = Config::default().resolve("main").unwrap();
        let finder = IncrementFinder::new(&effective);
        assert_eq!(
            finder.find(&[commit("docs only +semver: none")]),
            VersionField::None
        );
    }

    #[test]
    fn test_directives_ignored_when_disabled() {
        let config = Config {
            commit_message_incrementing: false,
            increment: IncrementStrategy::Minor,
            ..Config::default()
        };
        let effective = config.resolve("unmatched").unwrap();
        let finder = IncrementFinder::new(&effective);
        assert_eq!(
            finder.find(&[commit("+semver: major")]),
            VersionField::Minor
        );
    }
}
