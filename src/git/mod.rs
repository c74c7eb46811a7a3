//! Git operations abstraction layer
//!
//! This module provides a read-only, trait-based view of a repository: the
//! snapshot the version strategies work on. Implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! Strategies depend on the [Repository] trait only.
//!
//! ```rust
//! # use git_semver::git::Repository;
//! # fn example(repo: &dyn Repository) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head()?;
//! let since_head = repo.commits_since(Some(head.oid))?;
//! assert!(since_head.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information needed for version calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub oid: Oid,
    /// Full commit message
    pub message: String,
    pub parents: Vec<Oid>,
    /// Committer time, seconds since the Unix epoch
    pub timestamp: i64,
}

impl CommitInfo {
    /// Full 40-character hex SHA
    pub fn sha(&self) -> String {
        self.oid.to_string()
    }

    /// First 7 characters of the SHA
    pub fn short_sha(&self) -> String {
        let sha = self.sha();
        sha[..7.min(sha.len())].to_string()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// A tag and the commit it points to (annotated tags are peeled)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub target: Oid,
}

/// Read-only repository snapshot
///
/// ## Ordering
///
/// Every method returning commits returns them newest first.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` so a snapshot can be shared by
/// strategies evaluated on different threads.
pub trait Repository: Send + Sync {
    /// Name of the checked out branch ("HEAD" when detached)
    fn current_branch(&self) -> Result<String>;

    /// Commit at HEAD
    fn head(&self) -> Result<CommitInfo>;

    /// Every commit reachable from HEAD
    fn commits_from_head(&self) -> Result<Vec<CommitInfo>>;

    /// Commits reachable from HEAD following first parents only
    fn first_parent_history(&self) -> Result<Vec<CommitInfo>>;

    /// Commits reachable from HEAD but not from `base`
    ///
    /// With `base = None` this is every commit reachable from HEAD.
    fn commits_since(&self, base: Option<Oid>) -> Result<Vec<CommitInfo>>;

    /// All tags, peeled to the commit they point at
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Tip of a local branch, falling back to `origin/<name>`
    fn branch_tip(&self, name: &str) -> Result<Option<Oid>>;

    /// Best common ancestor of two commits
    fn merge_base(&self, a: Oid, b: Oid) -> Result<Option<Oid>>;
}
