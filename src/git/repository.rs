use crate::error::{GitSemverError, Result};
use crate::git::{CommitInfo, TagInfo};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
///
/// `git2::Repository` is `Send` but not `Sync`; the mutex makes the snapshot
/// shareable across threads.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    work_dir: Option<PathBuf>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let work_dir = repo.workdir().map(Path::to_path_buf);
        Git2Repository {
            repo: Mutex::new(repo),
            work_dir,
        }
    }

    /// Root of the working tree; None for bare repositories
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| GitSemverError::repository("Repository handle lock poisoned"))
    }

    fn commit_info(repo: &Git2Repo, oid: Oid) -> Result<CommitInfo> {
        let commit = repo.find_commit(oid)?;
        Ok(CommitInfo {
            oid,
            message: commit.message().unwrap_or("").to_string(),
            parents: commit.parent_ids().collect(),
            timestamp: commit.time().seconds(),
        })
    }

    fn head_oid(repo: &Git2Repo) -> Result<Oid> {
        let head = repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => {
                GitSemverError::repository("Repository has no commits")
            }
            _ => GitSemverError::Git(e),
        })?;
        head.peel_to_commit().map(|c| c.id()).map_err(Into::into)
    }

    fn walk(&self, first_parent: bool, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let repo = self.lock()?;
        let head = Self::head_oid(&repo)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        if first_parent {
            revwalk.simplify_first_parent()?;
        }
        revwalk.push(head)?;
        if let Some(base) = hide {
            revwalk.hide(base)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            commits.push(Self::commit_info(&repo, oid)?);
        }
        Ok(commits)
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let repo = self.lock()?;
        if repo.head_detached()? {
            return Ok("HEAD".to_string());
        }

        let head = repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => {
                GitSemverError::repository("Repository has no commits")
            }
            _ => GitSemverError::Git(e),
        })?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn head(&self) -> Result<CommitInfo> {
        let repo = self.lock()?;
        let oid = Self::head_oid(&repo)?;
        Self::commit_info(&repo, oid)
    }

    fn commits_from_head(&self) -> Result<Vec<CommitInfo>> {
        self.walk(false, None)
    }

    fn first_parent_history(&self) -> Result<Vec<CommitInfo>> {
        self.walk(true, None)
    }

    fn commits_since(&self, base: Option<Oid>) -> Result<Vec<CommitInfo>> {
        self.walk(false, base)
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        let repo = self.lock()?;
        let names = repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            // Tags pointing at trees or blobs carry no version for history
            if let Ok(commit) = reference.peel_to_commit() {
                tags.push(TagInfo {
                    name: name.to_string(),
                    target: commit.id(),
                });
            }
        }
        Ok(tags)
    }

    fn branch_tip(&self, name: &str) -> Result<Option<Oid>> {
        let repo = self.lock()?;
        let lookups = [
            (name.to_string(), BranchType::Local),
            (format!("origin/{}", name), BranchType::Remote),
        ];

        for (branch_name, kind) in lookups {
            match repo.find_branch(&branch_name, kind) {
                Ok(branch) => return Ok(branch.get().target()),
                Err(e) if e.code() == ErrorCode::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }

    fn merge_base(&self, a: Oid, b: Oid) -> Result<Option<Oid>> {
        let repo = self.lock()?;
        match repo.merge_base(a, b) {
            Ok(oid) => Ok(Some(oid)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(Git2Repository::open(&missing).is_err());
    }

    #[test]
    fn test_empty_repository_has_no_head() {
        let dir = tempfile::tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        let repo = Git2Repository::open(dir.path()).unwrap();
        let err = repo.head().unwrap_err();
        assert!(err.to_string().contains("no commits"));
    }
}
