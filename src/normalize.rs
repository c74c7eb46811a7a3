//! Repository normalization entry point
//!
//! Validates the working directory handed to the `normalize` command and
//! opens the repository there. No version logic runs at this stage.

use crate::error::{GitSemverError, Result};
use crate::git::{Git2Repository, Repository};
use std::path::Path;
use tracing::info;

/// Options accepted by the `normalize` command
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Working directory with the git repository; the current directory when unset
    pub work_dir: Option<std::path::PathBuf>,
}

/// Open the repository at the requested working directory
///
/// # Returns
/// * `Ok(Git2Repository)` - A non-bare repository with at least one commit
/// * `Err` - If the directory is missing, not a work tree, or has no commits
pub fn normalize(options: &NormalizeOptions) -> Result<Git2Repository> {
    let work_dir = options
        .work_dir
        .as_deref()
        .unwrap_or_else(|| Path::new("."));

    if !work_dir.is_dir() {
        return Err(GitSemverError::repository(format!(
            "Working directory '{}' does not exist",
            work_dir.display()
        )));
    }

    let repo = Git2Repository::open(work_dir)?;
    let Some(root) = repo.work_dir() else {
        return Err(GitSemverError::repository(format!(
            "'{}' is a bare repository",
            work_dir.display()
        )));
    };

    let head = repo.head()?;
    info!(
        work_dir = %root.display(),
        branch = %repo.current_branch()?,
        head = %head.short_sha(),
        "Repository ready"
    );

    Ok(repo)
}
