/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    /// Branch name with ref and remote prefixes removed
    pub name: String,
}

const REMOTE_PREFIXES: &[&str] = &["origin/", "upstream/"];

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>) -> Self {
        BranchContext {
            name: friendly_name(&name.into()),
        }
    }

    /// Branch name with every character outside [A-Za-z0-9] replaced by '-'
    pub fn escaped_name(&self) -> String {
        escape_name(&self.name)
    }
}

/// Strip `refs/heads/`, `refs/remotes/<remote>/` and common remote prefixes
pub fn friendly_name(name: &str) -> String {
    if let Some(local) = name.strip_prefix("refs/heads/") {
        return local.to_string();
    }
    if let Some(remote) = name.strip_prefix("refs/remotes/") {
        return remote
            .split_once('/')
            .map(|(_, branch)| branch.to_string())
            .unwrap_or_else(|| remote.to_string());
    }
    for prefix in REMOTE_PREFIXES {
        if let Some(branch) = name.strip_prefix(prefix) {
            return branch.to_string();
        }
    }
    name.to_string()
}

/// Replace characters that are not valid in a semver identifier
pub fn escape_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
