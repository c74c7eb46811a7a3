use crate::error::{GitSemverError, Result};
use crate::git::{CommitInfo, Repository, TagInfo};
use git2::Oid;
use std::collections::{HashMap, HashSet, VecDeque};

/// In-memory commit graph for testing without actual git operations
///
/// Commits created through [`MockRepository::commit`] and
/// [`MockRepository::merge`] get increasing timestamps, so "newest first"
/// ordering matches creation order.
pub struct MockRepository {
    commits: HashMap<Oid, CommitInfo>,
    order: Vec<Oid>,
    tags: Vec<TagInfo>,
    branch_heads: HashMap<String, Oid>,
    current_branch: String,
    head: Option<Oid>,
    next_id: u32,
}

impl MockRepository {
    /// Create a new empty mock repository on branch "main"
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            order: Vec::new(),
            tags: Vec::new(),
            branch_heads: HashMap::new(),
            current_branch: "main".to_string(),
            head: None,
            next_id: 0,
        }
    }

    /// Add a fully specified commit to the graph
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.order.push(info.oid);
        self.commits.insert(info.oid, info);
    }

    /// Commit on the current branch and move HEAD to it
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents = self.head.into_iter().collect();
        self.create(message, parents)
    }

    /// Create a merge commit of `other` into the current branch
    pub fn merge(&mut self, other: Oid, message: &str) -> Oid {
        let parents = self.head.into_iter().chain(std::iter::once(other)).collect();
        self.create(message, parents)
    }

    /// Switch to a branch, creating it at HEAD when it does not exist
    pub fn checkout(&mut self, branch: &str) {
        match self.branch_heads.get(branch) {
            Some(oid) => self.head = Some(*oid),
            None => {
                if let Some(head) = self.head {
                    self.branch_heads.insert(branch.to_string(), head);
                }
            }
        }
        self.current_branch = branch.to_string();
    }

    /// Detach HEAD at a commit
    pub fn checkout_detached(&mut self, oid: Oid) {
        self.head = Some(oid);
        self.current_branch = "HEAD".to_string();
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(TagInfo {
            name: name.into(),
            target: oid,
        });
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    fn create(&mut self, message: &str, parents: Vec<Oid>) -> Oid {
        self.next_id += 1;
        let mut bytes = [0u8; 20];
        bytes[0] = 0xc0;
        bytes[16..].copy_from_slice(&self.next_id.to_be_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.add_commit(CommitInfo {
            oid,
            message: message.to_string(),
            parents,
            timestamp: 1_600_000_000 + i64::from(self.next_id) * 60,
        });

        self.head = Some(oid);
        if self.current_branch != "HEAD" {
            self.branch_heads.insert(self.current_branch.clone(), oid);
        }
        oid
    }

    fn head_oid(&self) -> Result<Oid> {
        self.head
            .ok_or_else(|| GitSemverError::repository("Repository has no commits"))
    }

    fn ancestors(&self, start: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(oid) = queue.pop_front() {
            if !seen.insert(oid) {
                continue;
            }
            if let Some(commit) = self.commits.get(&oid) {
                queue.extend(commit.parents.iter().copied());
            }
        }
        seen
    }

    fn newest_first(&self, oids: &HashSet<Oid>) -> Vec<CommitInfo> {
        let position: HashMap<Oid, usize> =
            self.order.iter().enumerate().map(|(i, oid)| (*oid, i)).collect();

        let mut commits: Vec<CommitInfo> = oids
            .iter()
            .filter_map(|oid| self.commits.get(oid).cloned())
            .collect();
        commits.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| position.get(&b.oid).cmp(&position.get(&a.oid)))
        });
        commits
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    fn head(&self) -> Result<CommitInfo> {
        let oid = self.head_oid()?;
        self.commits
            .get(&oid)
            .cloned()
            .ok_or_else(|| GitSemverError::repository(format!("Commit not found: {}", oid)))
    }

    fn commits_from_head(&self) -> Result<Vec<CommitInfo>> {
        self.commits_since(None)
    }

    fn first_parent_history(&self) -> Result<Vec<CommitInfo>> {
        let mut history = Vec::new();
        let mut next = Some(self.head_oid()?);
        while let Some(oid) = next {
            let Some(commit) = self.commits.get(&oid) else {
                break;
            };
            next = commit.parents.first().copied();
            history.push(commit.clone());
        }
        Ok(history)
    }

    fn commits_since(&self, base: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let mut reachable = self.ancestors(self.head_oid()?);
        if let Some(base) = base {
            for oid in self.ancestors(base) {
                reachable.remove(&oid);
            }
        }
        Ok(self.newest_first(&reachable))
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self.tags.clone())
    }

    fn branch_tip(&self, name: &str) -> Result<Option<Oid>> {
        Ok(self
            .branch_heads
            .get(name)
            .or_else(|| self.branch_heads.get(&format!("origin/{}", name)))
            .copied())
    }

    fn merge_base(&self, a: Oid, b: Oid) -> Result<Option<Oid>> {
        let from_a = self.ancestors(a);
        let common: HashSet<Oid> = self
            .ancestors(b)
            .into_iter()
            .filter(|oid| from_a.contains(oid))
            .collect();
        Ok(self.newest_first(&common).first().map(|c| c.oid))
    }
}
