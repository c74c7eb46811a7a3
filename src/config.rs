use crate::domain::branch::{escape_name, friendly_name};
use crate::domain::{TagPrefix, VersionField};
use crate::error::{GitSemverError, Result};
use crate::strategies::StrategyKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the configuration file looked up in the current and work directories
pub const CONFIG_FILE_NAME: &str = "gitsemver.toml";

/// Placeholder in a branch label replaced by the branch name
pub const BRANCH_NAME_PLACEHOLDER: &str = "{BranchName}";

/// Represents the complete configuration for git-semver.
///
/// Global settings apply to every branch; entries under `branches` override
/// them for branches whose name matches the entry's regex.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Explicit version to use instead of the one derived from history
    #[serde(default)]
    pub next_version: Option<String>,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub mode: VersioningMode,

    #[serde(default)]
    pub increment: IncrementStrategy,

    #[serde(default = "default_label")]
    pub tag: String,

    #[serde(default = "default_true")]
    pub commit_message_incrementing: bool,

    #[serde(default)]
    pub prevent_increment_of_merged_branch_version: bool,

    #[serde(default)]
    pub bump_messages: BumpMessagesConfig,

    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,

    #[serde(default)]
    pub branches: BTreeMap<String, BranchConfig>,
}

/// How pre-release numbers and build metadata are derived
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersioningMode {
    /// Pre-release number is fixed; commits since the version source go in build metadata
    #[default]
    ContinuousDelivery,
    /// Pre-release number counts commits since the version source
    ContinuousDeployment,
    /// Every commit on the mainline increments the version
    Mainline,
}

/// Configured increment for a branch
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncrementStrategy {
    None,
    #[default]
    Patch,
    Minor,
    Major,
    /// Use the global increment
    Inherit,
}

impl IncrementStrategy {
    /// Resolve to a concrete field, using `inherited` for `Inherit`
    pub fn resolve(self, inherited: VersionField) -> VersionField {
        match self {
            IncrementStrategy::None => VersionField::None,
            IncrementStrategy::Patch => VersionField::Patch,
            IncrementStrategy::Minor => VersionField::Minor,
            IncrementStrategy::Major => VersionField::Major,
            IncrementStrategy::Inherit => inherited,
        }
    }
}

/// Per-branch overrides of the global configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchConfig {
    pub regex: String,

    #[serde(default)]
    pub increment: Option<IncrementStrategy>,

    /// Pre-release label; may contain `{BranchName}`
    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub mode: Option<VersioningMode>,

    #[serde(default)]
    pub is_release_branch: bool,

    #[serde(default)]
    pub prevent_increment_of_merged_branch_version: Option<bool>,

    #[serde(default)]
    pub strategies: Option<Vec<StrategyKind>>,
}

impl BranchConfig {
    fn new(regex: &str, increment: IncrementStrategy, tag: &str) -> Self {
        BranchConfig {
            regex: regex.to_string(),
            increment: Some(increment),
            tag: Some(tag.to_string()),
            mode: None,
            is_release_branch: false,
            prevent_increment_of_merged_branch_version: None,
            strategies: None,
        }
    }

    fn compiled_regex(&self, key: &str) -> Result<Regex> {
        Regex::new(&self.regex).map_err(|e| {
            GitSemverError::config(format!(
                "Invalid regex '{}' for branch '{}': {}",
                self.regex, key, e
            ))
        })
    }
}

/// Commit message patterns that force a specific increment.
///
/// A commit whose message matches one of these overrides the branch
/// increment for the commits since the version source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpMessagesConfig {
    #[serde(default = "default_major_message")]
    pub major: String,

    #[serde(default = "default_minor_message")]
    pub minor: String,

    #[serde(default = "default_patch_message")]
    pub patch: String,

    #[serde(default = "default_no_bump_message")]
    pub none: String,
}

fn default_tag_prefix() -> String {
    "[vV]".to_string()
}

fn default_label() -> String {
    BRANCH_NAME_PLACEHOLDER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_major_message() -> String {
    r"\+semver:\s?(breaking|major)".to_string()
}

fn default_minor_message() -> String {
    r"\+semver:\s?(feature|minor)".to_string()
}

fn default_patch_message() -> String {
    r"\+semver:\s?(fix|patch)".to_string()
}

fn default_no_bump_message() -> String {
    r"\+semver:\s?(none|skip)".to_string()
}

/// Returns the strategies enabled when nothing else is configured.
fn default_strategies() -> Vec<StrategyKind> {
    StrategyKind::ALL.to_vec()
}

/// Returns the built-in branch configurations.
fn default_branches() -> BTreeMap<String, BranchConfig> {
    let mut branches = BTreeMap::new();

    let mut main = BranchConfig::new(r"^(master|main)$", IncrementStrategy::Patch, "");
    main.prevent_increment_of_merged_branch_version = Some(true);
    branches.insert("main".to_string(), main);

    branches.insert(
        "develop".to_string(),
        BranchConfig::new(r"^dev(elop)?(ment)?$", IncrementStrategy::Minor, "alpha"),
    );

    let mut release = BranchConfig::new(r"^releases?[/-]", IncrementStrategy::None, "beta");
    release.is_release_branch = true;
    branches.insert("release".to_string(), release);

    let mut hotfix = BranchConfig::new(r"^hotfix(es)?[/-]", IncrementStrategy::Patch, "beta");
    hotfix.is_release_branch = true;
    branches.insert("hotfix".to_string(), hotfix);

    branches.insert(
        "feature".to_string(),
        BranchConfig::new(
            r"^features?[/-]",
            IncrementStrategy::Inherit,
            BRANCH_NAME_PLACEHOLDER,
        ),
    );

    branches
}

impl Default for BumpMessagesConfig {
    fn default() -> Self {
        BumpMessagesConfig {
            major: default_major_message(),
            minor: default_minor_message(),
            patch: default_patch_message(),
            none: default_no_bump_message(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            next_version: None,
            tag_prefix: default_tag_prefix(),
            mode: VersioningMode::default(),
            increment: IncrementStrategy::default(),
            tag: default_label(),
            commit_message_incrementing: true,
            prevent_increment_of_merged_branch_version: false,
            bump_messages: BumpMessagesConfig::default(),
            strategies: default_strategies(),
            branches: default_branches(),
        }
    }
}

/// Compiled commit message patterns
#[derive(Debug, Clone)]
pub struct BumpPatterns {
    pub major: Regex,
    pub minor: Regex,
    pub patch: Regex,
    pub none: Regex,
}

impl BumpPatterns {
    fn compile(config: &BumpMessagesConfig) -> Result<Self> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                GitSemverError::config(format!(
                    "Invalid {} bump message pattern '{}': {}",
                    name, pattern, e
                ))
            })
        };

        Ok(BumpPatterns {
            major: compile("major", &config.major)?,
            minor: compile("minor", &config.minor)?,
            patch: compile("patch", &config.patch)?,
            none: compile("none", &config.none)?,
        })
    }

    /// Increment requested by a commit message, if it carries a directive
    pub fn field_for(&self, message: &str) -> Option<VersionField> {
        if self.major.is_match(message) {
            Some(VersionField::Major)
        } else if self.minor.is_match(message) {
            Some(VersionField::Minor)
        } else if self.patch.is_match(message) {
            Some(VersionField::Patch)
        } else if self.none.is_match(message) {
            Some(VersionField::None)
        } else {
            None
        }
    }
}

/// Configuration resolved for one branch.
///
/// Every field holds exactly one authoritative value: the branch entry's
/// value when set, the global value otherwise.
#[derive(Debug, Clone)]
pub struct EffectiveConfiguration {
    /// Key of the matching `branches` entry, if any
    pub branch_key: Option<String>,
    pub next_version: Option<String>,
    pub tag_prefix: TagPrefix,
    pub mode: VersioningMode,
    pub increment: VersionField,
    /// Pre-release label with `{BranchName}` already expanded
    pub label: String,
    pub is_release_branch: bool,
    pub prevent_increment_of_merged_branch_version: bool,
    pub commit_message_incrementing: bool,
    pub bump_patterns: BumpPatterns,
    pub strategies: Vec<StrategyKind>,
}

impl Config {
    /// Parse a TOML document, layering file branch entries over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        let mut branches = default_branches();
        branches.append(&mut config.branches);
        config.branches = branches;
        Ok(config)
    }

    /// Find the first branch entry (in key order) whose regex matches the branch
    pub fn find_branch_config(&self, branch_name: &str) -> Result<Option<(&str, &BranchConfig)>> {
        let name = friendly_name(branch_name);
        for (key, branch) in &self.branches {
            if branch.compiled_regex(key)?.is_match(&name) {
                return Ok(Some((key.as_str(), branch)));
            }
        }
        Ok(None)
    }

    /// True when the branch matches an entry flagged as a release branch
    pub fn is_release_branch(&self, branch_name: &str) -> Result<bool> {
        Ok(self
            .find_branch_config(branch_name)?
            .map(|(_, branch)| branch.is_release_branch)
            .unwrap_or(false))
    }

    /// Increment configured for a branch, falling back to the global one
    pub fn increment_for(&self, branch_name: &str) -> Result<VersionField> {
        let global = self.increment.resolve(VersionField::Patch);
        Ok(match self.find_branch_config(branch_name)? {
            Some((_, branch)) => branch.increment.unwrap_or(self.increment).resolve(global),
            None => global,
        })
    }

    /// Resolve the configuration that applies to a branch
    pub fn resolve(&self, branch_name: &str) -> Result<EffectiveConfiguration> {
        let name = friendly_name(branch_name);
        let matched = self.find_branch_config(&name)?;
        let global_increment = self.increment.resolve(VersionField::Patch);

        let tag_prefix = TagPrefix::new(&self.tag_prefix)?;
        let bump_patterns = BumpPatterns::compile(&self.bump_messages)?;

        let effective = match matched {
            Some((key, branch)) => {
                let label_template = branch.tag.as_deref().unwrap_or(&self.tag);
                let stripped = branch
                    .compiled_regex(key)?
                    .replace(&name, "")
                    .into_owned();
                EffectiveConfiguration {
                    branch_key: Some(key.to_string()),
                    next_version: self.next_version.clone(),
                    tag_prefix,
                    mode: branch.mode.unwrap_or(self.mode),
                    increment: branch
                        .increment
                        .unwrap_or(self.increment)
                        .resolve(global_increment),
                    label: expand_label(label_template, &stripped),
                    is_release_branch: branch.is_release_branch,
                    prevent_increment_of_merged_branch_version: branch
                        .prevent_increment_of_merged_branch_version
                        .unwrap_or(self.prevent_increment_of_merged_branch_version),
                    commit_message_incrementing: self.commit_message_incrementing,
                    bump_patterns,
                    strategies: branch
                        .strategies
                        .clone()
                        .unwrap_or_else(|| self.strategies.clone()),
                }
            }
            None => EffectiveConfiguration {
                branch_key: None,
                next_version: self.next_version.clone(),
                tag_prefix,
                mode: self.mode,
                increment: global_increment,
                label: expand_label(&self.tag, &name),
                is_release_branch: false,
                prevent_increment_of_merged_branch_version: self
                    .prevent_increment_of_merged_branch_version,
                commit_message_incrementing: self.commit_message_incrementing,
                bump_patterns,
                strategies: self.strategies.clone(),
            },
        };

        debug!(
            branch = %name,
            matched = ?effective.branch_key,
            increment = ?effective.increment,
            label = %effective.label,
            "Resolved branch configuration"
        );

        Ok(effective)
    }
}

fn expand_label(template: &str, branch_name: &str) -> String {
    template.replace(BRANCH_NAME_PLACEHOLDER, &escape_name(branch_name))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitsemver.toml` in current directory
/// 3. `gitsemver.toml` in the repository work directory
/// 4. `~/.config/.gitsemver.toml` in user config directory
/// 5. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `work_dir` - Optional repository work directory
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, work_dir: Option<&Path>) -> Result<Config> {
    let mut candidates = Vec::new();
    if let Some(path) = config_path {
        let content = fs::read_to_string(path)?;
        debug!(path, "Loaded configuration");
        return Config::from_toml_str(&content);
    }

    candidates.push(Path::new(".").join(CONFIG_FILE_NAME));
    if let Some(dir) = work_dir {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(format!(".{}", CONFIG_FILE_NAME)));
    }

    for candidate in candidates {
        if candidate.exists() {
            let content = fs::read_to_string(&candidate)?;
            debug!(path = %candidate.display(), "Loaded configuration");
            return Config::from_toml_str(&content);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branches_present() {
        let config = Config::default();
        for key in ["main", "develop", "release", "hotfix", "feature"] {
            assert!(config.branches.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_resolve_main() {
        let effective = Config::default().resolve("main").unwrap();
        assert_eq!(effective.branch_key.as_deref(), Some("main"));
        assert_eq!(effective.increment, VersionField::Patch);
        assert_eq!(effective.label, "");
        assert!(effective.prevent_increment_of_merged_branch_version);
    }

    #[test]
    fn test_resolve_feature_expands_branch_name() {
        let effective = Config::default().resolve("feature/login-form").unwrap();
        assert_eq!(effective.label, "login-form");
        assert_eq!(effective.increment, VersionField::Patch);
    }

    #[test]
    fn test_resolve_feature_inherits_global_increment() {
        let mut config = Config::default();
        config.increment = IncrementStrategy::Minor;
        let effective = config.resolve("features/x").unwrap();
        assert_eq!(effective.increment, VersionField::Minor);
    }

    #[test]
    fn test_resolve_unmatched_branch_uses_globals() {
        let effective = Config::default().resolve("bugfix/JIRA_12").unwrap();
        assert_eq!(effective.branch_key, None);
        assert_eq!(effective.label, "bugfix-JIRA-12");
        assert_eq!(effective.strategies, StrategyKind::ALL.to_vec());
    }

    #[test]
    fn test_resolve_release_branch() {
        let effective = Config::default().resolve("origin/release/1.2.0").unwrap();
        assert!(effective.is_release_branch);
        assert_eq!(effective.increment, VersionField::None);
        assert_eq!(effective.label, "beta");
    }

    #[test]
    fn test_invalid_branch_regex_is_config_error() {
        let mut config = Config::default();
        config
            .branches
            .insert("broken".to_string(), BranchConfig::new("(", IncrementStrategy::Patch, ""));
        let err = config.resolve("anything").unwrap_err();
        assert!(matches!(err, GitSemverError::Config(_)));
    }

    #[test]
    fn test_from_toml_merges_with_default_branches() {
        let config = Config::from_toml_str(
            r#"
next_version = "3.0.0"

[branches.develop]
regex = "^develop$"
increment = "major"
tag = "dev"
"#,
        )
        .unwrap();

        assert_eq!(config.next_version.as_deref(), Some("3.0.0"));
        assert!(config.branches.contains_key("release"));
        let effective = config.resolve("develop").unwrap();
        assert_eq!(effective.increment, VersionField::Major);
        assert_eq!(effective.label, "dev");
    }

    #[test]
    fn test_bump_directives() {
        let patterns = BumpPatterns::compile(&BumpMessagesConfig::default()).unwrap();
        assert_eq!(
            patterns.field_for("rework api\n\n+semver: breaking"),
            Some(VersionField::Major)
        );
        assert_eq!(patterns.field_for("+semver: feature"), Some(VersionField::Minor));
        assert_eq!(patterns.field_for("+semver:fix"), Some(VersionField::Patch));
        assert_eq!(patterns.field_for("+semver: skip"), Some(VersionField::None));
        assert_eq!(patterns.field_for("plain message"), None);
    }

    #[test]
    fn test_branch_strategy_override() {
        let config = Config::from_toml_str(
            r#"
[branches.main]
regex = "^main$"
strategies = ["tagged_commit"]
"#,
        )
        .unwrap();
        let effective = config.resolve("main").unwrap();
        assert_eq!(effective.strategies, vec![StrategyKind::TaggedCommit]);
    }
}
