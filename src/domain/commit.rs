use crate::domain::branch::friendly_name;
use regex::Regex;
use std::sync::OnceLock;

/// Tool or host that produced a merge commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMessageFormat {
    Default,
    SmartGit,
    BitBucketPull,
    GitHubPull,
    RemoteTracking,
    AzureDevOpsPull,
}

/// Parsed representation of a merge commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeMessage {
    pub format: MergeMessageFormat,
    /// Source branch, with remote prefixes removed
    pub merged_branch: String,
    pub target_branch: Option<String>,
    pub pull_request_number: Option<u64>,
}

fn merge_patterns() -> &'static [(MergeMessageFormat, Regex)] {
    static PATTERNS: OnceLock<Vec<(MergeMessageFormat, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let sources = [
            (
                MergeMessageFormat::Default,
                r"^Merge (?:branch|tag) '(?P<source>[^']*)'(?: into (?P<target>\S*))?",
            ),
            (
                MergeMessageFormat::SmartGit,
                r"^Finish (?P<source>\S*)(?: into (?P<target>\S*))?",
            ),
            (
                MergeMessageFormat::BitBucketPull,
                r"^Merge pull request #(?P<pr>\d+) (?:from|in) (?:.*) from (?P<source>\S*) to (?P<target>\S*)",
            ),
            (
                MergeMessageFormat::GitHubPull,
                r"^Merge pull request #(?P<pr>\d+) (?:from|in) (?:[^\s/]+/)?(?P<source>\S*)(?: into (?P<target>\S*))?",
            ),
            (
                MergeMessageFormat::RemoteTracking,
                r"^Merge remote-tracking branch '(?P<source>[^\s']*)'(?: into (?P<target>\S*))?",
            ),
            (
                MergeMessageFormat::AzureDevOpsPull,
                r"^Merge pull request (?P<pr>\d+) from (?P<source>\S*) into (?P<target>\S*)",
            ),
        ];

        sources
            .into_iter()
            .filter_map(|(format, pattern)| Regex::new(pattern).ok().map(|re| (format, re)))
            .collect()
    })
}

impl MergeMessage {
    /// Parse the first line of a commit message as a merge message
    ///
    /// Supports formats:
    /// - Merge branch 'source' into target
    /// - Finish source into target
    /// - Merge pull request #1 in repo from source to target
    /// - Merge pull request #1 from owner/source
    /// - Merge remote-tracking branch 'origin/source' into target
    /// - Merge pull request 1 from source into target
    pub fn parse(message: &str) -> Option<Self> {
        let first_line = message.lines().next().unwrap_or_default().trim();

        for (format, re) in merge_patterns() {
            let Some(captures) = re.captures(first_line) else {
                continue;
            };

            let source = captures
                .name("source")
                .map(|m| m.as_str())
                .unwrap_or_default();
            if source.is_empty() {
                continue;
            }

            return Some(MergeMessage {
                format: *format,
                merged_branch: friendly_name(source),
                target_branch: captures
                    .name("target")
                    .map(|m| friendly_name(m.as_str()))
                    .filter(|t| !t.is_empty()),
                pull_request_number: captures.name("pr").and_then(|m| m.as_str().parse().ok()),
            });
        }

        None
    }
}
