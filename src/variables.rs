//! Flat string view of a calculated version
//!
//! [`VersionVariables`] is what build agents publish and what the CLI prints.
//! Every field is always present, possibly as an empty string, and the field
//! order is fixed.

use crate::calculation::VersionResult;
use crate::config::VersioningMode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Names of every variable, in publication order
pub const FIELD_NAMES: [&str; 20] = [
    "Major",
    "Minor",
    "Patch",
    "PreReleaseTag",
    "PreReleaseTagWithDash",
    "PreReleaseLabel",
    "PreReleaseNumber",
    "BuildMetaData",
    "FullBuildMetaData",
    "MajorMinorPatch",
    "SemVer",
    "FullSemVer",
    "InformationalVersion",
    "BranchName",
    "EscapedBranchName",
    "Sha",
    "ShortSha",
    "VersionSourceSha",
    "CommitsSinceVersionSource",
    "CommitDate",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionVariables {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub pre_release_tag: String,
    pub pre_release_tag_with_dash: String,
    pub pre_release_label: String,
    pub pre_release_number: String,
    pub build_meta_data: String,
    pub full_build_meta_data: String,
    pub major_minor_patch: String,
    pub sem_ver: String,
    pub full_sem_ver: String,
    pub informational_version: String,
    pub branch_name: String,
    pub escaped_branch_name: String,
    pub sha: String,
    pub short_sha: String,
    pub version_source_sha: String,
    pub commits_since_version_source: String,
    pub commit_date: String,
}

impl VersionVariables {
    /// Derive the variables from a calculation result
    pub fn from_result(result: &VersionResult) -> Self {
        let version = &result.version;
        let pre_release_tag = version
            .pre_release
            .as_ref()
            .map(|tag| tag.to_string())
            .unwrap_or_default();
        let pre_release_tag_with_dash = if pre_release_tag.is_empty() {
            String::new()
        } else {
            format!("-{}", pre_release_tag)
        };

        let build_meta_data = match &version.build_metadata {
            Some(build) => build.clone(),
            None if result.commits_since > 0
                && result.mode != VersioningMode::ContinuousDeployment =>
            {
                result.commits_since.to_string()
            }
            None => String::new(),
        };

        let escaped_branch_name = result.branch.escaped_name();
        let branch_and_sha = format!("Branch.{}.Sha.{}", escaped_branch_name, result.sha);
        let full_build_meta_data = if build_meta_data.is_empty() {
            branch_and_sha
        } else {
            format!("{}.{}", build_meta_data, branch_and_sha)
        };

        let major_minor_patch = version.major_minor_patch();
        let sem_ver = format!("{}{}", major_minor_patch, pre_release_tag_with_dash);
        let full_sem_ver = if build_meta_data.is_empty() {
            sem_ver.clone()
        } else {
            format!("{}+{}", sem_ver, build_meta_data)
        };

        VersionVariables {
            major: version.major.to_string(),
            minor: version.minor.to_string(),
            patch: version.patch.to_string(),
            pre_release_label: version
                .pre_release
                .as_ref()
                .map(|tag| tag.name.clone())
                .unwrap_or_default(),
            pre_release_number: version
                .pre_release
                .as_ref()
                .and_then(|tag| tag.number)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            informational_version: format!("{}+{}", sem_ver, full_build_meta_data),
            pre_release_tag,
            pre_release_tag_with_dash,
            build_meta_data,
            full_build_meta_data,
            major_minor_patch,
            sem_ver,
            full_sem_ver,
            branch_name: result.branch.name.clone(),
            escaped_branch_name,
            short_sha: result.sha.chars().take(7).collect(),
            sha: result.sha.clone(),
            version_source_sha: result.version_source_sha.clone().unwrap_or_default(),
            commits_since_version_source: result.commits_since.to_string(),
            commit_date: DateTime::<Utc>::from_timestamp(result.commit_timestamp, 0)
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Every (name, value) pair, in publication order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let values: [&str; 20] = [
            &self.major,
            &self.minor,
            &self.patch,
            &self.pre_release_tag,
            &self.pre_release_tag_with_dash,
            &self.pre_release_label,
            &self.pre_release_number,
            &self.build_meta_data,
            &self.full_build_meta_data,
            &self.major_minor_patch,
            &self.sem_ver,
            &self.full_sem_ver,
            &self.informational_version,
            &self.branch_name,
            &self.escaped_branch_name,
            &self.sha,
            &self.short_sha,
            &self.version_source_sha,
            &self.commits_since_version_source,
            &self.commit_date,
        ];
        FIELD_NAMES.into_iter().zip(values)
    }

    /// Look up a variable by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}
