use crate::agents::BuildAgent;
use crate::env::Environment;
use crate::variables::VersionVariables;
use regex::{Captures, Regex};
use std::sync::{Arc, OnceLock};

const BUILD_NUMBER_KEY: &str = "BUILD_BUILDNUMBER";
const SET_BUILD_NUMBER: &str = "##vso[build.updatebuildnumber]";

/// Azure Pipelines logging commands (`##vso[...]`)
pub struct AzurePipelines {
    env: Arc<dyn Environment>,
}

impl AzurePipelines {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        AzurePipelines { env }
    }
}

/// `$(GitVersion.<Field>)` or `$(GITVERSION_<FIELD>)`, the latter in any case
fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\$\((?:GitVersion\.(\w+)|(?i:GITVERSION_(\w+)))\)").ok())
        .as_ref()
}

/// Replace placeholders in one pass, returning the text and how many were known
fn substitute(template: &str, variables: &VersionVariables) -> (String, usize) {
    let Some(pattern) = placeholder_pattern() else {
        return (template.to_string(), 0);
    };

    let mut substituted = 0;
    let output = pattern.replace_all(template, |caps: &Captures<'_>| {
        let value = match (caps.get(1), caps.get(2)) {
            (Some(dotted), _) => variables
                .iter()
                .find(|(name, _)| *name == dotted.as_str())
                .map(|(_, value)| value),
            (None, Some(underscored)) => variables.get(underscored.as_str()),
            (None, None) => None,
        };
        match value {
            Some(value) => {
                substituted += 1;
                value.to_string()
            }
            None => caps[0].to_string(),
        }
    });
    (output.into_owned(), substituted)
}

/// Replace the placeholders of known variables in a build number template
///
/// `$(GitVersion.<Field>)` must match the field name exactly;
/// `$(GITVERSION_<FIELD>)` matches in any case. Anything else is kept, and
/// substituted values are never scanned again.
pub fn substitute_placeholders(template: &str, variables: &VersionVariables) -> String {
    substitute(template, variables).0
}

impl BuildAgent for AzurePipelines {
    fn name(&self) -> &'static str {
        "AzurePipelines"
    }

    fn env_key(&self) -> &'static str {
        BUILD_NUMBER_KEY
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn generate_set_version_message(&self, variables: &VersionVariables) -> String {
        let Some(template) = self.activation_value() else {
            return variables.full_sem_ver.clone();
        };

        let (build_number, substituted) = substitute(&template, variables);
        if substituted > 0 {
            return format!("{}{}", SET_BUILD_NUMBER, build_number);
        }

        let full_sem_ver = &variables.full_sem_ver;
        let fallback = full_sem_ver.strip_suffix("+0").unwrap_or(full_sem_ver);
        format!("{}{}", SET_BUILD_NUMBER, fallback)
    }

    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String> {
        vec![
            format!("##vso[task.setvariable variable=GitVersion.{}]{}", name, value),
            format!(
                "##vso[task.setvariable variable=GitVersion.{};isOutput=true]{}",
                name, value
            ),
        ]
    }
}
