use crate::agents::BuildAgent;
use crate::env::Environment;
use crate::variables::VersionVariables;
use std::sync::Arc;

/// TeamCity service messages (`##teamcity[...]`)
pub struct TeamCity {
    env: Arc<dyn Environment>,
}

impl TeamCity {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        TeamCity { env }
    }
}

/// Escape a value for a TeamCity service message
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl BuildAgent for TeamCity {
    fn name(&self) -> &'static str {
        "TeamCity"
    }

    fn env_key(&self) -> &'static str {
        "TEAMCITY_VERSION"
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn generate_set_version_message(&self, variables: &VersionVariables) -> String {
        if !self.is_active() {
            return variables.full_sem_ver.clone();
        }
        format!(
            "##teamcity[buildNumber '{}']",
            escape_value(&variables.full_sem_ver)
        )
    }

    /// Sets the build parameter and its `system.` twin
    ///
    /// Values go out verbatim. Only the build number is escaped.
    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String> {
        vec![
            format!(
                "##teamcity[setParameter name='GitVersion.{}' value='{}']",
                name, value
            ),
            format!(
                "##teamcity[setParameter name='system.GitVersion.{}' value='{}']",
                name, value
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnvironment;

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("a|b'c[d]e\nf\r"), "a||b|'c|[d|]e|nf|r");
        assert_eq!(escape_value("1.0.0"), "1.0.0");
    }

    #[test]
    fn test_build_number_message() {
        let agent = TeamCity::new(Arc::new(
            InMemoryEnvironment::new().with("TEAMCITY_VERSION", "2023.05"),
        ));
        let variables = VersionVariables {
            full_sem_ver: "1.0.0-beta.1+3".to_string(),
            ..VersionVariables::default()
        };
        assert_eq!(
            agent.generate_set_version_message(&variables),
            "##teamcity[buildNumber '1.0.0-beta.1+3']"
        );
    }

    #[test]
    fn test_parameter_messages_keep_value_verbatim() {
        let agent = TeamCity::new(Arc::new(InMemoryEnvironment::new()));
        let lines = agent.generate_set_parameter_message("BranchName", "Branch:'develop'");
        assert_eq!(
            lines,
            vec![
                "##teamcity[setParameter name='GitVersion.BranchName' value='Branch:'develop'']",
                "##teamcity[setParameter name='system.GitVersion.BranchName' value='Branch:'develop'']",
            ]
        );
    }
}
