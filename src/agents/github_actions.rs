use crate::agents::BuildAgent;
use crate::env::Environment;
use crate::variables::VersionVariables;
use std::sync::Arc;

/// GitHub Actions
///
/// Actions has no build number command, so the version is reported as is.
/// Each variable is written as a `GitVersion_<Name>=<value>` line for
/// `$GITHUB_ENV`, followed by a `::set-output` command that exposes it to
/// later jobs.
pub struct GitHubActions {
    env: Arc<dyn Environment>,
}

impl GitHubActions {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        GitHubActions { env }
    }
}

impl BuildAgent for GitHubActions {
    fn name(&self) -> &'static str {
        "GitHubActions"
    }

    fn env_key(&self) -> &'static str {
        "GITHUB_ACTIONS"
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn generate_set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String> {
        vec![
            format!("GitVersion_{}={}", name, value),
            format!("::set-output name=GitVersion_{}::{}", name, value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnvironment;

    #[test]
    fn test_messages() {
        let agent = GitHubActions::new(Arc::new(
            InMemoryEnvironment::new().with("GITHUB_ACTIONS", "true"),
        ));
        assert!(agent.is_active());

        let variables = VersionVariables {
            full_sem_ver: "2.1.0+7".to_string(),
            ..VersionVariables::default()
        };
        assert_eq!(agent.generate_set_version_message(&variables), "2.1.0+7");
        assert_eq!(
            agent.generate_set_parameter_message("SemVer", "2.1.0"),
            vec![
                "GitVersion_SemVer=2.1.0",
                "::set-output name=GitVersion_SemVer::2.1.0",
            ]
        );
    }
}
