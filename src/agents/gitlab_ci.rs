use crate::agents::BuildAgent;
use crate::env::Environment;
use crate::variables::VersionVariables;
use std::sync::Arc;

/// GitLab CI
///
/// Each variable is written as an `export` line for the running job, followed
/// by a dotenv line for `artifacts:reports:dotenv` so downstream jobs see it.
pub struct GitLabCi {
    env: Arc<dyn Environment>,
}

impl GitLabCi {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        GitLabCi { env }
    }
}

impl BuildAgent for GitLabCi {
    fn name(&self) -> &'static str {
        "GitLabCi"
    }

    fn env_key(&self) -> &'static str {
        "GITLAB_CI"
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn generate_set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String> {
        vec![
            format!("export GitVersion_{}={}", name, value),
            format!("GitVersion_{}={}", name, value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnvironment;

    #[test]
    fn test_inactive_without_variable() {
        let agent = GitLabCi::new(Arc::new(InMemoryEnvironment::new()));
        assert!(!agent.is_active());
        assert_eq!(
            agent.generate_set_parameter_message("Sha", "abc"),
            vec!["export GitVersion_Sha=abc", "GitVersion_Sha=abc"]
        );
    }
}
