//! Build agent reporting
//!
//! Each CI system has its own log protocol for publishing a build number and
//! variables. A [`BuildAgent`] knows how to detect that it is running (by
//! reading its activation variable) and how to format those messages. Agents
//! only read the environment; they never change it.

pub mod azure_pipelines;
pub mod github_actions;
pub mod gitlab_ci;
pub mod team_city;

pub use azure_pipelines::AzurePipelines;
pub use github_actions::GitHubActions;
pub use gitlab_ci::GitLabCi;
pub use team_city::TeamCity;

use crate::env::Environment;
use crate::variables::VersionVariables;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

pub trait BuildAgent: Send + Sync {
    /// Identity of the CI system, e.g. "AzurePipelines"
    fn name(&self) -> &'static str;

    /// Environment variable whose presence marks the agent as active
    fn env_key(&self) -> &'static str;

    fn environment(&self) -> &dyn Environment;

    /// Non-blank value of the activation variable
    fn activation_value(&self) -> Option<String> {
        self.environment()
            .get(self.env_key())
            .filter(|value| !value.trim().is_empty())
    }

    fn is_active(&self) -> bool {
        self.activation_value().is_some()
    }

    /// Message that sets the build number
    ///
    /// Falls back to the plain FullSemVer when the agent is not active.
    fn generate_set_version_message(&self, variables: &VersionVariables) -> String;

    /// Lines that publish one variable: a plain line, then one that exposes
    /// it to later pipeline stages. The value is written verbatim.
    fn generate_set_parameter_message(&self, name: &str, value: &str) -> Vec<String>;

    /// Write the build number followed by every variable, in field order
    fn write_integration(
        &self,
        variables: &VersionVariables,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        debug!(agent = self.name(), "Writing build agent integration");
        writeln!(writer, "{}", self.generate_set_version_message(variables))?;
        for (name, value) in variables.iter() {
            for line in self.generate_set_parameter_message(name, value) {
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Every supported agent, in detection order
pub fn all_agents(env: Arc<dyn Environment>) -> Vec<Box<dyn BuildAgent>> {
    vec![
        Box::new(AzurePipelines::new(env.clone())),
        Box::new(TeamCity::new(env.clone())),
        Box::new(GitHubActions::new(env.clone())),
        Box::new(GitLabCi::new(env)),
    ]
}

/// The first active agent, or None for a local run
pub fn detect_build_agent(env: Arc<dyn Environment>) -> Option<Box<dyn BuildAgent>> {
    let agent = all_agents(env).into_iter().find(|agent| agent.is_active());
    match &agent {
        Some(agent) => debug!(agent = agent.name(), "Detected build agent"),
        None => debug!("No build agent detected"),
    }
    agent
}
