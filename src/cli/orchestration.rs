//! Command workflows
//!
//! The binary parses arguments and hands off to these functions, which can
//! also be driven programmatically (and from tests) without clap.

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::agents::detect_build_agent;
use crate::calculation::{VersionCalculator, VersionResult};
use crate::config::load_config;
use crate::env::Environment;
use crate::normalize::{normalize, NormalizeOptions};
use crate::variables::VersionVariables;

/// How `calculate` reports its result on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Every variable as a JSON object
    #[default]
    Json,
    /// Messages in the protocol of the detected build agent
    BuildServer,
}

/// Arguments for the calculate workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculateArgs {
    pub work_dir: Option<PathBuf>,
    pub config_path: Option<String>,
    pub output: OutputFormat,
    /// Print only this variable
    pub show_variable: Option<String>,
}

/// Result of a successful calculate workflow
#[derive(Debug, Clone)]
pub struct CalculateOutcome {
    pub result: VersionResult,
    pub variables: VersionVariables,
    /// Name of the build agent that received the output, if any
    pub agent: Option<&'static str>,
}

/// Validate the working directory and open its repository
pub fn run_normalize(work_dir: Option<PathBuf>) -> Result<()> {
    let options = NormalizeOptions { work_dir };
    normalize(&options)?;
    Ok(())
}

/// Calculate the version and write it to `out` in the requested format
pub fn run_calculate(
    args: &CalculateArgs,
    env: Arc<dyn Environment>,
    out: &mut dyn Write,
) -> Result<CalculateOutcome> {
    let repo = normalize(&NormalizeOptions {
        work_dir: args.work_dir.clone(),
    })?;
    let config = load_config(args.config_path.as_deref(), repo.work_dir())?;

    let result = VersionCalculator::new(&repo, &config).calculate()?;
    let variables = VersionVariables::from_result(&result);
    let mut agent_name = None;

    if let Some(name) = &args.show_variable {
        let value = variables
            .get(name)
            .ok_or_else(|| anyhow!("Unknown variable '{}'", name))?;
        writeln!(out, "{}", value)?;
    } else {
        match args.output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&variables)
                    .context("Failed to serialize version variables")?;
                writeln!(out, "{}", json)?;
            }
            OutputFormat::BuildServer => match detect_build_agent(env) {
                Some(agent) => {
                    agent.write_integration(&variables, out)?;
                    agent_name = Some(agent.name());
                }
                None => {
                    warn!("No build agent detected, printing FullSemVer only");
                    writeln!(out, "{}", variables.full_sem_ver)?;
                }
            },
        }
    }

    Ok(CalculateOutcome {
        result,
        variables,
        agent: agent_name,
    })
}
