pub mod agents;
pub mod calculation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod git;
pub mod normalize;
pub mod strategies;
pub mod telemetry;
pub mod ui;
pub mod variables;

pub use error::{GitSemverError, Result};
