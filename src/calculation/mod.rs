//! Version calculation: strategy orchestration and increment rules

pub mod calculator;
pub mod increment;

pub use calculator::{select_base_version, VersionCalculator, VersionResult};
pub use increment::IncrementFinder;
