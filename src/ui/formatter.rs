//! Pure formatting functions for UI output.
//!
//! Human-facing messages go to stderr; stdout carries only machine-readable
//! output (JSON, a single variable, or build agent messages).

use crate::calculation::VersionResult;
use crate::variables::VersionVariables;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Summary of where a calculated version came from.
pub fn format_summary(result: &VersionResult) -> String {
    format!(
        "{} on '{}' from {} ({} commit(s) since)",
        result.version, result.branch.name, result.base_version.source, result.commits_since
    )
}

/// Aligned `Name: value` listing of every variable.
pub fn format_variables(variables: &VersionVariables) -> String {
    let width = variables
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or_default();

    variables
        .iter()
        .map(|(name, value)| format!("{:width$} : {}", name, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the variable listing to stderr with highlighted names.
pub fn display_variables(variables: &VersionVariables) {
    eprintln!("{}", style("Version variables:").bold());
    for line in format_variables(variables).lines() {
        match line.split_once(" : ") {
            Some((name, value)) => eprintln!("  {} : {}", style(name).cyan(), value),
            None => eprintln!("  {}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_variables_lists_every_field() {
        let variables = VersionVariables {
            sem_ver: "1.0.0".to_string(),
            ..VersionVariables::default()
        };
        let text = format_variables(&variables);
        assert_eq!(text.lines().count(), crate::variables::FIELD_NAMES.len());
        assert!(text.lines().any(|line| line.starts_with("SemVer") && line.ends_with(": 1.0.0")));
    }

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
        display_status("test status");
        display_success("test success");
    }
}
