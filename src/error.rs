use thiserror::Error;

/// Unified error type for git-semver operations
#[derive(Error, Debug)]
pub enum GitSemverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Ambiguous configuration: {0}")]
    AmbiguousConfiguration(String),

    #[error("No base version found: {0}")]
    NoBaseVersionFound(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, GitSemverError>;

impl GitSemverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitSemverError::Config(msg.into())
    }

    /// Create an ambiguity error for conflicting explicit overrides
    pub fn ambiguous(msg: impl Into<String>) -> Self {
        GitSemverError::AmbiguousConfiguration(msg.into())
    }

    /// Create an error for a run where no strategy produced a candidate
    pub fn no_base_version(msg: impl Into<String>) -> Self {
        GitSemverError::NoBaseVersionFound(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitSemverError::Version(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        GitSemverError::Repository(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitSemverError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitSemverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err: GitSemverError = toml_err.into();
        assert!(err
            .to_string()
            .starts_with("Failed to parse configuration file"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitSemverError::config("x"), "Configuration error"),
            (GitSemverError::ambiguous("x"), "Ambiguous configuration"),
            (GitSemverError::no_base_version("x"), "No base version found"),
            (GitSemverError::version("x"), "Version parsing error"),
            (GitSemverError::repository("x"), "Repository error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "message with\nnewline",
            "message with 'quotes'",
            "message with \\ backslash",
        ];

        for msg in special_chars {
            let err = GitSemverError::version(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
