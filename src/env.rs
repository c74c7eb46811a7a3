//! Access to environment variables
//!
//! Build agents read their activation variables through [`Environment`] so
//! tests can supply values without touching the process environment.

use std::collections::HashMap;
use std::sync::RwLock;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, or remove it with `None`
    fn set(&self, key: &str, value: Option<&str>);
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Environment backed by a map
#[derive(Debug, Default)]
pub struct InMemoryEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for tests
    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, Some(value));
        self
    }
}

impl Environment for InMemoryEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .ok()
            .and_then(|vars| vars.get(key).cloned())
    }

    fn set(&self, key: &str, value: Option<&str>) {
        let Ok(mut vars) = self.vars.write() else {
            return;
        };
        match value {
            Some(value) => {
                vars.insert(key.to_string(), value.to_string());
            }
            None => {
                vars.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_in_memory_set_and_remove() {
        let env = InMemoryEnvironment::new().with("A", "1");
        assert_eq!(env.get("A").as_deref(), Some("1"));
        env.set("A", None);
        assert_eq!(env.get("A"), None);
    }

    #[test]
    #[serial]
    fn test_process_environment_round_trip() {
        let env = ProcessEnvironment;
        let key = "GIT_SEMVER_ENV_TEST";
        env.set(key, Some("value"));
        assert_eq!(env.get(key).as_deref(), Some("value"));
        env.set(key, None);
        assert_eq!(env.get(key), None);
    }
}
