//! Environment table access.
//!
//! The loader reads from it at boot, the redirect resource writes the
//! current file identifier back into it, and the log-level watcher polls it.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Error returned when a variable cannot be written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Name is empty or contains `=` / NUL.
    #[error("invalid environment variable name {0:?}")]
    InvalidKey(String),

    /// Value contains a NUL byte.
    #[error("value for {key} contains a NUL byte")]
    InvalidValue { key: String },

    /// The backing table rejects writes.
    #[error("environment is read-only; cannot set {key}")]
    ReadOnly { key: String },
}

/// Read/write view of an environment table.
pub trait Environment: Send + Sync {
    /// Look up a variable. `None` means unset; `Some("")` means set but empty.
    fn var(&self, key: &str) -> Option<String>;

    /// Set a variable.
    fn set_var(&self, key: &str, value: &str) -> Result<(), EnvError>;
}

fn check_pair(key: &str, value: &str) -> Result<(), EnvError> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(EnvError::InvalidKey(key.to_string()));
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set_var(&self, key: &str, value: &str) -> Result<(), EnvError> {
        // std::env::set_var panics on these inputs instead of failing.
        check_pair(key, value)?;
        std::env::set_var(key, value);
        Ok(())
    }
}

/// In-memory environment table.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryEnv {
    /// Create an empty, writable table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writable table seeded with `pairs`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
            read_only: false,
        }
    }

    /// Make every subsequent `set_var` fail with [`EnvError::ReadOnly`].
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Remove a variable.
    pub fn remove_var(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

impl Environment for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set_var(&self, key: &str, value: &str) -> Result<(), EnvError> {
        if self.read_only {
            return Err(EnvError::ReadOnly {
                key: key.to_string(),
            });
        }
        check_pair(key, value)?;
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_env_distinguishes_unset_and_empty() {
        let env = MemoryEnv::from_pairs([("EMPTY", "")]);
        assert_eq!(env.var("EMPTY").as_deref(), Some(""));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_set_var_rejects_nul_value() {
        let env = MemoryEnv::new();
        let err = env.set_var("FILE_ID", "a\0b").unwrap_err();
        assert_eq!(err, EnvError::InvalidValue { key: "FILE_ID".into() });
        assert_eq!(env.var("FILE_ID"), None);
    }

    #[test]
    fn test_set_var_rejects_bad_key() {
        let env = MemoryEnv::new();
        assert!(matches!(env.set_var("A=B", "x"), Err(EnvError::InvalidKey(_))));
        assert!(matches!(env.set_var("", "x"), Err(EnvError::InvalidKey(_))));
    }

    #[test]
    fn test_read_only_env_rejects_writes() {
        let env = MemoryEnv::from_pairs([("FILE_ID", "abc")]).read_only();
        assert!(matches!(env.set_var("FILE_ID", "new"), Err(EnvError::ReadOnly { .. })));
        assert_eq!(env.var("FILE_ID").as_deref(), Some("abc"));
    }

    #[test]
    fn test_remove_var() {
        let env = MemoryEnv::from_pairs([("LOG_LEVEL", "INFO")]);
        env.remove_var("LOG_LEVEL");
        assert_eq!(env.var("LOG_LEVEL"), None);
    }

    #[test]
    fn test_process_env_writes_through_to_process() {
        const KEY: &str = "DRIVE_REDIRECTOR_TEST_PROCESS_ENV_WRITE";
        ProcessEnv.set_var(KEY, "abc").unwrap();
        assert_eq!(std::env::var(KEY).as_deref(), Ok("abc"));
        assert_eq!(ProcessEnv.var(KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn test_process_env_rejects_nul_instead_of_panicking() {
        const KEY: &str = "DRIVE_REDIRECTOR_TEST_PROCESS_ENV_NUL";
        let err = ProcessEnv.set_var(KEY, "a\0b").unwrap_err();
        assert_eq!(err, EnvError::InvalidValue { key: KEY.into() });
        assert!(std::env::var_os(KEY).is_none());

        assert!(matches!(ProcessEnv.set_var("A\0B", "x"), Err(EnvError::InvalidKey(_))));
        assert!(matches!(ProcessEnv.set_var("A=B", "x"), Err(EnvError::InvalidKey(_))));
    }
}
