//! Configuration validation.
//!
//! # Responsibilities
//! - Check environment variable names used in field tags
//! - Check the shape of a record schema before loading it
//! - Check loaded values (required fields non-empty)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::loader::ConfigError;
use crate::config::schema::RedirectorConfig;

static ENV_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9]([A-Z0-9_]*[A-Z0-9])?$").expect("env name pattern is valid")
});

/// Check an environment variable name: uppercase letters, digits and
/// underscores, starting and ending with a letter or digit.
pub fn validate_env_name(name: &str) -> Result<(), &'static str> {
    if ENV_NAME.is_match(name) {
        Ok(())
    } else {
        Err("name must be uppercase letters, digits or underscores, starting and ending with a letter or digit")
    }
}

/// Reject schemas that cannot describe a flat record.
pub fn validate_schema(fields: &[(&'static str, &'static str)]) -> Result<(), ConfigError> {
    if fields.is_empty() {
        return Err(ConfigError::InvalidSchema("record declares no fields".into()));
    }

    let mut seen = HashSet::new();
    for (field, _) in fields {
        if field.is_empty() {
            return Err(ConfigError::InvalidSchema("field name is empty".into()));
        }
        if !seen.insert(*field) {
            return Err(ConfigError::InvalidSchema(format!(
                "field {field:?} is declared more than once"
            )));
        }
    }
    Ok(())
}

/// Semantic checks on a loaded [`RedirectorConfig`].
pub fn validate_config(config: &RedirectorConfig) -> Result<(), ConfigError> {
    let required = [
        ("file_id", &config.file_id),
        ("username", &config.username),
        ("password", &config.password),
        ("bind_address", &config.bind_address),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(ConfigError::EmptyValue(field));
        }
    }
    Ok(())
}
