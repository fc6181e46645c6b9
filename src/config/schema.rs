//! Configuration schema definitions.
//!
//! A record loaded from the environment implements [`EnvRecord`]: it lists
//! its fields as `(field name, tag)` pairs and builds itself from the
//! resolved values. A tag names the environment variable and its options:
//!
//! ```text
//! AUTH_PASSWORD,required,base64
//! BIND_ADDRESS,default=0.0.0.0:80
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::config::loader::ConfigError;
use crate::config::validation::{validate_config, validate_env_name};

/// Parsed form of a field tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSpec {
    /// Environment variable name.
    pub key: String,

    /// Fail the load when the variable is unset.
    pub required: bool,

    /// Decode the resolved value as standard base64.
    pub base64: bool,

    /// Value used when the variable is unset or empty.
    pub default: Option<String>,
}

impl FieldSpec {
    /// Parse a tag of the form `NAME[,required][,base64][,default=<value>]`.
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        let mut parts = tag.split(',');
        let key = parts.next().unwrap_or_default();
        validate_env_name(key).map_err(|reason| ConfigError::InvalidFieldTag {
            tag: tag.to_string(),
            reason,
        })?;

        let mut spec = FieldSpec {
            key: key.to_string(),
            ..Default::default()
        };

        for option in parts {
            match option {
                "required" => spec.required = true,
                "base64" => spec.base64 = true,
                opt if opt.starts_with("default") => match opt.strip_prefix("default=") {
                    Some(value) => spec.default = Some(value.to_string()),
                    None => {
                        return Err(ConfigError::InvalidFieldTag {
                            tag: tag.to_string(),
                            reason: "default option must follow the pattern 'default=<value>'",
                        })
                    }
                },
                other => {
                    tracing::warn!(tag, option = other, "Ignoring unknown field tag option");
                }
            }
        }

        Ok(spec)
    }
}

/// Values resolved from the environment, keyed by field name.
#[derive(Debug, Default)]
pub struct ResolvedFields {
    values: HashMap<&'static str, String>,
}

impl ResolvedFields {
    pub(crate) fn insert(&mut self, field: &'static str, value: String) {
        self.values.insert(field, value);
    }

    /// Take the value for `field`, or an empty string if it was never resolved.
    pub fn take(&mut self, field: &str) -> String {
        self.values.remove(field).unwrap_or_default()
    }
}

/// A flat record that can be populated from environment variables.
pub trait EnvRecord: Sized {
    /// `(field name, tag)` pairs, one per field.
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Build the record from resolved field values.
    fn from_fields(fields: ResolvedFields) -> Result<Self, ConfigError>;
}

/// Root configuration for the redirector.
#[derive(Clone, PartialEq, Eq)]
pub struct RedirectorConfig {
    /// Identifier of the file currently redirected to.
    pub file_id: String,

    /// Basic-Auth user allowed to repoint the redirect.
    pub username: String,

    /// Basic-Auth password, decoded from base64.
    pub password: String,

    /// Listener bind address.
    pub bind_address: String,
}

/// Default listener address: plain HTTP on port 80.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:80";

impl EnvRecord for RedirectorConfig {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("file_id", "FILE_ID,required"),
        ("username", "AUTH_USER,required"),
        ("password", "AUTH_PASSWORD,required,base64"),
        ("bind_address", "BIND_ADDRESS,default=0.0.0.0:80"),
    ];

    fn from_fields(mut fields: ResolvedFields) -> Result<Self, ConfigError> {
        let config = Self {
            file_id: fields.take("file_id"),
            username: fields.take("username"),
            password: fields.take("password"),
            bind_address: fields.take("bind_address"),
        };
        validate_config(&config)?;
        Ok(config)
    }
}

impl fmt::Debug for RedirectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectorConfig")
            .field("file_id", &self.file_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .finish()
    }
}
