//! Configuration loading from the environment.

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

use crate::config::env::Environment;
use crate::config::schema::{EnvRecord, FieldSpec, RedirectorConfig, ResolvedFields};
use crate::config::validation::validate_schema;

/// Error type for configuration loading. Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `required` variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingRequiredVariable(String),

    /// A field tag is malformed.
    #[error("invalid field tag {tag:?}: {reason}")]
    InvalidFieldTag { tag: String, reason: &'static str },

    /// A `base64` variable could not be decoded.
    #[error("failed to decode {key}: {reason}")]
    DecodeError { key: String, reason: String },

    /// The record schema is not a flat list of named fields.
    #[error("invalid record schema: {0}")]
    InvalidSchema(String),

    /// A field that must carry a value resolved to an empty string.
    #[error("configuration field {0} must not be empty")]
    EmptyValue(&'static str),
}

/// Load any [`EnvRecord`] from `env`.
pub fn load<T: EnvRecord>(env: &dyn Environment) -> Result<T, ConfigError> {
    validate_schema(T::FIELDS)?;

    let mut resolved = ResolvedFields::default();
    for (field, tag) in T::FIELDS {
        let spec = FieldSpec::parse(tag)?;
        let value = resolve(&spec, env)?;
        resolved.insert(*field, value);
    }

    T::from_fields(resolved)
}

/// Load and validate the redirector configuration.
pub fn load_config(env: &dyn Environment) -> Result<RedirectorConfig, ConfigError> {
    load(env)
}

fn resolve(spec: &FieldSpec, env: &dyn Environment) -> Result<String, ConfigError> {
    let raw = match env.var(&spec.key) {
        Some(value) => value,
        None if spec.required => {
            return Err(ConfigError::MissingRequiredVariable(spec.key.clone()))
        }
        None => String::new(),
    };

    let raw = if raw.is_empty() {
        match spec.default.as_deref() {
            Some(default) if !default.is_empty() => default.to_string(),
            _ => return Ok(String::new()),
        }
    } else {
        raw
    };

    if !spec.base64 {
        return Ok(raw);
    }

    let bytes = general_purpose::STANDARD
        .decode(raw.as_bytes())
        .map_err(|e| ConfigError::DecodeError {
            key: spec.key.clone(),
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| ConfigError::DecodeError {
        key: spec.key.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MemoryEnv;

    fn base_env() -> MemoryEnv {
        // "c2VjcmV0" is base64 for "secret"
        MemoryEnv::from_pairs([
            ("FILE_ID", "abc123"),
            ("AUTH_USER", "admin"),
            ("AUTH_PASSWORD", "c2VjcmV0"),
        ])
    }

    #[test]
    fn test_load_config_decodes_password() {
        let config = load_config(&base_env()).unwrap();
        assert_eq!(config.file_id, "abc123");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.bind_address, "0.0.0.0:80");
    }

    #[test]
    fn test_missing_password_is_reported_by_name() {
        let env = base_env();
        env.remove_var("AUTH_PASSWORD");
        match load_config(&env) {
            Err(ConfigError::MissingRequiredVariable(name)) => assert_eq!(name, "AUTH_PASSWORD"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_base64_fails() {
        let env = base_env();
        env.set_var("AUTH_PASSWORD", "not base64!").unwrap();
        assert!(matches!(load_config(&env), Err(ConfigError::DecodeError { .. })));
    }

    #[test]
    fn test_non_utf8_payload_fails() {
        let env = base_env();
        // 0xff 0xfe
        env.set_var("AUTH_PASSWORD", "//4=").unwrap();
        assert!(matches!(load_config(&env), Err(ConfigError::DecodeError { .. })));
    }

    #[test]
    fn test_empty_required_value_fails_validation() {
        let env = base_env();
        env.set_var("FILE_ID", "").unwrap();
        assert!(matches!(load_config(&env), Err(ConfigError::EmptyValue("file_id"))));
    }

    #[test]
    fn test_bind_address_override() {
        let env = base_env();
        env.set_var("BIND_ADDRESS", "127.0.0.1:8080").unwrap();
        assert_eq!(load_config(&env).unwrap().bind_address, "127.0.0.1:8080");
    }

    struct Optional {
        greeting: String,
        token: String,
    }

    impl EnvRecord for Optional {
        const FIELDS: &'static [(&'static str, &'static str)] = &[
            ("greeting", "GREETING,default=hello"),
            ("token", "TOKEN,base64"),
        ];

        fn from_fields(mut fields: ResolvedFields) -> Result<Self, ConfigError> {
            Ok(Self {
                greeting: fields.take("greeting"),
                token: fields.take("token"),
            })
        }
    }

    #[test]
    fn test_defaults_and_optional_fields() {
        let loaded: Optional = load(&MemoryEnv::new()).unwrap();
        assert_eq!(loaded.greeting, "hello");
        assert_eq!(loaded.token, "");

        let env = MemoryEnv::from_pairs([("GREETING", ""), ("TOKEN", "dG9rZW4=")]);
        let loaded: Optional = load(&env).unwrap();
        assert_eq!(loaded.greeting, "hello");
        assert_eq!(loaded.token, "token");
    }

    struct BadTag;

    impl EnvRecord for BadTag {
        const FIELDS: &'static [(&'static str, &'static str)] = &[("value", "lower_case")];

        fn from_fields(_: ResolvedFields) -> Result<Self, ConfigError> {
            Ok(Self)
        }
    }

    #[test]
    fn test_invalid_tag_fails_before_lookup() {
        let env = MemoryEnv::from_pairs([("lower_case", "x")]);
        assert!(matches!(load::<BadTag>(&env), Err(ConfigError::InvalidFieldTag { .. })));
    }

    struct Duplicated;

    impl EnvRecord for Duplicated {
        const FIELDS: &'static [(&'static str, &'static str)] = &[("a", "A"), ("a", "B")];

        fn from_fields(_: ResolvedFields) -> Result<Self, ConfigError> {
            Ok(Self)
        }
    }

    #[test]
    fn test_non_flat_schema_is_rejected() {
        assert!(matches!(
            load::<Duplicated>(&MemoryEnv::new()),
            Err(ConfigError::InvalidSchema(_))
        ));
    }
}
