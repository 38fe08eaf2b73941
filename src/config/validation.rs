//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, host present)
//! - Reject malformed route prefixes before any plugin runs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::path::validate_prefix;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.host must not be empty")]
    EmptyHost,

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("plugins.registration_timeout_ms must be greater than zero")]
    ZeroRegistrationTimeout,

    #[error("plugins.prefix is invalid: {0}")]
    InvalidPrefix(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.plugins.registration_timeout_ms == 0 {
        errors.push(ValidationError::ZeroRegistrationTimeout);
    }

    // An empty prefix means "no prefix".
    if let Some(prefix) = config.plugins.prefix.as_deref().filter(|p| !p.is_empty()) {
        if let Err(e) = validate_prefix(prefix) {
            errors.push(ValidationError::InvalidPrefix(e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.server.host = "  ".into();
        config.server.request_timeout_secs = 0;
        config.plugins.registration_timeout_ms = 0;
        config.plugins.prefix = Some("plugins".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::EmptyHost);
        assert_eq!(errors[1], ValidationError::ZeroRequestTimeout);
        assert_eq!(errors[2], ValidationError::ZeroRegistrationTimeout);
        assert!(matches!(errors[3], ValidationError::InvalidPrefix(_)));
    }

    #[test]
    fn test_empty_prefix_is_allowed() {
        let mut config = ServerConfig::default();
        config.plugins.prefix = Some(String::new());
        assert!(validate_config(&config).is_ok());
    }
}
