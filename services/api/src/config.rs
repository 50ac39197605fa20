//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::Level;
use voice_style_core::DirectiveConfig;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Allowed browser origin. `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
    pub directive: DirectiveConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_level: Level::INFO,
            cors_origin: None,
            directive: DirectiveConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source, falling back to
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // --- Server Settings ---
        let bind_address = parse_var(&lookup, "BIND_ADDRESS", defaults.bind_address)?;
        let log_level = parse_var(&lookup, "RUST_LOG", defaults.log_level)?;
        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(origin) if !origin.trim().is_empty() && origin.trim() != "*" => {
                Some(origin.trim().parse::<HeaderValue>().map_err(|e| {
                    ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
                })?)
            }
            _ => None,
        };

        // --- Directive Tolerances ---
        let mut directive = defaults.directive;
        directive.sentence_length_tolerance = parse_var(
            &lookup,
            "DIRECTIVE_LENGTH_TOLERANCE",
            directive.sentence_length_tolerance,
        )?;
        directive.ratio_tolerance =
            parse_var(&lookup, "DIRECTIVE_RATIO_TOLERANCE", directive.ratio_tolerance)?;
        directive.max_injected_terms =
            parse_var(&lookup, "DIRECTIVE_MAX_TERMS", directive.max_injected_terms)?;

        if directive.sentence_length_tolerance < 0.0 || directive.ratio_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue(
                "DIRECTIVE_*_TOLERANCE".to_string(),
                "tolerances must not be negative".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            directive,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("'{}' could not be parsed", raw))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 8000);
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.cors_origin.is_none());
        assert_eq!(config.directive, DirectiveConfig::default());
    }

    #[test]
    fn directive_overrides_are_applied() {
        let config = config_from(&[
            ("DIRECTIVE_LENGTH_TOLERANCE", "3.5"),
            ("DIRECTIVE_RATIO_TOLERANCE", "0.1"),
            ("DIRECTIVE_MAX_TERMS", "6"),
            ("CORS_ORIGIN", "http://localhost:5173"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.directive.sentence_length_tolerance, 3.5);
        assert_eq!(config.directive.ratio_tolerance, 0.1);
        assert_eq!(config.directive.max_injected_terms, 6);
        assert_eq!(
            config.cors_origin,
            Some(HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = config_from(&[("BIND_ADDRESS", "not-an-address")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));
        assert!(config_from(&[("DIRECTIVE_RATIO_TOLERANCE", "-0.2")]).is_err());
    }
}
