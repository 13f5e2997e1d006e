//! Environment variable handling for configuration overrides.
//!
//! `SEATBOOK_*` variables override values from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "SEATBOOK_DISABLE_AUTOINIT";

/// Overrides `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_ENV: &str = "SEATBOOK_MAXIMUM_LOCK_WAIT_SECONDS";

/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "SEATBOOK_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seatbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `SEATBOOK_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] naming the variable if a value
    /// cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::InvalidSetting {
                    field: LOCK_WAIT_ENV.into(),
                    message: format!("'{seconds}' is not a positive integer"),
                })?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(format.parse::<OutputFormat>().map_err(|message| {
                Error::InvalidSetting {
                    field: OUTPUT_FORMAT_ENV.into(),
                    message,
                }
            })?);
        }

        Ok(())
    }

    /// Parses a boolean value.
    ///
    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::InvalidSetting {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for var in [DISABLE_AUTOINIT_ENV, LOCK_WAIT_ENV, OUTPUT_FORMAT_ENV] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_variables_leaves_config() {
        clear();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_all_variables_applied() {
        clear();
        env::set_var(DISABLE_AUTOINIT_ENV, "Yes");
        env::set_var(LOCK_WAIT_ENV, "12");
        env::set_var(OUTPUT_FORMAT_ENV, "json");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear();

        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    #[serial]
    fn test_invalid_boolean_names_variable() {
        clear();
        env::set_var(DISABLE_AUTOINIT_ENV, "maybe");
        let err = EnvironmentConfig::apply_overrides(&mut Config::default()).unwrap_err();
        clear();

        match err {
            Error::InvalidSetting { field, .. } => assert_eq!(field, DISABLE_AUTOINIT_ENV),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_invalid_lock_wait() {
        clear();
        env::set_var(LOCK_WAIT_ENV, "-3");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_output_format() {
        clear();
        env::set_var(OUTPUT_FORMAT_ENV, "yaml");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear();
        assert!(result.is_err());
    }
}
