//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest lock wait a configuration may ask for, in seconds.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Validates merged configuration values.
///
/// # Examples
///
/// ```
/// use seatbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let config = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&config).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] when the lock wait is outside
    /// 1 to 3600 seconds.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if !(1..=MAX_LOCK_WAIT_SECONDS).contains(&timeout) {
                return Err(Error::InvalidSetting {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!(
                        "{timeout} is out of range (1 to {MAX_LOCK_WAIT_SECONDS} seconds)"
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_wait(seconds: u64) -> Config {
        Config {
            maximum_lock_wait_seconds: Some(seconds),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_lock_wait_bounds() {
        assert!(ConfigValidator::validate(&with_wait(1)).is_ok());
        assert!(ConfigValidator::validate(&with_wait(3600)).is_ok());
        assert!(ConfigValidator::validate(&with_wait(0)).is_err());
        assert!(ConfigValidator::validate(&with_wait(3601)).is_err());
    }

    #[test]
    fn test_error_names_field() {
        match ConfigValidator::validate(&with_wait(0)).unwrap_err() {
            Error::InvalidSetting { field, message } => {
                assert_eq!(field, "maximum_lock_wait_seconds");
                assert!(message.contains("out of range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
