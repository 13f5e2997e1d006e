//! Data directory initialization.
//!
//! Creates the data directory and an empty reservation store, optionally
//! together with a commented configuration file.

use std::fs;
use std::path::PathBuf;

use crate::database::{DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};
use crate::Database;

/// Options for database initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir`.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a default configuration file is written.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# seatbook configuration

# Seconds to wait for a locked database before reporting a conflict (1-3600)
# maximum_lock_wait_seconds: 5

# Refuse to create the database implicitly on first use
# disable_autoinit: false

# Output format for listings: table, json, csv or tsv
# output_format: table
";

/// Initializes the data directory and the reservation store.
///
/// # Errors
///
/// Returns an error if the directory or the database cannot be created, if
/// the configuration file cannot be written, or if a database already exists
/// and `overwrite` is not set.
///
/// # Examples
///
/// ```no_run
/// use seatbook::operations::init::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/seatbook-test")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::InvalidSetting {
                field: "database".into(),
                message: format!(
                    "database already exists at {}; use --overwrite to replace it",
                    db_path.display()
                ),
            });
        }
        log::info!("removing existing database {}", db_path.display());
        fs::remove_file(&db_path)?;
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
