//! Utility functions for CLI operations.
//!
//! Configuration loading, data directory resolution, and opening the store.

use crate::error::CliError;
use seatbook::database::{resolve_data_dir as default_data_dir, DATABASE_FILE_NAME};
use seatbook::{Config, ConfigBuilder, Database, DatabaseConfig, Engine, OperationPlan};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` (or `SEATBOOK_DATA_DIR`), then
/// `~/.seatbook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(CliError::from),
    }
}

/// Load hierarchical configuration.
///
/// Command-line flags are applied on top of files and environment.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(resolve_data_dir(global)?);

    if global.disable_autoinit {
        builder = builder.with_config(Config {
            disable_autoinit: Some(true),
            ..Config::default()
        });
    }

    builder.build().map_err(CliError::from)
}

/// Open the store with the configured lock wait and auto-init policy.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));

    let mut db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);
    if !config.autoinit() {
        db_config = db_config.existing_only();
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Load configuration and open an engine on the store.
pub fn open_engine(global: &GlobalOptions) -> Result<(Engine, Config), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    Ok((Engine::new(db), config))
}

/// Print what a plan would do, for `--dry-run`.
pub fn print_dry_run(plan: &OperationPlan, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    print_warnings(&plan.warnings, quiet);
}

/// Print warnings to stderr unless `quiet`.
pub fn print_warnings(warnings: &[String], quiet: bool) {
    if quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Parse a free-form party size the way a JSON payload would be read:
/// anything that is not an integer counts as absent.
pub fn lenient_integer(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}
