//! Init command implementation.
//!
//! Creates the data directory, the database and, on request, a commented
//! configuration file.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use seatbook::config::USER_CONFIG_FILE;
use seatbook::database::DATABASE_FILE_NAME;
use seatbook::operations::{init_database, InitOptions};
use std::path::Path;

/// Initialize the seatbook data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Replace an existing database with an empty one
    #[arg(long)]
    overwrite: bool,

    /// Also write a default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` has no effect here; the global `--data-dir` names
    /// the directory to create.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            self.describe(&data_dir);
            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if global.quiet {
            return Ok(());
        }
        println!("Initialized seatbook in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }

    fn describe(&self, data_dir: &Path) {
        println!("Dry-run mode: no changes will be made");
        println!();
        println!("Would initialize seatbook in: {}", data_dir.display());

        if data_dir.exists() {
            println!("  - Data directory already exists: {}", data_dir.display());
        } else {
            println!("  - Create data directory: {}", data_dir.display());
        }

        let db_path = data_dir.join(DATABASE_FILE_NAME);
        match (db_path.exists(), self.overwrite) {
            (true, true) => {
                println!("  - Remove existing database: {}", db_path.display());
                println!("  - Create new database: {}", db_path.display());
            }
            (true, false) => println!(
                "  - ERROR: Database already exists (use --overwrite to replace): {}",
                db_path.display()
            ),
            (false, _) => println!("  - Create database: {}", db_path.display()),
        }

        if self.with_config {
            let config_path = data_dir.join(USER_CONFIG_FILE);
            if config_path.exists() {
                println!(
                    "  - Configuration file already exists (will not overwrite): {}",
                    config_path.display()
                );
            } else {
                println!("  - Create configuration file: {}", config_path.display());
            }
        }
    }
}
