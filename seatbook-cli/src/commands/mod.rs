//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `book` / `edit`: Create or replace a reservation
//! - `show`, `list`, `search`: Read reservations
//! - `status`: Move a reservation through its lifecycle
//! - `add-table`, `tables`: Manage tables
//! - `seat` / `finish`: Assign a reservation to a table and free it again
//! - `completions`: Generate shell completion scripts

pub mod book;
pub mod completions;
pub mod init;
pub mod query;
pub mod seat;
pub mod status;
pub mod tables;

pub use book::{BookCommand, EditCommand};
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use query::{ListCommand, SearchCommand, ShowCommand};
pub use seat::{FinishCommand, SeatCommand};
pub use status::StatusCommand;
pub use tables::{AddTableCommand, TablesCommand};

use clap::Args;
use seatbook::{Config, OutputFormat};

/// `--format` flag shared by every command that prints records.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Output format: table, json, csv or tsv (default from configuration)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArgs {
    /// The flag if given, otherwise the configured format.
    pub fn resolve(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or_else(|| config.output_format())
    }
}
