//! CLI structure and command definitions.

use crate::commands::{
    AddTableCommand, BookCommand, CompletionsCommand, EditCommand, FinishCommand, InitCommand,
    ListCommand, SearchCommand, SeatCommand, ShowCommand, StatusCommand, TablesCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Book restaurant reservations and seat them at tables.
#[derive(Parser)]
#[command(name = "seatbook")]
#[command(version, about = "Book reservations and seat them at tables", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SEATBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SEATBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SEATBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Book a new reservation
    Book(BookCommand),

    /// Replace every field of a reservation
    Edit(EditCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List a day's reservations that are not finished
    List(ListCommand),

    /// Search reservations by mobile number
    Search(SearchCommand),

    /// Change a reservation's status
    Status(StatusCommand),

    /// Add a table
    AddTable(AddTableCommand),

    /// List tables
    Tables(TablesCommand),

    /// Seat a reservation at a table
    Seat(SeatCommand),

    /// Finish the reservation seated at a table
    Finish(FinishCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
