//! Build script for seatbook-cli.
//!
//! Generates the man page with clap_mangen into `OUT_DIR/man`.
//!
//! The command tree is rebuilt here because a build script cannot depend on
//! the crate it builds.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("seatbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book reservations and seat them at tables")
        .long_about(
            "Command-line tool for restaurant reservations and table assignments, \
             backed by a local SQLite database",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SEATBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SEATBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("SEATBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the seatbook database and, optionally, a configuration file"),
            Command::new("book")
                .about("Book a new reservation")
                .long_about("Validate the reservation fields and store a booked reservation"),
            Command::new("edit")
                .about("Replace every field of a reservation")
                .long_about("Validate a full set of fields and apply them to a reservation"),
            Command::new("show").about("Show one reservation"),
            Command::new("list")
                .about("List a day's reservations that are not finished")
                .long_about("List the reservations of one date, ordered by time"),
            Command::new("search")
                .about("Search reservations by mobile number")
                .long_about("Find reservations whose number contains the given digits"),
            Command::new("status")
                .about("Change a reservation's status")
                .long_about("Move a reservation to finished or cancelled"),
            Command::new("add-table").about("Add a table"),
            Command::new("tables").about("List tables"),
            Command::new("seat")
                .about("Seat a reservation at a table")
                .long_about("Seat a booked reservation at a free table that fits the party"),
            Command::new("finish")
                .about("Finish the reservation seated at a table")
                .long_about("Mark the seated reservation finished and free the table"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();
    fs::write(man_dir.join("seatbook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
