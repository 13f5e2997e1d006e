//! Read-only reservation commands: `show`, `list` and `search`.

use super::FormatArgs;
use crate::error::CliError;
use crate::output::write_reservations;
use crate::utils::{open_engine, GlobalOptions};
use chrono::{NaiveDate, Utc};
use clap::Args;
use seatbook::ReservationId;

/// Show a single reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (engine, config) = open_engine(global)?;
        let reservation = engine.reservation(self.id)?;
        write_reservations(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &[reservation],
        )
    }
}

/// List the reservations of one day that are not finished, by time.
#[derive(Args)]
pub struct ListCommand {
    /// Day to list as YYYY-MM-DD (default: today, UTC)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let (engine, config) = open_engine(global)?;
        let reservations = engine.list_reservations_by_date(date)?;
        write_reservations(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &reservations,
        )
    }
}

/// Find reservations by any fragment of a mobile number.
#[derive(Args)]
pub struct SearchCommand {
    /// Number or fragment; formatting characters are ignored
    #[arg(long, value_name = "NUMBER")]
    pub mobile_number: String,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (engine, config) = open_engine(global)?;
        let reservations = engine.search_reservations_by_phone(&self.mobile_number)?;
        write_reservations(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &reservations,
        )
    }
}
