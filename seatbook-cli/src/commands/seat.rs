//! `seat` and `finish` commands.

use super::FormatArgs;
use crate::error::CliError;
use crate::output::write_tables;
use crate::utils::{open_engine, print_dry_run, GlobalOptions};
use clap::Args;
use seatbook::operations::{FinishPlan, SeatPlan};
use seatbook::{ReservationId, SystemClock, TableId};

/// Seat a booked reservation at a free table.
#[derive(Args)]
pub struct SeatCommand {
    /// Table id
    #[arg(long, value_name = "ID")]
    pub table: TableId,

    /// Reservation id
    #[arg(long, value_name = "ID")]
    pub reservation: ReservationId,

    /// Check the preconditions and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl SeatCommand {
    /// Execute the seat command. Prints the occupied table.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut engine, config) = open_engine(global)?;

        if self.dry_run {
            let plan = SeatPlan::new(self.table, self.reservation)
                .build_plan(engine.database(), &SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let table = engine.seat(self.table, self.reservation)?;
        write_tables(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &[table],
        )
    }
}

/// Finish the reservation seated at a table and free the table.
#[derive(Args)]
pub struct FinishCommand {
    /// Table id
    #[arg(value_name = "TABLE")]
    pub table: TableId,

    /// Check the preconditions and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl FinishCommand {
    /// Execute the finish command. Prints the freed table.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut engine, config) = open_engine(global)?;

        if self.dry_run {
            let plan = FinishPlan::new(self.table).build_plan(engine.database(), &SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let table = engine.finish(self.table)?;
        write_tables(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &[table],
        )
    }
}
