//! `status` command.

use crate::error::CliError;
use crate::utils::{open_engine, print_dry_run, GlobalOptions};
use clap::Args;
use seatbook::{ReservationId, StatusUpdatePlan, SystemClock};

/// Move a reservation to a new status.
///
/// Seating goes through `seat`; this command accepts `finished` and
/// `cancelled` (and rejects anything the lifecycle forbids).
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Requested status
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Validate and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl StatusCommand {
    /// Execute the status command. Prints the resulting status.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (mut engine, _config) = open_engine(global)?;

        if self.dry_run {
            let plan = StatusUpdatePlan::new(self.id, self.status)
                .build_plan(engine.database(), &SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let reservation = engine.update_status(self.id, &self.status)?;
        println!("{}", reservation.status());
        Ok(())
    }
}
