//! `book` and `edit` commands.
//!
//! Both take the full set of reservation fields. Missing or malformed flags
//! are not rejected by clap; they reach the library's validation so that the
//! command line and a JSON payload fail the same way.

use crate::error::CliError;
use crate::utils::{lenient_integer, open_engine, print_dry_run, GlobalOptions};
use clap::Args;
use seatbook::{
    CreateReservationPlan, ReservationId, ReservationPayload, SystemClock, UpdateReservationPlan,
};

/// Reservation fields accepted by `book` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct ReservationArgs {
    /// Guest first name
    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    /// Guest last name
    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    /// Contact number; any formatting is kept as given
    #[arg(long, value_name = "NUMBER")]
    pub mobile_number: Option<String>,

    /// Party size
    #[arg(long, value_name = "COUNT")]
    pub people: Option<String>,

    /// Date as YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Time as HH:MM or HH:MM:SS
    #[arg(long, value_name = "TIME")]
    pub time: Option<String>,

    /// Status to request (booked, seated, finished or cancelled)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

impl ReservationArgs {
    /// Converts the flags into a payload. No flags at all means no payload.
    pub fn into_payload(self) -> Option<ReservationPayload> {
        let payload = ReservationPayload {
            people: lenient_integer(self.people.as_deref()),
            first_name: self.first_name,
            last_name: self.last_name,
            mobile_number: self.mobile_number,
            reservation_date: self.date,
            reservation_time: self.time,
            status: self.status,
        };
        (payload != ReservationPayload::default() || self.people.is_some()).then_some(payload)
    }
}

/// Book a new reservation.
#[derive(Args)]
pub struct BookCommand {
    #[command(flatten)]
    pub fields: ReservationArgs,

    /// Validate and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command. Prints the new reservation id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let payload = self.fields.into_payload();

        if self.dry_run {
            let plan = CreateReservationPlan::new(payload).build_plan(&SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let (mut engine, _config) = open_engine(global)?;
        let reservation = engine.create_reservation(payload)?;
        println!("{}", reservation.id());
        Ok(())
    }
}

/// Replace every field of an existing reservation.
#[derive(Args)]
pub struct EditCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    #[command(flatten)]
    pub fields: ReservationArgs,

    /// Validate and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl EditCommand {
    /// Execute the edit command. Prints the reservation id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let payload = self.fields.into_payload();
        let (mut engine, _config) = open_engine(global)?;

        if self.dry_run {
            let plan = UpdateReservationPlan::new(self.id, payload)
                .build_plan(engine.database(), &SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let reservation = engine.update_reservation(self.id, payload)?;
        println!("{}", reservation.id());
        Ok(())
    }
}
