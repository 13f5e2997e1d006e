//! One-call entry points for every engine operation.
//!
//! [`Engine`] owns a store handle and a clock and runs plan and execute for
//! each operation in a single call. The plan types remain available for
//! callers that want dry runs or to inspect warnings.

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};
use crate::table::{Table, TableId};
use crate::validation::{ReservationPayload, TablePayload};

use super::assignment::AssignmentCoordinator;
use super::book::{CreateReservationPlan, UpdateReservationPlan};
use super::executor::{ExecutionResult, PlanExecutor};
use super::plan::OperationPlan;
use super::status::StatusUpdatePlan;
use super::tables::CreateTablePlan;

/// The reservation and table consistency engine.
///
/// # Examples
///
/// ```no_run
/// use seatbook::{DatabaseConfig, Engine, ReservationPayload, TablePayload};
///
/// let mut engine = Engine::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
/// let table = engine
///     .create_table(Some(TablePayload {
///         table_name: Some("A1".into()),
///         capacity: Some(4),
///     }))
///     .unwrap();
/// let reservation = engine
///     .create_reservation(Some(ReservationPayload {
///         first_name: Some("Ada".into()),
///         last_name: Some("Lovelace".into()),
///         mobile_number: Some("555-0100".into()),
///         people: Some(2),
///         reservation_date: Some("2031-05-02".into()),
///         reservation_time: Some("18:00".into()),
///         status: None,
///     }))
///     .unwrap();
///
/// let seated = engine.seat(table.id(), reservation.id()).unwrap();
/// assert_eq!(seated.occupant(), Some(reservation.id()));
/// ```
pub struct Engine {
    db: Database,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Wraps an open store, using the wall clock.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, Box::new(SystemClock))
    }

    /// Wraps an open store with a custom clock.
    #[must_use]
    pub fn with_clock(db: Database, clock: Box<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Returns the underlying store mutably.
    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Consumes the engine and returns the store.
    #[must_use]
    pub fn into_database(self) -> Database {
        self.db
    }

    /// Validates and stores a new reservation in `booked`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or a store error.
    pub fn create_reservation(&mut self, payload: Option<ReservationPayload>) -> Result<Reservation> {
        let plan = CreateReservationPlan::new(payload).build_plan(self.clock.as_ref())?;
        let result = self.execute(&plan)?;
        written_reservation(result, None)
    }

    /// Reads one reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`] if it does not exist.
    pub fn reservation(&self, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(self.db.connection(), id)?
            .ok_or(Error::ReservationNotFound { id })
    }

    /// Lists the reservations on `date` that are not finished, by time.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn list_reservations_by_date(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        Database::list_reservations_by_date(self.db.connection(), date)
    }

    /// Finds reservations whose mobile number contains the digits of `raw`.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn search_reservations_by_phone(&self, raw: &str) -> Result<Vec<Reservation>> {
        Database::search_reservations_by_phone(self.db.connection(), raw)
    }

    /// Moves a reservation to `status` through the state machine.
    ///
    /// # Errors
    ///
    /// See [`StatusUpdatePlan::build_plan`].
    pub fn update_status(&mut self, id: ReservationId, status: &str) -> Result<Reservation> {
        let plan = StatusUpdatePlan::new(id, status).build_plan(&self.db, self.clock.as_ref())?;
        let result = self.execute(&plan)?;
        written_reservation(result, Some(id))
    }

    /// Replaces every field of a reservation.
    ///
    /// # Errors
    ///
    /// See [`UpdateReservationPlan::build_plan`].
    pub fn update_reservation(
        &mut self,
        id: ReservationId,
        payload: Option<ReservationPayload>,
    ) -> Result<Reservation> {
        let plan =
            UpdateReservationPlan::new(id, payload).build_plan(&self.db, self.clock.as_ref())?;
        let result = self.execute(&plan)?;
        written_reservation(result, Some(id))
    }

    /// Validates and stores a new, free table.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or a store error.
    pub fn create_table(&mut self, payload: Option<TablePayload>) -> Result<Table> {
        let plan = CreateTablePlan::new(payload).build_plan(self.clock.as_ref())?;
        let result = self.execute(&plan)?;
        result.table.ok_or_else(|| Error::Conflict {
            details: "created table was not readable before commit".to_string(),
        })
    }

    /// Lists every table by name.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn list_tables(&self) -> Result<Vec<Table>> {
        Database::list_tables(self.db.connection())
    }

    /// Reads one table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] if it does not exist.
    pub fn table(&self, id: TableId) -> Result<Table> {
        Database::get_table(self.db.connection(), id)?.ok_or(Error::TableNotFound { id })
    }

    /// Seats a reservation at a table.
    ///
    /// # Errors
    ///
    /// See [`AssignmentCoordinator::seat`].
    pub fn seat(&mut self, table: TableId, reservation: ReservationId) -> Result<Table> {
        AssignmentCoordinator::new(&mut self.db)
            .with_clock(self.clock.as_ref())
            .seat(table, reservation)
    }

    /// Finishes the reservation seated at a table.
    ///
    /// # Errors
    ///
    /// See [`AssignmentCoordinator::finish`].
    pub fn finish(&mut self, table: TableId) -> Result<Table> {
        AssignmentCoordinator::new(&mut self.db)
            .with_clock(self.clock.as_ref())
            .finish(table)
    }

    fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let result = PlanExecutor::new(&mut self.db).execute(plan)?;
        for warning in &result.warnings {
            log::warn!("{warning}");
        }
        Ok(result)
    }
}

fn written_reservation(result: ExecutionResult, id: Option<ReservationId>) -> Result<Reservation> {
    result.reservation.ok_or_else(|| match id {
        Some(id) => Error::ReservationNotFound { id },
        None => Error::Conflict {
            details: "created reservation was not readable before commit".to_string(),
        },
    })
}
