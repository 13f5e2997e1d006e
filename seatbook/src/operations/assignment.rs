//! Seating and finishing at tables.
//!
//! These are the only operations that write both a reservation and a table.
//! Each one checks its preconditions against the current state, then applies
//! both writes in one transaction. The writes are conditional, so a
//! concurrent seat on the same table loses with [`Error::TableOccupied`]
//! instead of overwriting the winner.

use crate::clock::{Clock, SystemClock};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};
use crate::table::{Table, TableId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Plans seating a reservation at a table.
pub struct SeatPlan {
    table: TableId,
    reservation: ReservationId,
}

impl SeatPlan {
    /// Creates a planner that seats `reservation` at `table`.
    #[must_use]
    pub const fn new(table: TableId, reservation: ReservationId) -> Self {
        Self { table, reservation }
    }

    /// Checks the preconditions and builds the plan.
    ///
    /// The checks run in this order: the table exists, the reservation
    /// exists, the table is free, the party fits, and the reservation is
    /// `booked`.
    ///
    /// # Errors
    ///
    /// Returns the error for the first failed check.
    pub fn build_plan(&self, db: &Database, clock: &dyn Clock) -> Result<OperationPlan> {
        let conn = db.connection();
        let table = Database::get_table(conn, self.table)?
            .ok_or(Error::TableNotFound { id: self.table })?;
        let reservation = Database::get_reservation(conn, self.reservation)?.ok_or(
            Error::ReservationNotFound {
                id: self.reservation,
            },
        )?;

        if table.is_occupied() {
            return Err(Error::TableOccupied { id: table.id() });
        }
        if !table.fits(reservation.people()) {
            return Err(Error::CapacityExceeded {
                people: reservation.people(),
                capacity: table.capacity(),
            });
        }
        if reservation.status() != ReservationStatus::Booked {
            return Err(Error::ReservationStatusViolation {
                id: reservation.id(),
                from: reservation.status(),
                to: ReservationStatus::Seated,
            });
        }

        Ok(OperationPlan::new(format!(
            "Seat reservation {} at table {}",
            self.reservation, table.name
        ))
        .issued_at(clock.now())
        .add_action(PlanAction::SetStatus {
            id: self.reservation,
            from: ReservationStatus::Booked,
            to: ReservationStatus::Seated,
        })
        .add_action(PlanAction::ClaimTable {
            table: self.table,
            reservation: self.reservation,
        }))
    }
}

/// Plans finishing the reservation seated at a table.
pub struct FinishPlan {
    table: TableId,
}

impl FinishPlan {
    /// Creates a planner that finishes whoever sits at `table`.
    #[must_use]
    pub const fn new(table: TableId) -> Self {
        Self { table }
    }

    /// Checks the preconditions and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] or [`Error::TableNotOccupied`].
    pub fn build_plan(&self, db: &Database, clock: &dyn Clock) -> Result<OperationPlan> {
        let table = Database::get_table(db.connection(), self.table)?
            .ok_or(Error::TableNotFound { id: self.table })?;
        let occupant = table
            .occupant()
            .ok_or(Error::TableNotOccupied { id: self.table })?;

        Ok(
            OperationPlan::new(format!("Finish table {}", table.name))
                .issued_at(clock.now())
                .add_action(PlanAction::SetStatus {
                    id: occupant,
                    from: ReservationStatus::Seated,
                    to: ReservationStatus::Finished,
                })
                .add_action(PlanAction::ReleaseTable {
                    table: self.table,
                    reservation: occupant,
                }),
        )
    }
}

/// Seats and finishes reservations at tables.
///
/// # Examples
///
/// ```no_run
/// use seatbook::operations::AssignmentCoordinator;
/// use seatbook::{Database, DatabaseConfig, ReservationId, TableId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
/// let mut coordinator = AssignmentCoordinator::new(&mut db);
///
/// let table = coordinator.seat(TableId::new(1), ReservationId::new(7)).unwrap();
/// assert_eq!(table.occupant(), Some(ReservationId::new(7)));
///
/// let table = coordinator.finish(TableId::new(1)).unwrap();
/// assert!(!table.is_occupied());
/// ```
pub struct AssignmentCoordinator<'a> {
    db: &'a mut Database,
    clock: &'a dyn Clock,
}

impl<'a> AssignmentCoordinator<'a> {
    /// Creates a coordinator that uses the wall clock.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            clock: &SystemClock,
        }
    }

    /// Uses `clock` for the timestamps of the writes.
    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Seats `reservation` at `table`.
    ///
    /// On success the reservation is `seated` and the returned table, read
    /// back inside the same transaction, names it as occupant.
    ///
    /// # Errors
    ///
    /// Returns the error for the first failed precondition (see
    /// [`SeatPlan::build_plan`]), [`Error::TableOccupied`] if another seat
    /// on the same table commits first, or [`Error::Conflict`] if the store
    /// stays locked.
    pub fn seat(&mut self, table: TableId, reservation: ReservationId) -> Result<Table> {
        let plan = SeatPlan::new(table, reservation).build_plan(self.db, self.clock)?;
        self.run(&plan, table)
    }

    /// Finishes the reservation seated at `table` and frees the table.
    ///
    /// Capacity is not checked again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`], [`Error::TableNotOccupied`], or
    /// [`Error::Conflict`].
    pub fn finish(&mut self, table: TableId) -> Result<Table> {
        let plan = FinishPlan::new(table).build_plan(self.db, self.clock)?;
        self.run(&plan, table)
    }

    fn run(&mut self, plan: &OperationPlan, table: TableId) -> Result<Table> {
        PlanExecutor::new(self.db)
            .execute(plan)?
            .table
            .ok_or(Error::TableNotFound { id: table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, fields};
    use crate::error::ErrorKind;
    use crate::validation::ValidatedTable;
    use chrono::Utc;

    struct Fixture {
        db: Database,
        table: TableId,
        reservation: ReservationId,
    }

    fn fixture(capacity: u32, people: u32, status: ReservationStatus) -> Fixture {
        let db = create_test_database();
        let table = Database::insert_table(
            db.connection(),
            &ValidatedTable {
                name: "A1".into(),
                capacity,
            },
            Utc::now(),
        )
        .unwrap();
        let mut party = fields("2030-01-04", "18:00", "555");
        party.people = people;
        let reservation =
            Database::insert_reservation(db.connection(), &party, status, Utc::now()).unwrap();
        Fixture {
            db,
            table,
            reservation,
        }
    }

    fn status_of(db: &Database, id: ReservationId) -> ReservationStatus {
        Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap()
            .status()
    }

    #[test]
    fn test_seat_then_finish() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);

        let table = AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, f.reservation)
            .unwrap();
        assert_eq!(table.occupant(), Some(f.reservation));
        assert_eq!(status_of(&f.db, f.reservation), ReservationStatus::Seated);

        let table = AssignmentCoordinator::new(&mut f.db)
            .finish(f.table)
            .unwrap();
        assert_eq!(table.occupant(), None);
        assert_eq!(status_of(&f.db, f.reservation), ReservationStatus::Finished);
    }

    #[test]
    fn test_capacity_exceeded_changes_nothing() {
        let mut f = fixture(4, 6, ReservationStatus::Booked);

        let err = AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, f.reservation)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                people: 6,
                capacity: 4
            }
        ));
        assert_eq!(status_of(&f.db, f.reservation), ReservationStatus::Booked);
        let table = Database::get_table(f.db.connection(), f.table)
            .unwrap()
            .unwrap();
        assert!(!table.is_occupied());
    }

    #[test]
    fn test_exact_capacity_fits() {
        let mut f = fixture(4, 4, ReservationStatus::Booked);
        AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, f.reservation)
            .unwrap();
    }

    #[test]
    fn test_seat_missing_table_reported_first() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);
        let err = AssignmentCoordinator::new(&mut f.db)
            .seat(TableId::new(99), ReservationId::new(98))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableNotFound);
    }

    #[test]
    fn test_seat_missing_reservation() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);
        let err = AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, ReservationId::new(98))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationNotFound);
    }

    #[test]
    fn test_occupied_beats_capacity() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);
        AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, f.reservation)
            .unwrap();

        let mut big = fields("2030-01-04", "19:00", "777");
        big.people = 10;
        let other = Database::insert_reservation(
            f.db.connection(),
            &big,
            ReservationStatus::Booked,
            Utc::now(),
        )
        .unwrap();

        let err = AssignmentCoordinator::new(&mut f.db)
            .seat(f.table, other)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableOccupied);
    }

    #[test]
    fn test_seat_rejects_non_booked() {
        for status in [
            ReservationStatus::Seated,
            ReservationStatus::Finished,
            ReservationStatus::Cancelled,
        ] {
            let mut f = fixture(4, 2, status);
            let err = AssignmentCoordinator::new(&mut f.db)
                .seat(f.table, f.reservation)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ReservationStatusViolation, "{status}");
        }
    }

    #[test]
    fn test_finish_free_table() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);
        let err = AssignmentCoordinator::new(&mut f.db)
            .finish(f.table)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableNotOccupied);
    }

    #[test]
    fn test_finish_missing_table() {
        let mut f = fixture(4, 2, ReservationStatus::Booked);
        let err = AssignmentCoordinator::new(&mut f.db)
            .finish(TableId::new(404))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableNotFound);
    }

    #[test]
    fn test_seat_plan_actions() {
        let f = fixture(4, 2, ReservationStatus::Booked);
        let plan = SeatPlan::new(f.table, f.reservation)
            .build_plan(&f.db, &SystemClock)
            .unwrap();
        assert_eq!(
            plan.actions,
            vec![
                PlanAction::SetStatus {
                    id: f.reservation,
                    from: ReservationStatus::Booked,
                    to: ReservationStatus::Seated,
                },
                PlanAction::ClaimTable {
                    table: f.table,
                    reservation: f.reservation,
                },
            ]
        );
    }
}
