//! Direct reservation status updates.

use crate::clock::Clock;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};
use crate::status::guard_transition;
use crate::validation::ValidationError;

use super::plan::{OperationPlan, PlanAction};

/// Plans a status change requested directly, without a table.
///
/// The state machine decides which moves are legal. Seating is not
/// available here because it needs a table; use
/// [`super::AssignmentCoordinator::seat`]. Moving a `seated` reservation to
/// `finished` or `cancelled` also frees the table it occupies.
pub struct StatusUpdatePlan {
    id: ReservationId,
    requested: String,
}

impl StatusUpdatePlan {
    /// Creates a planner that moves reservation `id` to `requested`.
    #[must_use]
    pub fn new(id: ReservationId, requested: impl Into<String>) -> Self {
        Self {
            id,
            requested: requested.into(),
        }
    }

    /// Checks the transition and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`], any state machine violation,
    /// or an invalid-state validation error when `seated` is requested.
    pub fn build_plan(&self, db: &Database, clock: &dyn Clock) -> Result<OperationPlan> {
        let current = Database::get_reservation(db.connection(), self.id)?
            .ok_or(Error::ReservationNotFound { id: self.id })?;

        let target = guard_transition(self.id, current.status(), &self.requested)?;
        if target == ReservationStatus::Seated {
            return Err(ValidationError::InvalidState { status: target }.into());
        }

        let mut plan = OperationPlan::new(format!(
            "Move reservation {} from {} to {}",
            self.id,
            current.status(),
            target
        ))
        .issued_at(clock.now())
        .add_action(PlanAction::SetStatus {
            id: self.id,
            from: current.status(),
            to: target,
        });

        if current.status() == ReservationStatus::Seated {
            plan = release_occupied_table(plan, db, self.id)?;
        }

        Ok(plan)
    }
}

/// Appends the release of whatever table `reservation` occupies.
pub(super) fn release_occupied_table(
    plan: OperationPlan,
    db: &Database,
    reservation: ReservationId,
) -> Result<OperationPlan> {
    Ok(
        match Database::find_table_by_occupant(db.connection(), reservation)? {
            Some(table) => plan.add_action(PlanAction::ReleaseTable {
                table: table.id(),
                reservation,
            }),
            None => plan.add_warning(format!(
                "reservation {reservation} is seated but no table holds it"
            )),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, fields};
    use crate::error::ErrorKind;
    use crate::operations::PlanExecutor;
    use crate::validation::ValidatedTable;
    use crate::SystemClock;
    use chrono::Utc;

    fn reservation(db: &Database, status: ReservationStatus) -> ReservationId {
        Database::insert_reservation(
            db.connection(),
            &fields("2030-01-04", "18:00", "555"),
            status,
            Utc::now(),
        )
        .unwrap()
    }

    fn execute(db: &mut Database, id: ReservationId, status: &str) -> Result<ReservationStatus> {
        let plan = StatusUpdatePlan::new(id, status).build_plan(db, &SystemClock)?;
        let result = PlanExecutor::new(db).execute(&plan)?;
        Ok(result.reservation.unwrap().status())
    }

    #[test]
    fn test_booked_to_cancelled() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Booked);
        assert_eq!(
            execute(&mut db, id, "cancelled").unwrap(),
            ReservationStatus::Cancelled
        );
    }

    #[test]
    fn test_finished_rejects_everything() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Finished);
        for status in ["booked", "seated", "finished", "cancelled", "bogus"] {
            let err = execute(&mut db, id, status).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TerminalStateViolation, "{status}");
        }
    }

    #[test]
    fn test_seating_requires_a_table() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Booked);
        let err = execute(&mut db, id, "seated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_unknown_status() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Booked);
        let err = execute(&mut db, id, "late").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownStatus);
    }

    #[test]
    fn test_booked_to_finished_is_violation() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Booked);
        let err = execute(&mut db, id, "finished").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationStatusViolation);
    }

    #[test]
    fn test_missing_reservation() {
        let mut db = create_test_database();
        let err = execute(&mut db, ReservationId::new(12), "cancelled").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationNotFound);
    }

    #[test]
    fn test_cancelling_seated_frees_table() {
        let mut db = create_test_database();
        let id = reservation(&db, ReservationStatus::Seated);
        let table = Database::insert_table(
            db.connection(),
            &ValidatedTable {
                name: "A1".into(),
                capacity: 4,
            },
            Utc::now(),
        )
        .unwrap();
        Database::claim_table(db.connection(), table, id, Utc::now()).unwrap();

        let plan = StatusUpdatePlan::new(id, "cancelled")
            .build_plan(&db, &SystemClock)
            .unwrap();
        assert_eq!(plan.len(), 2);

        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
        assert_eq!(
            result.reservation.unwrap().status(),
            ReservationStatus::Cancelled
        );
        assert_eq!(result.table.unwrap().occupant(), None);
    }
}
