//! Reservation create and edit planning.

use crate::clock::Clock;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};
use crate::status::guard_transition;
use crate::validation::{
    validate_business_day, validate_business_hours, validate_reservation_fields,
    ReservationPayload, ValidatedFields,
};

use super::plan::{OperationPlan, PlanAction};

/// Runs the whole validation gate on a reservation payload.
///
/// Fields (including the submitted status) come first, then the business
/// day, then business hours.
fn validate_admissible(
    payload: Option<&ReservationPayload>,
    clock: &dyn Clock,
) -> Result<ValidatedFields> {
    let fields = validate_reservation_fields(payload)?;
    validate_business_day(fields.date, clock.now())?;
    validate_business_hours(&fields.time_label())?;
    Ok(fields)
}

/// Plans the creation of a reservation.
///
/// New reservations always start in `booked`.
pub struct CreateReservationPlan {
    payload: Option<ReservationPayload>,
}

impl CreateReservationPlan {
    /// Creates a planner for `payload`.
    #[must_use]
    pub const fn new(payload: Option<ReservationPayload>) -> Self {
        Self { payload }
    }

    /// Validates the payload and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use seatbook::operations::CreateReservationPlan;
    /// use seatbook::{ErrorKind, FixedClock, ReservationPayload};
    ///
    /// let clock = FixedClock::new(Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap());
    /// let payload = ReservationPayload {
    ///     first_name: Some("Ada".into()),
    ///     last_name: Some("Lovelace".into()),
    ///     mobile_number: Some("555-0100".into()),
    ///     people: Some(2),
    ///     reservation_date: Some("2030-01-04".into()),
    ///     reservation_time: Some("09:00".into()),
    ///     status: None,
    /// };
    ///
    /// let err = CreateReservationPlan::new(Some(payload)).build_plan(&clock).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::OutsideHours);
    /// ```
    pub fn build_plan(&self, clock: &dyn Clock) -> Result<OperationPlan> {
        let fields = validate_admissible(self.payload.as_ref(), clock)?;

        let mut plan = OperationPlan::new(format!(
            "Book {} {} for {} on {} at {}",
            fields.first_name,
            fields.last_name,
            fields.people,
            fields.date,
            fields.time_label()
        ))
        .issued_at(clock.now());

        if fields.status == Some(ReservationStatus::Cancelled) {
            plan = plan.add_warning("new reservations start as booked; status 'cancelled' ignored");
        }

        Ok(plan.add_action(PlanAction::CreateReservation(fields)))
    }
}

/// Plans a full edit of a reservation.
///
/// Every field is validated again as if the reservation were new. A status
/// in the payload that differs from the current one is applied through the
/// state machine; editing a `finished` or `cancelled` reservation is refused.
pub struct UpdateReservationPlan {
    id: ReservationId,
    payload: Option<ReservationPayload>,
}

impl UpdateReservationPlan {
    /// Creates a planner that edits reservation `id` with `payload`.
    #[must_use]
    pub const fn new(id: ReservationId, payload: Option<ReservationPayload>) -> Self {
        Self { id, payload }
    }

    /// Validates the edit against the stored reservation and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`], then the first validation
    /// failure, then any state machine violation.
    pub fn build_plan(&self, db: &Database, clock: &dyn Clock) -> Result<OperationPlan> {
        let current = Database::get_reservation(db.connection(), self.id)?
            .ok_or(Error::ReservationNotFound { id: self.id })?;

        let fields = validate_admissible(self.payload.as_ref(), clock)?;

        let target = match fields.status {
            Some(requested) if requested != current.status() => {
                Some(guard_transition(self.id, current.status(), requested.as_str())?)
            }
            _ if current.status().is_terminal() => {
                return Err(Error::TerminalStateViolation {
                    status: current.status(),
                });
            }
            _ => None,
        };

        let mut plan = OperationPlan::new(format!("Update reservation {}", self.id))
            .issued_at(clock.now())
            .add_action(PlanAction::UpdateReservation {
                id: self.id,
                fields,
            });

        if let Some(to) = target {
            plan = plan.add_action(PlanAction::SetStatus {
                id: self.id,
                from: current.status(),
                to,
            });
            if current.status() == ReservationStatus::Seated {
                plan = super::status::release_occupied_table(plan, db, self.id)?;
            }
        }

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, MockClock};
    use crate::database::test_util::create_test_database;
    use crate::error::ErrorKind;
    use crate::operations::PlanExecutor;
    use crate::validation::ValidatedTable;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        // a Wednesday
        FixedClock::new(Utc.with_ymd_and_hms(2030, 1, 2, 12, 0, 0).unwrap())
    }

    fn payload() -> ReservationPayload {
        ReservationPayload {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            mobile_number: Some("555-0100".into()),
            people: Some(3),
            reservation_date: Some("2030-01-04".into()),
            reservation_time: Some("18:00".into()),
            status: None,
        }
    }

    fn book(db: &mut Database) -> ReservationId {
        let plan = CreateReservationPlan::new(Some(payload()))
            .build_plan(&clock())
            .unwrap();
        PlanExecutor::new(db)
            .execute(&plan)
            .unwrap()
            .reservation
            .unwrap()
            .id()
    }

    #[test]
    fn test_create_plan_has_one_action() {
        let plan = CreateReservationPlan::new(Some(payload()))
            .build_plan(&clock())
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan.warnings.is_empty());
        assert!(matches!(plan.actions[0], PlanAction::CreateReservation(_)));
    }

    #[test]
    fn test_create_plan_is_issued_at_clock_time() {
        let mut mock = MockClock::new();
        mock.expect_now()
            .returning(|| Utc.with_ymd_and_hms(2030, 1, 2, 12, 0, 0).unwrap());
        let plan = CreateReservationPlan::new(Some(payload()))
            .build_plan(&mock)
            .unwrap();
        assert_eq!(
            plan.issued_at,
            Utc.with_ymd_and_hms(2030, 1, 2, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_create_rejects_past_tuesday() {
        let mut p = payload();
        p.reservation_date = Some("2029-01-02".into());
        let err = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PastDate);
    }

    #[test]
    fn test_create_rejects_future_tuesday() {
        let mut p = payload();
        p.reservation_date = Some("2030-01-08".into());
        let err = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClosedDay);
    }

    #[test]
    fn test_create_rejects_seated_status() {
        let mut p = payload();
        p.status = Some("seated".into());
        let err = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_create_rejects_seconds_past_closing() {
        let mut p = payload();
        p.reservation_time = Some("21:30:45".into());
        let err = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideHours);

        let mut p = payload();
        p.reservation_time = Some("21:30:00".into());
        assert!(CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .is_ok());
    }

    #[test]
    fn test_seconds_are_stored() {
        let mut db = create_test_database();
        let mut p = payload();
        p.reservation_time = Some("10:30:15".into());
        let plan = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap();
        let stored = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .reservation
            .unwrap();
        assert_eq!(stored.time_label(), "10:30:15");
    }

    #[test]
    fn test_create_ignores_cancelled_with_warning() {
        let mut p = payload();
        p.status = Some("cancelled".into());
        let plan = CreateReservationPlan::new(Some(p))
            .build_plan(&clock())
            .unwrap();
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn test_update_missing_reservation() {
        let db = create_test_database();
        let err = UpdateReservationPlan::new(ReservationId::new(5), Some(payload()))
            .build_plan(&db, &clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationNotFound);
    }

    #[test]
    fn test_update_not_found_beats_validation() {
        let db = create_test_database();
        let err = UpdateReservationPlan::new(ReservationId::new(5), None)
            .build_plan(&db, &clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationNotFound);
    }

    #[test]
    fn test_update_fields_only() {
        let mut db = create_test_database();
        let id = book(&mut db);

        let mut p = payload();
        p.people = Some(5);
        p.reservation_time = Some("19:30".into());
        let plan = UpdateReservationPlan::new(id, Some(p))
            .build_plan(&db, &clock())
            .unwrap();
        assert_eq!(plan.len(), 1);

        let updated = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .reservation
            .unwrap();
        assert_eq!(updated.people(), 5);
        assert_eq!(updated.time_label(), "19:30");
        assert_eq!(updated.status(), ReservationStatus::Booked);
    }

    #[test]
    fn test_update_can_cancel() {
        let mut db = create_test_database();
        let id = book(&mut db);

        let mut p = payload();
        p.status = Some("cancelled".into());
        let plan = UpdateReservationPlan::new(id, Some(p))
            .build_plan(&db, &clock())
            .unwrap();
        let updated = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .reservation
            .unwrap();
        assert_eq!(updated.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn test_update_cancelling_seated_frees_table() {
        let mut db = create_test_database();
        let id = book(&mut db);
        let conn = db.connection();
        let table = Database::insert_table(
            conn,
            &ValidatedTable {
                name: "A1".into(),
                capacity: 4,
            },
            Utc::now(),
        )
        .unwrap();
        Database::set_reservation_status_if(
            conn,
            id,
            ReservationStatus::Booked,
            ReservationStatus::Seated,
            Utc::now(),
        )
        .unwrap();
        assert!(Database::claim_table(conn, table, id, Utc::now()).unwrap());

        let mut p = payload();
        p.status = Some("cancelled".into());
        let plan = UpdateReservationPlan::new(id, Some(p))
            .build_plan(&db, &clock())
            .unwrap();
        PlanExecutor::new(&mut db).execute(&plan).unwrap();

        let stored = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), ReservationStatus::Cancelled);
        let freed = Database::get_table(db.connection(), table).unwrap().unwrap();
        assert_eq!(freed.occupant(), None);
    }

    #[test]
    fn test_update_of_cancelled_is_terminal() {
        let mut db = create_test_database();
        let id = book(&mut db);
        db.connection()
            .execute(
                "UPDATE reservations SET status = 'cancelled' WHERE reservation_id = ?",
                [id],
            )
            .unwrap();

        for status in [None, Some("cancelled"), Some("booked")] {
            let mut p = payload();
            p.status = status.map(Into::into);
            let err = UpdateReservationPlan::new(id, Some(p))
                .build_plan(&db, &clock())
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TerminalStateViolation, "{status:?}");
        }
    }

    #[test]
    fn test_update_revalidates_hours() {
        let mut db = create_test_database();
        let id = book(&mut db);

        let mut p = payload();
        p.reservation_time = Some("22:00".into());
        let err = UpdateReservationPlan::new(id, Some(p))
            .build_plan(&db, &clock())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideHours);
    }
}
