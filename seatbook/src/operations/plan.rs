//! Plan types for engine operations.
//!
//! A plan is the output of the planning phase: every validation and
//! precondition has already passed, and what remains is a list of writes for
//! the [`super::PlanExecutor`] to apply in one transaction.

use chrono::{DateTime, Utc};

use crate::reservation::{ReservationId, ReservationStatus};
use crate::table::TableId;
use crate::validation::{ValidatedFields, ValidatedTable};

/// A single write to be applied during plan execution.
///
/// The status and occupancy actions are conditional: each re-checks the
/// state it expects inside the transaction, and a mismatch aborts the whole
/// plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a new reservation in `booked`.
    CreateReservation(ValidatedFields),

    /// Overwrite the descriptive fields of an existing reservation.
    UpdateReservation {
        /// The reservation to update.
        id: ReservationId,
        /// The new field values.
        fields: ValidatedFields,
    },

    /// Move a reservation from `from` to `to`, only if it is still in `from`.
    SetStatus {
        /// The reservation to move.
        id: ReservationId,
        /// The status it must currently have.
        from: ReservationStatus,
        /// The status to move it to.
        to: ReservationStatus,
    },

    /// Record a reservation as the occupant of a free table.
    ClaimTable {
        /// The table to occupy.
        table: TableId,
        /// The reservation being seated.
        reservation: ReservationId,
    },

    /// Clear a table's occupant, only if it is still the given reservation.
    ReleaseTable {
        /// The table to free.
        table: TableId,
        /// The reservation expected at the table.
        reservation: ReservationId,
    },

    /// Insert a new, free table.
    CreateTable(ValidatedTable),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(fields) => format!(
                "Create reservation for {} {} ({} people) on {} at {}",
                fields.first_name,
                fields.last_name,
                fields.people,
                fields.date,
                fields.time_label()
            ),
            Self::UpdateReservation { id, .. } => format!("Update details of reservation {id}"),
            Self::SetStatus { id, from, to } => {
                format!("Move reservation {id} from {from} to {to}")
            }
            Self::ClaimTable { table, reservation } => {
                format!("Seat reservation {reservation} at table {table}")
            }
            Self::ReleaseTable { table, reservation } => {
                format!("Release table {table} from reservation {reservation}")
            }
            Self::CreateTable(table) => {
                format!("Create table {} seating {}", table.name, table.capacity)
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,

    /// The instant the plan was made; written as the update timestamp.
    pub issued_at: DateTime<Utc>,
}

impl OperationPlan {
    /// Creates an empty plan issued now.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Seat reservation 1 at table 2");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
            issued_at: Utc::now(),
        }
    }

    /// Sets the instant the plan was made.
    #[must_use]
    pub fn issued_at(mut self, instant: DateTime<Utc>) -> Self {
        self.issued_at = instant;
        self
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plan_builder() {
        let instant = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let plan = OperationPlan::new("Finish table 1")
            .issued_at(instant)
            .add_action(PlanAction::SetStatus {
                id: ReservationId::new(4),
                from: ReservationStatus::Seated,
                to: ReservationStatus::Finished,
            })
            .add_action(PlanAction::ReleaseTable {
                table: TableId::new(1),
                reservation: ReservationId::new(4),
            })
            .add_warning("nothing to see");

        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
        assert_eq!(plan.issued_at, instant);
        assert_eq!(plan.warnings, vec!["nothing to see".to_string()]);
    }

    #[test]
    fn test_action_descriptions() {
        let action = PlanAction::SetStatus {
            id: ReservationId::new(4),
            from: ReservationStatus::Booked,
            to: ReservationStatus::Cancelled,
        };
        assert_eq!(
            action.description(),
            "Move reservation 4 from booked to cancelled"
        );

        let action = PlanAction::ClaimTable {
            table: TableId::new(2),
            reservation: ReservationId::new(9),
        };
        assert_eq!(action.description(), "Seat reservation 9 at table 2");

        let action = PlanAction::CreateTable(ValidatedTable {
            name: "Bar".into(),
            capacity: 2,
        });
        assert_eq!(action.description(), "Create table Bar seating 2");
    }
}
