//! Table creation planning.

use crate::clock::Clock;
use crate::error::Result;
use crate::validation::{validate_table_fields, TablePayload};

use super::plan::{OperationPlan, PlanAction};

/// Plans the creation of a table. New tables are free.
pub struct CreateTablePlan {
    payload: Option<TablePayload>,
}

impl CreateTablePlan {
    /// Creates a planner for `payload`.
    #[must_use]
    pub const fn new(payload: Option<TablePayload>) -> Self {
        Self { payload }
    }

    /// Validates the payload and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing payload, a name of one
    /// character or less, or a capacity that is not a positive integer.
    pub fn build_plan(&self, clock: &dyn Clock) -> Result<OperationPlan> {
        let table = validate_table_fields(self.payload.as_ref())?;
        Ok(OperationPlan::new(format!("Add table {}", table.name))
            .issued_at(clock.now())
            .add_action(PlanAction::CreateTable(table)))
    }
}
