//! Plan execution engine.
//!
//! The executor applies every action of a plan inside a single IMMEDIATE
//! transaction. Conditional actions that find the store in an unexpected
//! state abort with the matching error, and the transaction rolls back when
//! it is dropped, so a failed plan leaves no trace.

use rusqlite::{Connection, ErrorCode, TransactionBehavior};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::table::{Table, TableId};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry run (no changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in a dry run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation the plan wrote, as re-read before commit.
    pub reservation: Option<Reservation>,

    /// The table the plan wrote, as re-read before commit.
    pub table: Option<Table>,
}

impl ExecutionResult {
    fn success(plan: &OperationPlan, reservation: Option<Reservation>, table: Option<Table>) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation,
            table,
        }
    }

    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: None,
            table: None,
        }
    }
}

/// Executes operation plans against the database.
///
/// # Examples
///
/// ```no_run
/// use seatbook::operations::{CreateTablePlan, PlanExecutor};
/// use seatbook::{Database, DatabaseConfig, SystemClock, TablePayload};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
/// let payload = TablePayload {
///     table_name: Some("Patio".into()),
///     capacity: Some(6),
/// };
/// let plan = CreateTablePlan::new(Some(payload)).build_plan(&SystemClock).unwrap();
///
/// let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
/// assert_eq!(result.table.unwrap().name(), "Patio");
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

/// What a plan touched, so it can be re-read before commit.
#[derive(Debug, Default)]
struct Subjects {
    reservation: Option<ReservationId>,
    table: Option<TableId>,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Validates the plan without modifying the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns the error of the first action that could not be applied,
    /// after rolling back everything the plan had written. A database that
    /// stays locked past the busy timeout is reported as
    /// [`Error::Conflict`].
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(ExecutionResult::dry_run(plan));
        }

        log::debug!("executing plan: {}", plan.description);
        match self.apply(plan) {
            Ok(result) => {
                log::info!("{}", plan.description);
                Ok(result)
            }
            Err(err) => {
                let err = into_conflict(err);
                log::debug!("plan rolled back: {err}");
                Err(err)
            }
        }
    }

    fn apply(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let tx = self
            .db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut subjects = Subjects::default();
        for action in &plan.actions {
            log::debug!("  {}", action.description());
            apply_action(&tx, action, plan, &mut subjects)?;
        }

        let reservation = match subjects.reservation {
            Some(id) => Database::get_reservation(&tx, id)?,
            None => None,
        };
        let table = match subjects.table {
            Some(id) => Database::get_table(&tx, id)?,
            None => None,
        };

        tx.commit()?;
        Ok(ExecutionResult::success(plan, reservation, table))
    }
}

fn apply_action(
    conn: &Connection,
    action: &PlanAction,
    plan: &OperationPlan,
    subjects: &mut Subjects,
) -> Result<()> {
    let now = plan.issued_at;
    match action {
        PlanAction::CreateReservation(fields) => {
            let id = Database::insert_reservation(conn, fields, ReservationStatus::Booked, now)?;
            subjects.reservation = Some(id);
        }
        PlanAction::UpdateReservation { id, fields } => {
            if !Database::update_reservation_fields(conn, *id, fields, now)? {
                return Err(Error::ReservationNotFound { id: *id });
            }
            subjects.reservation = Some(*id);
        }
        PlanAction::SetStatus { id, from, to } => {
            if !Database::set_reservation_status_if(conn, *id, *from, *to, now)? {
                return Err(status_mismatch(conn, *id, *to)?);
            }
            subjects.reservation = Some(*id);
        }
        PlanAction::ClaimTable { table, reservation } => {
            if !Database::claim_table(conn, *table, *reservation, now)? {
                return Err(match Database::get_table(conn, *table)? {
                    None => Error::TableNotFound { id: *table },
                    Some(_) => Error::TableOccupied { id: *table },
                });
            }
            subjects.table = Some(*table);
        }
        PlanAction::ReleaseTable { table, reservation } => {
            if !Database::release_table(conn, *table, *reservation, now)? {
                return Err(match Database::get_table(conn, *table)? {
                    None => Error::TableNotFound { id: *table },
                    Some(_) => Error::TableNotOccupied { id: *table },
                });
            }
            subjects.table = Some(*table);
        }
        PlanAction::CreateTable(table) => {
            let id = Database::insert_table(conn, table, now)?;
            subjects.table = Some(id);
        }
    }
    Ok(())
}

/// Explains why a conditional status update matched no row.
fn status_mismatch(conn: &Connection, id: ReservationId, to: ReservationStatus) -> Result<Error> {
    Ok(match Database::get_reservation(conn, id)? {
        None => Error::ReservationNotFound { id },
        Some(current) => Error::ReservationStatusViolation {
            id,
            from: current.status(),
            to,
        },
    })
}

/// Reports lock contention as a retryable conflict.
fn into_conflict(err: Error) -> Error {
    match err {
        Error::Database(rusqlite::Error::SqliteFailure(failure, message))
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::Conflict {
                details: message.unwrap_or_else(|| failure.to_string()),
            }
        }
        other => other,
    }
}
