//! Reservation and table operations using the plan-execute pattern.
//!
//! Every write is split into two phases:
//! 1. **Planning**: validates the request against the current state and
//!    builds an [`OperationPlan`] of [`PlanAction`]s.
//! 2. **Execution**: [`PlanExecutor`] applies the whole plan in one
//!    transaction, or nothing at all.
//!
//! [`Engine`] runs both phases for each operation in one call.
//!
//! # Examples
//!
//! ```no_run
//! use seatbook::operations::{PlanExecutor, StatusUpdatePlan};
//! use seatbook::{Database, DatabaseConfig, ReservationId, SystemClock};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
//!
//! // Generate plan
//! let plan = StatusUpdatePlan::new(ReservationId::new(4), "cancelled")
//!     .build_plan(&db, &SystemClock)
//!     .unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! assert!(result.success);
//! ```

pub mod assignment;
pub mod book;
pub mod engine;
pub mod executor;
pub mod init;
pub mod plan;
pub mod status;
pub mod tables;

pub use assignment::{AssignmentCoordinator, FinishPlan, SeatPlan};
pub use book::{CreateReservationPlan, UpdateReservationPlan};
pub use engine::Engine;
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use status::StatusUpdatePlan;
pub use tables::CreateTablePlan;
