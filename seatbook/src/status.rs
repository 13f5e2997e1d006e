//! The reservation status state machine.
//!
//! ```text
//! booked ──► seated ──► finished
//!   │          │
//!   └──────────┴──────► cancelled
//! ```
//!
//! `finished` and `cancelled` are terminal. Staying in the same status is
//! not a transition and is refused.

use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};

/// Whether the state machine allows moving from `from` to `to`.
///
/// # Examples
///
/// ```
/// use seatbook::status::is_allowed;
/// use seatbook::ReservationStatus::{Booked, Cancelled, Finished, Seated};
///
/// assert!(is_allowed(Booked, Seated));
/// assert!(is_allowed(Seated, Cancelled));
/// assert!(!is_allowed(Booked, Finished));
/// assert!(!is_allowed(Seated, Seated));
/// ```
#[must_use]
pub const fn is_allowed(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::{Booked, Cancelled, Finished, Seated};
    matches!(
        (from, to),
        (Booked, Seated) | (Booked, Cancelled) | (Seated, Finished) | (Seated, Cancelled)
    )
}

/// Returns every status reachable from `from` in one step.
#[must_use]
pub fn allowed_targets(from: ReservationStatus) -> Vec<ReservationStatus> {
    ReservationStatus::ALL
        .into_iter()
        .filter(|to| is_allowed(from, *to))
        .collect()
}

/// Decides whether reservation `id` may move from `current` to `requested`.
///
/// Checks run in a fixed order, so exactly one failure is reported:
///
/// 1. a terminal `current` status fails with
///    [`Error::TerminalStateViolation`], whatever was requested;
/// 2. text that names no status fails with an unknown-status validation
///    error;
/// 3. a move the state machine does not allow fails with
///    [`Error::ReservationStatusViolation`].
///
/// On success the parsed target is returned; persisting it is up to the
/// caller.
///
/// # Errors
///
/// See above.
///
/// # Examples
///
/// ```
/// use seatbook::status::guard_transition;
/// use seatbook::{ErrorKind, ReservationId, ReservationStatus};
///
/// let id = ReservationId::new(1);
/// let next = guard_transition(id, ReservationStatus::Booked, "cancelled").unwrap();
/// assert_eq!(next, ReservationStatus::Cancelled);
///
/// let err = guard_transition(id, ReservationStatus::Finished, "nonsense").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TerminalStateViolation);
/// ```
pub fn guard_transition(
    id: ReservationId,
    current: ReservationStatus,
    requested: &str,
) -> Result<ReservationStatus> {
    if current.is_terminal() {
        return Err(Error::TerminalStateViolation { status: current });
    }

    let target: ReservationStatus = requested.parse()?;

    if !is_allowed(current, target) {
        return Err(Error::ReservationStatusViolation {
            id,
            from: current,
            to: target,
        });
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ReservationStatus::{Booked, Cancelled, Finished, Seated};

    const ID: ReservationId = ReservationId::new(3);

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(allowed_targets(Booked), vec![Seated, Cancelled]);
        assert_eq!(allowed_targets(Seated), vec![Finished, Cancelled]);
        assert!(allowed_targets(Finished).is_empty());
        assert!(allowed_targets(Cancelled).is_empty());
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in ReservationStatus::ALL {
            assert!(!is_allowed(status, status));
        }
    }

    #[test]
    fn test_finished_rejects_every_target() {
        for target in ["booked", "seated", "finished", "cancelled", "bogus", ""] {
            let err = guard_transition(ID, Finished, target).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TerminalStateViolation, "target {target}");
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let err = guard_transition(ID, Cancelled, "booked").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TerminalStateViolation);
    }

    #[test]
    fn test_unknown_target() {
        let err = guard_transition(ID, Booked, "eating").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownStatus);
    }

    #[test]
    fn test_disallowed_transition() {
        let err = guard_transition(ID, Booked, "finished").unwrap_err();
        match err {
            Error::ReservationStatusViolation { id, from, to } => {
                assert_eq!(id, ID);
                assert_eq!(from, Booked);
                assert_eq!(to, Finished);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_seated_to_seated_rejected() {
        let err = guard_transition(ID, Seated, "seated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservationStatusViolation);
    }

    #[test]
    fn test_allowed_returns_target() {
        assert_eq!(guard_transition(ID, Seated, "finished").unwrap(), Finished);
        assert_eq!(guard_transition(ID, Booked, "seated").unwrap(), Seated);
    }
}
