//! Payload validation.
//!
//! Everything here is pure: the functions inspect a payload (and, for the
//! date rule, an instant supplied by a [`crate::Clock`]) and either return a
//! typed, validated value or exactly one [`ValidationError`]. No function in
//! this module touches the store.
//!
//! # Order of checks
//!
//! A reservation payload is checked in a fixed order so that a payload with
//! several problems always reports the same one:
//!
//! 1. payload present ([`ValidationError::MissingData`])
//! 2. `first_name`, `last_name`, `mobile_number`, `people`,
//!    `reservation_date`, `reservation_time` ([`ValidationError::MissingField`])
//! 3. submitted status ([`ValidationError::InvalidState`],
//!    [`ValidationError::UnknownStatus`])
//! 4. date not in the past, then not a Tuesday
//! 5. time inside business hours

mod fields;
mod phone;
mod schedule;
mod tables;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::reservation::ReservationStatus;

pub use fields::validate_reservation_fields;
pub(crate) use fields::format_time;
#[cfg(test)]
pub(crate) use fields::parse_time;
pub use phone::normalize_phone;
pub use schedule::{validate_business_day, validate_business_hours, CLOSING_TIME, OPENING_TIME};
pub use tables::validate_table_fields;

/// A payload rejected before any state change was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No payload was supplied.
    #[error("request body is missing")]
    MissingData,

    /// A required field is absent, empty, or malformed.
    #[error("{field} is missing or invalid")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The payload asks for a status that can only be reached by a transition.
    #[error("status cannot be set to {status} here")]
    InvalidState {
        /// The status that was submitted.
        status: ReservationStatus,
    },

    /// The status text is not one of the known statuses.
    #[error("unknown status '{status}'")]
    UnknownStatus {
        /// The text that was submitted.
        status: String,
    },

    /// The reservation date has already passed.
    #[error("reservation date {date} is in the past")]
    PastDate {
        /// The rejected date.
        date: NaiveDate,
    },

    /// The reservation date falls on the closing day.
    #[error("we are closed on Tuesdays ({date})")]
    ClosedDay {
        /// The rejected date.
        date: NaiveDate,
    },

    /// The reservation time is outside business hours.
    #[error("reservation time {time} is outside business hours (10:30 to 21:30)")]
    OutsideHours {
        /// The rejected time, as `HH:MM`.
        time: String,
    },
}

impl ValidationError {
    /// Returns the kind reported for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingData => ErrorKind::MissingData,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::UnknownStatus { .. } => ErrorKind::UnknownStatus,
            Self::PastDate { .. } => ErrorKind::PastDate,
            Self::ClosedDay { .. } => ErrorKind::ClosedDay,
            Self::OutsideHours { .. } => ErrorKind::OutsideHours,
        }
    }
}

/// The fields a client submits to create or edit a reservation.
///
/// Every field is optional so that absence is reported by the validator
/// rather than by the deserializer.
///
/// # Examples
///
/// ```
/// use seatbook::ReservationPayload;
///
/// let payload: ReservationPayload = serde_json::from_str(
///     r#"{"first_name": "Ada", "people": "many"}"#,
/// ).unwrap();
/// assert_eq!(payload.first_name.as_deref(), Some("Ada"));
/// assert_eq!(payload.people, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPayload {
    /// Guest first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Guest last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Guest mobile number, free-form.
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// Party size. Non-integer values deserialize as absent.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub people: Option<i64>,
    /// Date as `YYYY-MM-DD`.
    #[serde(default)]
    pub reservation_date: Option<String>,
    /// Time as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub reservation_time: Option<String>,
    /// Requested status, if any.
    #[serde(default)]
    pub status: Option<String>,
}

/// The fields a client submits to create a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePayload {
    /// Table name; must be longer than one character.
    #[serde(default)]
    pub table_name: Option<String>,
    /// Seats at the table. Non-integer values deserialize as absent.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub capacity: Option<i64>,
}

/// A reservation payload that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest mobile number as entered.
    pub mobile_number: String,
    /// Party size.
    pub people: u32,
    /// Reservation date.
    pub date: NaiveDate,
    /// Reservation time.
    pub time: NaiveTime,
    /// Status submitted with the payload (only `booked` or `cancelled`).
    pub status: Option<ReservationStatus>,
}

impl ValidatedFields {
    /// Returns the time as zero-padded `HH:MM`, with `:SS` appended when
    /// seconds were given.
    #[must_use]
    pub fn time_label(&self) -> String {
        format_time(self.time)
    }
}

/// A table payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTable {
    /// Table name.
    pub name: String,
    /// Seats at the table.
    pub capacity: u32,
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_i64))
}

/// Treats empty (or whitespace-only) text the same as an absent field.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}
