//! Reservation types.
//!
//! A [`Reservation`] is a booking for a party at a date and time. Its
//! [`ReservationStatus`] evolves through the state machine in
//! [`crate::status`]; records are never deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Opaque identifier of a reservation, assigned by the store.
///
/// # Examples
///
/// ```
/// use seatbook::ReservationId;
///
/// let id: ReservationId = "42".parse().unwrap();
/// assert_eq!(id, ReservationId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl ToSql for ReservationId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for ReservationId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

/// Lifecycle status of a reservation.
///
/// `finished` and `cancelled` are terminal.
///
/// # Examples
///
/// ```
/// use seatbook::ReservationStatus;
///
/// let status: ReservationStatus = "seated".parse().unwrap();
/// assert_eq!(status, ReservationStatus::Seated);
/// assert!(!status.is_terminal());
/// assert!("lunch".parse::<ReservationStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Created and waiting for the party to arrive.
    Booked,
    /// The party is sitting at a table.
    Seated,
    /// The party has left; the table was released.
    Finished,
    /// The booking was called off.
    Cancelled,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Booked, Self::Seated, Self::Finished, Self::Cancelled];

    /// Returns the stored name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Seated => "seated",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further change of any kind is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus {
                status: s.to_string(),
            })
    }
}

impl ToSql for ReservationStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ReservationStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub(crate) id: ReservationId,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) mobile_number: String,
    pub(crate) people: u32,
    pub(crate) date: NaiveDate,
    pub(crate) time: NaiveTime,
    pub(crate) status: ReservationStatus,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the guest's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the guest's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the mobile number exactly as it was entered.
    #[must_use]
    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    /// Returns the size of the party.
    #[must_use]
    pub const fn people(&self) -> u32 {
        self.people
    }

    /// Returns the reservation date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the reservation time.
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the reservation time as zero-padded `HH:MM`, or `HH:MM:SS`
    /// when it has seconds.
    #[must_use]
    pub fn time_label(&self) -> String {
        crate::validation::format_time(self.time)
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns when the reservation was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the reservation was last written.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns "first last" for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
