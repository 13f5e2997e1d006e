//! Reservation field validation.

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::{present, ReservationPayload, ValidatedFields, ValidationError};
use crate::reservation::ReservationStatus;

/// Checks that every required reservation field is present and well formed.
///
/// Fields are checked in a fixed order and the first failure is returned.
/// A submitted `seated` or `finished` status is refused with
/// [`ValidationError::InvalidState`]: those states are only reachable by
/// seating or finishing at a table.
///
/// This does not check the date against the calendar or the time against
/// business hours; see [`super::validate_business_day`] and
/// [`super::validate_business_hours`].
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
///
/// # Examples
///
/// ```
/// use seatbook::validation::{validate_reservation_fields, ValidationError};
/// use seatbook::ReservationPayload;
///
/// let payload = ReservationPayload {
///     first_name: Some("Ada".into()),
///     ..Default::default()
/// };
/// assert_eq!(
///     validate_reservation_fields(Some(&payload)),
///     Err(ValidationError::MissingField { field: "last_name" }),
/// );
/// ```
pub fn validate_reservation_fields(
    payload: Option<&ReservationPayload>,
) -> Result<ValidatedFields, ValidationError> {
    let payload = payload.ok_or(ValidationError::MissingData)?;

    let first_name = required_text(payload.first_name.as_ref(), "first_name")?;
    let last_name = required_text(payload.last_name.as_ref(), "last_name")?;
    let mobile_number = required_text(payload.mobile_number.as_ref(), "mobile_number")?;

    let people = payload
        .people
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(ValidationError::MissingField { field: "people" })?;

    let date = present(payload.reservation_date.as_ref())
        .and_then(parse_date)
        .ok_or(ValidationError::MissingField {
            field: "reservation_date",
        })?;

    let time = present(payload.reservation_time.as_ref())
        .and_then(parse_time)
        .ok_or(ValidationError::MissingField {
            field: "reservation_time",
        })?;

    let status = match present(payload.status.as_ref()) {
        Some(text) => Some(admissible_status(text)?),
        None => None,
    };

    Ok(ValidatedFields {
        first_name,
        last_name,
        mobile_number,
        people,
        date,
        time,
        status,
    })
}

fn required_text(value: Option<&String>, field: &'static str) -> Result<String, ValidationError> {
    present(value)
        .map(ToString::to_string)
        .ok_or(ValidationError::MissingField { field })
}

fn admissible_status(text: &str) -> Result<ReservationStatus, ValidationError> {
    let status: ReservationStatus = text.parse()?;
    match status {
        ReservationStatus::Seated | ReservationStatus::Finished => {
            Err(ValidationError::InvalidState { status })
        }
        ReservationStatus::Booked | ReservationStatus::Cancelled => Ok(status),
    }
}

/// Parses `DDDD-DD-DD` into a calendar date.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    if !matches_shape(text, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Formats a time as `HH:MM`, or `HH:MM:SS` when it has seconds.
///
/// Text order matches time order, so `21:30:45` sorts after `21:30`.
pub(crate) fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Parses `DD:DD` or `DD:DD:DD` into a time of day.
pub(crate) fn parse_time(text: &str) -> Option<NaiveTime> {
    if matches_shape(text, "dd:dd") {
        NaiveTime::parse_from_str(text, "%H:%M").ok()
    } else if matches_shape(text, "dd:dd:dd") {
        NaiveTime::parse_from_str(text, "%H:%M:%S").ok()
    } else {
        None
    }
}

// 'd' in the shape stands for any ASCII digit; every other byte must match.
fn matches_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}
