//! Business day and business hours rules.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

use super::ValidationError;

/// Earliest bookable time, inclusive.
pub const OPENING_TIME: &str = "10:30";

/// Latest bookable time, inclusive.
pub const CLOSING_TIME: &str = "21:30";

/// The weekday the restaurant is closed.
const CLOSED_WEEKDAY: Weekday = Weekday::Tue;

/// Checks that `date` is neither in the past nor a closing day.
///
/// The date counts as past when its midnight (UTC) is strictly before
/// `now`, which means today is already past once the clock has moved beyond
/// midnight. A past Tuesday reports [`ValidationError::PastDate`].
///
/// # Errors
///
/// Returns [`ValidationError::PastDate`] or [`ValidationError::ClosedDay`].
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use seatbook::validation::{validate_business_day, ValidationError};
///
/// let now = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2030, 1, 4).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2030, 1, 8).unwrap();
///
/// assert!(validate_business_day(friday, now).is_ok());
/// assert_eq!(
///     validate_business_day(tuesday, now),
///     Err(ValidationError::ClosedDay { date: tuesday }),
/// );
/// ```
pub fn validate_business_day(
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    if midnight < now {
        return Err(ValidationError::PastDate { date });
    }
    if date.weekday() == CLOSED_WEEKDAY {
        return Err(ValidationError::ClosedDay { date });
    }
    Ok(())
}

/// Checks that an `HH:MM` time falls inside business hours.
///
/// The comparison is made on the zero-padded text, so `"10:30"` and
/// `"21:30"` are accepted while `"09:59"` and `"21:31"` are not.
///
/// # Errors
///
/// Returns [`ValidationError::OutsideHours`].
pub fn validate_business_hours(time: &str) -> Result<(), ValidationError> {
    if time < OPENING_TIME || time > CLOSING_TIME {
        return Err(ValidationError::OutsideHours {
            time: time.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_past_tuesday_is_past_date() {
        let tuesday = NaiveDate::from_ymd_opt(2020, 1, 7).unwrap();
        assert_eq!(tuesday.weekday(), Weekday::Tue);
        assert_eq!(
            validate_business_day(tuesday, noon(2024, 5, 1)),
            Err(ValidationError::PastDate { date: tuesday })
        );
    }

    #[test]
    fn test_today_after_midnight_is_past() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 4).unwrap();
        assert!(matches!(
            validate_business_day(today, noon(2030, 1, 4)),
            Err(ValidationError::PastDate { .. })
        ));
    }

    #[test]
    fn test_today_at_midnight_is_not_past() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 4).unwrap();
        let midnight = Utc.with_ymd_and_hms(2030, 1, 4, 0, 0, 0).unwrap();
        assert!(validate_business_day(today, midnight).is_ok());
    }

    #[test]
    fn test_future_tuesday_is_closed() {
        let tuesday = NaiveDate::from_ymd_opt(2030, 1, 8).unwrap();
        assert!(matches!(
            validate_business_day(tuesday, noon(2030, 1, 1)),
            Err(ValidationError::ClosedDay { .. })
        ));
    }

    #[test]
    fn test_hours_boundaries() {
        assert!(validate_business_hours("10:30").is_ok());
        assert!(validate_business_hours("21:30").is_ok());
        assert!(validate_business_hours("15:00").is_ok());
        assert!(validate_business_hours("09:59").is_err());
        assert!(validate_business_hours("10:29").is_err());
        assert!(validate_business_hours("21:31").is_err());
        assert!(validate_business_hours("23:00").is_err());
    }

    #[test]
    fn test_hours_boundaries_with_seconds() {
        assert!(validate_business_hours("10:30:15").is_ok());
        assert!(validate_business_hours("21:29:59").is_ok());
        assert!(validate_business_hours("10:29:59").is_err());
        assert!(validate_business_hours("21:30:45").is_err());
    }
}
