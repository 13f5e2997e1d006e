//! Property-based tests for payload validation.

use super::*;
use chrono::{Datelike, Duration, TimeZone, Utc, Weekday};
use proptest::prelude::*;

fn payload(date: String, time: String, people: i64) -> ReservationPayload {
    ReservationPayload {
        first_name: Some("Alan".into()),
        last_name: Some("Turing".into()),
        mobile_number: Some("555 0100".into()),
        people: Some(people),
        reservation_date: Some(date),
        reservation_time: Some(time),
        status: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn normalized_phone_is_all_digits(raw in ".{0,40}") {
        let digits = normalize_phone(&raw);
        prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
        prop_assert!(digits.len() <= raw.len());
    }

    #[test]
    fn normalization_is_idempotent(raw in "[0-9()+ .-]{0,30}") {
        let once = normalize_phone(&raw);
        prop_assert_eq!(normalize_phone(&once), once.clone());
    }

    #[test]
    fn formatting_does_not_change_digits(area in 100u32..1000, exchange in 100u32..1000, line in 0u32..10000) {
        let plain = format!("{area}{exchange}{line:04}");
        let pretty = format!("({area}) {exchange}-{line:04}");
        prop_assert_eq!(normalize_phone(&pretty), plain);
    }

    #[test]
    fn valid_payload_always_validates(
        days in 0i64..3650,
        hour in 0u32..24,
        minute in 0u32..60,
        people in 1i64..500,
    ) {
        let date = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap().date_naive() + Duration::days(days);
        let p = payload(date.format("%Y-%m-%d").to_string(), format!("{hour:02}:{minute:02}"), people);
        let fields = validate_reservation_fields(Some(&p)).unwrap();
        prop_assert_eq!(fields.date, date);
        prop_assert_eq!(i64::from(fields.people), people);
    }

    #[test]
    fn non_positive_people_is_missing_field(people in i64::MIN..=0) {
        let p = payload("2030-01-04".into(), "18:00".into(), people);
        prop_assert_eq!(
            validate_reservation_fields(Some(&p)),
            Err(ValidationError::MissingField { field: "people" })
        );
    }

    #[test]
    fn hours_rule_matches_window(hour in 0u32..24, minute in 0u32..60) {
        let label = format!("{hour:02}:{minute:02}");
        let minutes = hour * 60 + minute;
        let inside = (10 * 60 + 30..=21 * 60 + 30).contains(&minutes);
        prop_assert_eq!(validate_business_hours(&label).is_ok(), inside);
    }

    #[test]
    fn business_day_rule(days_ahead in -400i64..400) {
        let now = Utc.with_ymd_and_hms(2030, 6, 15, 8, 0, 0).unwrap();
        let date = now.date_naive() + Duration::days(days_ahead);
        let result = validate_business_day(date, now);
        if days_ahead <= 0 {
            prop_assert_eq!(result, Err(ValidationError::PastDate { date }));
        } else if date.weekday() == Weekday::Tue {
            prop_assert_eq!(result, Err(ValidationError::ClosedDay { date }));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
