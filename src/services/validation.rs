//! Field rules applied before a reservation is created or updated
//!
//! Validation is a pure function of the submitted fields and the current
//! time. Every failing field is reported at once, one violation per field
//! (the first rule it breaks). Wording belongs to the views.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::reservation::{ReservationInput, ReservationStatus, Scalar, ValidReservation};

pub const CUSTOMER_NAME_MAX_CHARS: usize = 100;
pub const PARTY_SIZE_MIN: i64 = 1;
pub const PARTY_SIZE_MAX: i64 = 50;

lazy_static! {
    // ASCII digits only: optional leading '+', then 8 to 15 digits
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
}

/// Accepted zone-less date/time layouts, read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Editable reservation fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    CustomerName,
    Phone,
    PartySize,
    ReservedAt,
    Status,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::Phone => "phone",
            Field::PartySize => "party_size",
            Field::ReservedAt => "reserved_at",
            Field::Status => "status",
        }
    }
}

/// The rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    NotString,
    TooLong { max: usize },
    InvalidFormat,
    NotInteger,
    OutOfRange { min: i64, max: i64 },
    InvalidDate,
    InThePast,
    NotAllowed,
}

/// Violations collected over all fields, ordered by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<(Field, Violation)>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, violation: Violation) {
        self.violations.push((field, violation));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn get(&self, field: Field) -> Option<Violation> {
        self.violations
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Violation)> {
        self.violations.iter()
    }
}

/// Check every field of a submitted reservation against its rules.
///
/// `now` is the instant the request is processed; `reserved_at` must not
/// be earlier than it.
pub fn validate_reservation(
    input: &ReservationInput,
    now: DateTime<Utc>,
) -> Result<ValidReservation, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let mut check = |field: Field, result: Result<(), Violation>| {
        if let Err(violation) = result {
            errors.push(field, violation);
        }
    };

    let customer_name = check_customer_name(input.customer_name.as_ref());
    check(Field::CustomerName, customer_name.as_ref().map(|_| ()).map_err(|v| *v));
    let phone = check_phone(input.phone.as_ref());
    check(Field::Phone, phone.as_ref().map(|_| ()).map_err(|v| *v));
    let party_size = check_party_size(input.party_size.as_ref());
    check(Field::PartySize, party_size.map(|_| ()));
    let reserved_at = check_reserved_at(input.reserved_at.as_ref(), now);
    check(Field::ReservedAt, reserved_at.map(|_| ()));
    let status = check_status(input.status.as_ref());
    check(Field::Status, status.map(|_| ()));

    match (customer_name, phone, party_size, reserved_at, status) {
        (Ok(customer_name), Ok(phone), Ok(party_size), Ok(reserved_at), Ok(status)) => {
            Ok(ValidReservation {
                customer_name,
                phone,
                party_size,
                reserved_at,
                status,
            })
        }
        _ => Err(errors),
    }
}

/// Text of a present value; anything that is not a string breaks `otherwise`
fn text(value: Option<&Scalar>, otherwise: Violation) -> Result<&str, Violation> {
    value
        .ok_or(Violation::Required)?
        .as_text()
        .ok_or(otherwise)
}

fn check_customer_name(value: Option<&Scalar>) -> Result<String, Violation> {
    let value = text(value, Violation::NotString)?;
    if value.chars().count() > CUSTOMER_NAME_MAX_CHARS {
        return Err(Violation::TooLong {
            max: CUSTOMER_NAME_MAX_CHARS,
        });
    }
    Ok(value.to_string())
}

fn check_phone(value: Option<&Scalar>) -> Result<String, Violation> {
    let value = text(value, Violation::InvalidFormat)?;
    if !PHONE_REGEX.is_match(value) {
        return Err(Violation::InvalidFormat);
    }
    Ok(value.to_string())
}

fn check_party_size(value: Option<&Scalar>) -> Result<i32, Violation> {
    let size: i64 = match value.ok_or(Violation::Required)? {
        Scalar::Text(text) => text.parse().map_err(|_| Violation::NotInteger)?,
        Scalar::Number(number) => number.as_i64().ok_or(Violation::NotInteger)?,
        Scalar::Other(_) => return Err(Violation::NotInteger),
    };
    if !(PARTY_SIZE_MIN..=PARTY_SIZE_MAX).contains(&size) {
        return Err(Violation::OutOfRange {
            min: PARTY_SIZE_MIN,
            max: PARTY_SIZE_MAX,
        });
    }
    // Bounded by PARTY_SIZE_MAX above
    Ok(size as i32)
}

fn check_reserved_at(
    value: Option<&Scalar>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, Violation> {
    let value = text(value, Violation::InvalidDate)?;
    let reserved_at = parse_datetime(value).ok_or(Violation::InvalidDate)?;
    if reserved_at < now {
        return Err(Violation::InThePast);
    }
    Ok(reserved_at)
}

fn check_status(value: Option<&Scalar>) -> Result<ReservationStatus, Violation> {
    let value = text(value, Violation::NotAllowed)?;
    value.parse().map_err(|_| Violation::NotAllowed)
}

/// Parse a submitted date/time. Values without an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn valid_input() -> ReservationInput {
        ReservationInput {
            customer_name: Some("Tran A".into()),
            phone: Some("+84912345678".into()),
            party_size: Some("4".into()),
            reserved_at: Some("2026-10-20T19:30".into()),
            status: Some("pending".into()),
            method: None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let valid = validate_reservation(&valid_input(), now()).unwrap();
        assert_eq!(valid.customer_name, "Tran A");
        assert_eq!(valid.phone, "+84912345678");
        assert_eq!(valid.party_size, 4);
        assert_eq!(
            valid.reserved_at,
            Utc.with_ymd_and_hms(2026, 10, 20, 19, 30, 0).unwrap()
        );
        assert_eq!(valid.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let errors = validate_reservation(&ReservationInput::default(), now()).unwrap_err();
        assert_eq!(errors.len(), 5);
        for field in [
            Field::CustomerName,
            Field::Phone,
            Field::PartySize,
            Field::ReservedAt,
            Field::Status,
        ] {
            assert_eq!(errors.get(field), Some(Violation::Required));
        }
    }

    #[test]
    fn test_customer_name_length_counts_characters() {
        let mut input = valid_input();
        input.customer_name = Some("Đ".repeat(100).into());
        assert!(validate_reservation(&input, now()).is_ok());

        input.customer_name = Some("Đ".repeat(101).into());
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(
            errors.get(Field::CustomerName),
            Some(Violation::TooLong { max: 100 })
        );
    }

    #[test]
    fn test_phone_format() {
        for phone in ["12345678", "+123456789012345", "0912345678"] {
            let mut input = valid_input();
            input.phone = Some(phone.to_string().into());
            assert!(validate_reservation(&input, now()).is_ok(), "{phone} should pass");
        }

        for phone in [
            "12345",
            "abc12345678",
            "1234567890123456",
            "++12345678",
            "0912 345 678",
            "٠١٢٣٤٥٦٧٨٩",
        ] {
            let mut input = valid_input();
            input.phone = Some(phone.to_string().into());
            let errors = validate_reservation(&input, now()).unwrap_err();
            assert_eq!(errors.get(Field::Phone), Some(Violation::InvalidFormat), "{phone}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_party_size_bounds_inclusive() {
        for (size, ok) in [("0", false), ("1", true), ("50", true), ("51", false), ("-3", false)] {
            let mut input = valid_input();
            input.party_size = Some(size.to_string().into());
            let result = validate_reservation(&input, now());
            assert_eq!(result.is_ok(), ok, "party_size {size}");
            if !ok {
                assert_eq!(
                    result.unwrap_err().get(Field::PartySize),
                    Some(Violation::OutOfRange { min: 1, max: 50 })
                );
            }
        }
    }

    #[test]
    fn test_party_size_must_be_integer() {
        for size in ["4.5", "four", "1e2"] {
            let mut input = valid_input();
            input.party_size = Some(size.to_string().into());
            let errors = validate_reservation(&input, now()).unwrap_err();
            assert_eq!(errors.get(Field::PartySize), Some(Violation::NotInteger));
        }
    }

    #[test]
    fn test_json_types_checked_per_field() {
        let mut input = valid_input();
        input.customer_name = Some(Scalar::Number(12345i64.into()));
        input.phone = Some(Scalar::Number(912345678i64.into()));
        input.party_size = Some(Scalar::Number(4i64.into()));
        input.status = Some(Scalar::Other(serde_json::json!(["pending"])));
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(errors.get(Field::CustomerName), Some(Violation::NotString));
        assert_eq!(errors.get(Field::Phone), Some(Violation::InvalidFormat));
        assert_eq!(errors.get(Field::PartySize), None);
        assert_eq!(errors.get(Field::Status), Some(Violation::NotAllowed));
        assert_eq!(errors.len(), 3);

        let mut input = valid_input();
        input.party_size = Some(Scalar::Other(serde_json::json!(true)));
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(errors.get(Field::PartySize), Some(Violation::NotInteger));
    }

    #[test]
    fn test_reserved_at_not_in_past() {
        let mut input = valid_input();
        input.reserved_at = Some("2026-10-19T11:59".into());
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(errors.get(Field::ReservedAt), Some(Violation::InThePast));

        // Equal to now is accepted
        input.reserved_at = Some("2026-10-19T12:00".into());
        assert!(validate_reservation(&input, now()).is_ok());
    }

    #[test]
    fn test_reserved_at_must_parse() {
        let mut input = valid_input();
        input.reserved_at = Some("tomorrow evening".into());
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(errors.get(Field::ReservedAt), Some(Violation::InvalidDate));
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 20, 19, 30, 0).unwrap();
        assert_eq!(parse_datetime("2026-10-20T19:30"), Some(expected));
        assert_eq!(parse_datetime("2026-10-20T19:30:00"), Some(expected));
        assert_eq!(parse_datetime("2026-10-20 19:30:00"), Some(expected));
        assert_eq!(parse_datetime("2026-10-20T19:30:00Z"), Some(expected));
        assert_eq!(parse_datetime("2026-10-21T02:30:00+07:00"), Some(expected));
        assert_eq!(
            parse_datetime("2026-10-20"),
            Some(expected - Duration::minutes(19 * 60 + 30))
        );
        assert_eq!(parse_datetime("20/10/2026"), None);
    }

    #[test]
    fn test_status_must_be_known() {
        let mut input = valid_input();
        input.status = Some("waiting".into());
        let errors = validate_reservation(&input, now()).unwrap_err();
        assert_eq!(errors.get(Field::Status), Some(Violation::NotAllowed));

        for status in ReservationStatus::ALL {
            input.status = Some(status.to_string().into());
            assert_eq!(validate_reservation(&input, now()).unwrap().status, status);
        }
    }
}
