//! Field parsers for numbers, dates, times and flags.

use crate::error::ReportError;
use crate::types::{Money, TimeFormat};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));
static FI_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").expect("valid fi date regex"));
static HM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid hh:mm regex"));
static HMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("valid hh:mm:ss regex"));

/// Naive ISO 8601 shapes tried in order after the offset-aware ones.
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Trims the field and turns a decimal comma into a dot.
fn normalize_number(input: &str) -> String {
    input.trim().replace(',', ".")
}

/// Parses a plain decimal integer.
pub fn parse_int<T: FromStr>(value: &str, column: &'static str) -> Result<T, ReportError> {
    value.trim().parse::<T>().map_err(|_| ReportError::Number {
        value: value.trim().to_string(),
        column,
    })
}

/// Parses a money amount such as `18.50`.
pub fn parse_money(value: &str, column: &'static str) -> Result<Money, ReportError> {
    Decimal::from_str(&normalize_number(value)).map_err(|_| ReportError::Number {
        value: value.trim().to_string(),
        column,
    })
}

/// Parses a measurement; accepts both `1.5` and `1,5`.
pub fn parse_float(value: &str, column: &'static str) -> Result<f64, ReportError> {
    normalize_number(value)
        .parse::<f64>()
        .map_err(|_| ReportError::Number {
            value: value.trim().to_string(),
            column,
        })
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ReportError> {
    let trimmed = value.trim();
    let err = || ReportError::Date {
        value: trimmed.to_string(),
    };
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(err());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| err())
}

/// Parses a `dd.mm.yyyy` date typed by the user.
pub fn parse_fi_date(value: &str) -> Result<NaiveDate, ReportError> {
    let trimmed = value.trim();
    let err = || ReportError::Date {
        value: trimmed.to_string(),
    };
    if !FI_DATE_RE.is_match(trimmed) {
        return Err(err());
    }
    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").map_err(|_| err())
}

/// Parses a 24-hour time in exactly the declared format.
pub fn parse_time(value: &str, format: TimeFormat) -> Result<NaiveTime, ReportError> {
    let trimmed = value.trim();
    let err = || ReportError::Time {
        value: trimmed.to_string(),
        expected: format.label(),
    };
    let shape = match format {
        TimeFormat::HourMinute => &*HM_RE,
        TimeFormat::HourMinuteSecond => &*HMS_RE,
    };
    if !shape.is_match(trimmed) {
        return Err(err());
    }
    NaiveTime::parse_from_str(trimmed, format.pattern()).map_err(|_| err())
}

/// Parses `YYYY-MM-DD HH:MM:SS` and the other ISO 8601 shapes meter files use.
///
/// An explicit UTC offset is accepted and the wall-clock time in that offset
/// is kept, so a reading stamped `2025-10-13T00:30:00+03:00` belongs to
/// 13.10.2025. A bare date means midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ReportError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt.naive_local());
        }
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    if ISO_DATE_RE.is_match(trimmed)
        && let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ReportError::Timestamp {
        value: trimmed.to_string(),
    })
}

/// Only the exact token `True` is true.
pub fn parse_flag(value: &str, column: &'static str) -> bool {
    let trimmed = value.trim();
    if trimmed != "True" && trimmed != "False" {
        tracing::warn!(column, value = trimmed, "unexpected boolean token, treating as false");
    }
    trimmed == "True"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn money_keeps_cents() {
        assert_eq!(parse_money(" 18.50 ", "price").unwrap(), Decimal::new(1850, 2));
    }

    #[test]
    fn float_accepts_decimal_comma() {
        assert!((parse_float("1,25", "kwh").unwrap() - 1.25).abs() < f64::EPSILON);
        assert!(parse_float("abc", "kwh").is_err());
    }

    #[test]
    fn int_rejects_text() {
        assert_eq!(parse_int::<u32>(" 201", "id").unwrap(), 201);
        assert!(matches!(
            parse_int::<u32>("2x", "id"),
            Err(ReportError::Number { column: "id", .. })
        ));
    }

    #[test]
    fn iso_date_is_strict() {
        assert_eq!(
            parse_iso_date("2025-11-12").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 12).unwrap()
        );
        assert!(parse_iso_date("2025-1-12").is_err());
        assert!(parse_iso_date("12.11.2025").is_err());
        assert!(parse_iso_date("2025-02-30").is_err());
    }

    #[test]
    fn fi_date_parses_day_first() {
        let date = parse_fi_date("31.10.2025").unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (31, 10, 2025));
        assert!(parse_fi_date("2025-10-31").is_err());
    }

    #[test]
    fn time_follows_declared_format() {
        let t = parse_time("09:00:00", TimeFormat::HourMinuteSecond).unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 0));
        assert!(parse_time("09:00:00", TimeFormat::HourMinute).is_err());
        assert!(parse_time("10:00", TimeFormat::HourMinuteSecond).is_err());
        assert!(parse_time("25:00", TimeFormat::HourMinute).is_err());
    }

    #[test]
    fn timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 12)
            .unwrap()
            .and_hms_opt(14, 33, 20)
            .unwrap();
        assert_eq!(parse_timestamp("2025-08-12 14:33:20").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-08-12T14:33:20").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-08-12T14:33:20+03:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-08-12T14:33:20Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025-08-12T14:33").unwrap(),
            expected.with_second(0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2025-08-12").unwrap().time(),
            NaiveTime::MIN
        );
        assert!(parse_timestamp("12.08.2025 14:33").is_err());
    }

    #[test]
    fn flag_is_exact_true_token() {
        assert!(parse_flag(" True\n", "confirmed"));
        assert!(!parse_flag("False", "confirmed"));
        assert!(!parse_flag("true", "confirmed"));
        assert!(!parse_flag("yes", "confirmed"));
    }
}
