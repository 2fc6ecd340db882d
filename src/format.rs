//! Finnish-style number, date and time rendering.

use crate::types::Money;
use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::RoundingStrategy;

/// Finnish weekday names, Monday first.
pub static FINNISH_WEEKDAYS: [&str; 7] = [
    "Maanantai",
    "Tiistai",
    "Keskiviikko",
    "Torstai",
    "Perjantai",
    "Lauantai",
    "Sunnuntai",
];

/// English month names, January first.
pub static ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Two decimals with a decimal comma: `39.9` → `39,90`.
pub fn format_decimal(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

/// Money rounded half away from zero to cents, decimal comma, no currency sign.
pub fn format_money(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}").replace('.', ",")
}

/// `dd.mm.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `HH.MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H.%M").to_string()
}

/// Finnish name of the date's weekday.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    FINNISH_WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// English name for month 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    ENGLISH_MONTHS.get(index).copied()
}

/// `Yes` / `No`.
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// `Confirmed` / `NOT Confirmed`.
pub const fn confirmation_label(flag: bool) -> &'static str {
    if flag { "Confirmed" } else { "NOT Confirmed" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn decimal_comma() {
        assert_eq!(format_decimal(39.9), "39,90");
        assert_eq!(format_decimal(1.5), "1,50");
        assert_eq!(format_decimal(0.0), "0,00");
        assert_eq!(format_decimal(-2.345_6), "-2,35");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(format_money(Decimal::new(3990, 2)), "39,90");
        assert_eq!(format_money(Decimal::new(37, 0)), "37,00");
        assert_eq!(format_money(Decimal::new(12_345, 3)), "12,35");
    }

    #[test]
    fn finnish_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        assert_eq!(format_date(date), "31.10.2025");
        assert_eq!(format_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()), "10.00");
        assert_eq!(format_time(NaiveTime::from_hms_opt(9, 5, 59).unwrap()), "09.05");
    }

    #[test]
    fn weekday_lookup() {
        // 13.10.2025 was a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
        assert_eq!(weekday_name(monday), "Maanantai");
        assert_eq!(weekday_name(monday + chrono::Days::new(6)), "Sunnuntai");
    }

    #[test]
    fn month_lookup() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn labels() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(confirmation_label(false), "NOT Confirmed");
    }
}
