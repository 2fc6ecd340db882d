//! Domain records produced by the parsers.

use crate::error::ReportError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Money value, `Decimal` keeps prices and totals exact.
pub type Money = Decimal;

/// Reservations at least this long count as long.
pub const LONG_RESERVATION_HOURS: u32 = 3;

/// Time-of-day format a reservation file declares for its time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum TimeFormat {
    /// `HH:MM`.
    #[serde(rename = "hh:mm")]
    #[value(name = "hh:mm")]
    HourMinute,
    /// `HH:MM:SS`.
    #[serde(rename = "hh:mm:ss")]
    #[value(name = "hh:mm:ss")]
    HourMinuteSecond,
}

impl TimeFormat {
    /// Pattern understood by `chrono`.
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::HourMinute => "%H:%M",
            Self::HourMinuteSecond => "%H:%M:%S",
        }
    }

    /// Pattern shown in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HourMinute => "HH:MM",
            Self::HourMinuteSecond => "HH:MM:SS",
        }
    }
}

/// Column order of a pipe-delimited reservation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationLayout {
    /// Register of many reservations:
    /// `id | name | email | phone | date | time | duration | price | confirmed | resource | createdAt`.
    Register(TimeFormat),
    /// One reservation per file:
    /// `id | name | date | time | duration | price | paid | resource | phone | email`.
    Single(TimeFormat),
}

impl ReservationLayout {
    /// Number of columns a row must have.
    pub const fn field_count(self) -> usize {
        match self {
            Self::Register(_) => 11,
            Self::Single(_) => 10,
        }
    }

    /// Declared time-of-day format.
    pub const fn time_format(self) -> TimeFormat {
        match self {
            Self::Register(format) | Self::Single(format) => format,
        }
    }
}

impl Default for ReservationLayout {
    fn default() -> Self {
        Self::Register(TimeFormat::HourMinuteSecond)
    }
}

/// One reservation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Reservation number.
    pub reservation_id: u32,
    /// Booker name.
    pub name: String,
    /// Booker email.
    pub email: String,
    /// Booker phone.
    pub phone: String,
    /// Reserved day.
    pub reservation_date: NaiveDate,
    /// Start time.
    pub reservation_time: NaiveTime,
    /// Length in whole hours.
    pub duration_hours: u32,
    /// Price per hour.
    pub price: Money,
    /// Confirmed (register) or paid (single reservation).
    pub confirmed: bool,
    /// Reserved room, area or venue.
    pub resource: String,
    /// Creation time, only present in the register layout.
    pub created_at: Option<NaiveDateTime>,
}

impl Reservation {
    /// `duration_hours × price`.
    ///
    /// # Errors
    ///
    /// [`ReportError::Overflow`] when the product does not fit into `Decimal`.
    #[inline]
    pub fn total_price(&self) -> Result<Money, ReportError> {
        Decimal::from(self.duration_hours)
            .checked_mul(self.price)
            .ok_or(ReportError::Overflow("total price"))
    }

    /// Whether the reservation lasts at least [`LONG_RESERVATION_HOURS`].
    #[inline]
    pub const fn is_long(&self) -> bool {
        self.duration_hours >= LONG_RESERVATION_HOURS
    }

    /// Confirmed or paid.
    #[inline]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// Unit of the energy values in a meter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    /// Watt-hours; reports divide by 1000.
    #[default]
    Wh,
    /// Kilowatt-hours; reports print values as is.
    Kwh,
}

impl EnergyUnit {
    /// Converts a value in this unit to kWh. Only called while formatting.
    #[inline]
    pub fn to_kwh(self, value: f64) -> f64 {
        match self {
            Self::Wh => wh_to_kwh(value),
            Self::Kwh => value,
        }
    }
}

/// Watt-hours to kilowatt-hours.
#[inline]
pub fn wh_to_kwh(wh: f64) -> f64 {
    wh / 1000.0
}

/// Hourly reading with three consumption and three production phases (Wh).
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReading {
    /// Reading time.
    pub timestamp: NaiveDateTime,
    /// Consumption phases v1..v3.
    pub consumption: [f64; 3],
    /// Production phases v1..v3.
    pub production: [f64; 3],
}

/// Hourly reading with totals and outdoor temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReading {
    /// Reading time.
    pub timestamp: NaiveDateTime,
    /// Consumption in the file's unit.
    pub consumption: f64,
    /// Production in the file's unit.
    pub production: f64,
    /// Temperature, °C.
    pub temperature: f64,
}
