#![warn(missing_docs)]
//! Parsing reservation and energy meter files into typed records, daily
//! aggregation and Finnish-formatted text reports.

mod aggregate;
mod config;
mod error;
mod format;
mod menu;
mod parser;
mod raw;
mod report;
mod sink;
mod types;
mod utils;

pub use crate::aggregate::{
    Accumulator, ConfirmationSummary, DailyTotals, Dated, EnergyTotals, Period, PeriodSummary,
    PhaseTotals, daily_average, total_revenue, two_level_average,
};
pub use crate::config::{CONFIG_ENV, Settings};
pub use crate::error::ReportError;
pub use crate::format::{
    ENGLISH_MONTHS, FINNISH_WEEKDAYS, confirmation_label, format_date, format_decimal,
    format_money, format_time, month_name, weekday_name, yes_no,
};
pub use crate::menu::{Menu, parse_month};
pub use crate::parser::{parse_energy_reading, parse_phase_reading, parse_reservation};
pub use crate::raw::{RawRow, RawTable, SourceFormat};
pub use crate::report::{
    Report, ReservationReportBuilder, confirmed_lines, long_lines, multi_week_summary,
    period_report, reservation_details, revenue_line, status_lines, summary_lines, weekly_table,
};
pub use crate::sink::{ReportSink, write_report};
pub use crate::types::*;
pub use crate::utils::{
    parse_fi_date, parse_flag, parse_float, parse_int, parse_iso_date, parse_money, parse_time,
    parse_timestamp,
};
