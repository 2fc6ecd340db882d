//! Daily accumulation of meter readings and reservation summaries.

use crate::error::ReportError;
use crate::types::{EnergyReading, Money, PhaseReading, Reservation};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A record that belongs to one calendar day.
pub trait Dated {
    /// Calendar day of the record.
    fn date(&self) -> NaiveDate;
}

impl Dated for PhaseReading {
    #[inline]
    fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

impl Dated for EnergyReading {
    #[inline]
    fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Running totals that records are folded into.
pub trait Accumulator: Default + Clone {
    /// Record kind this accumulator sums.
    type Record: Dated;

    /// Adds one record.
    fn absorb(&mut self, record: &Self::Record);

    /// Adds another accumulator's totals.
    fn merge(&mut self, other: &Self);
}

/// Six per-phase sums in the file's unit (Wh).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTotals {
    /// Consumption v1..v3.
    pub consumption: [f64; 3],
    /// Production v1..v3.
    pub production: [f64; 3],
}

impl Accumulator for PhaseTotals {
    type Record = PhaseReading;

    fn absorb(&mut self, record: &PhaseReading) {
        for (sum, value) in self.consumption.iter_mut().zip(record.consumption) {
            *sum += value;
        }
        for (sum, value) in self.production.iter_mut().zip(record.production) {
            *sum += value;
        }
    }

    fn merge(&mut self, other: &Self) {
        for (sum, value) in self.consumption.iter_mut().zip(other.consumption) {
            *sum += value;
        }
        for (sum, value) in self.production.iter_mut().zip(other.production) {
            *sum += value;
        }
    }
}

/// Consumption and production sums plus what is needed for a temperature mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyTotals {
    /// Consumption sum.
    pub consumption: f64,
    /// Production sum.
    pub production: f64,
    /// Sum of all temperature readings.
    pub temperature_sum: f64,
    /// Number of readings folded in.
    pub reading_count: u32,
}

impl EnergyTotals {
    /// Mean temperature of the readings folded in.
    #[inline]
    pub fn average_temperature(&self) -> f64 {
        daily_average(self.temperature_sum, self.reading_count)
    }
}

impl Accumulator for EnergyTotals {
    type Record = EnergyReading;

    fn absorb(&mut self, record: &EnergyReading) {
        self.consumption += record.consumption;
        self.production += record.production;
        self.temperature_sum += record.temperature;
        self.reading_count += 1;
    }

    fn merge(&mut self, other: &Self) {
        self.consumption += other.consumption;
        self.production += other.production;
        self.temperature_sum += other.temperature_sum;
        self.reading_count += other.reading_count;
    }
}

/// `sum / count`, zero when nothing was counted.
#[inline]
pub fn daily_average(sum: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Mean of per-day means. Not the same as the flat mean of all readings:
/// a day with one reading weighs as much as a day with twenty-four.
pub fn two_level_average<I: IntoIterator<Item = f64>>(daily_averages: I) -> f64 {
    let (sum, days) = daily_averages
        .into_iter()
        .fold((0.0, 0u32), |(sum, days), avg| (sum + avg, days + 1));
    daily_average(sum, days)
}

/// Accumulators keyed by calendar day, iterated in date order.
#[derive(Debug, Clone, Default)]
pub struct DailyTotals<A> {
    days: BTreeMap<NaiveDate, A>,
}

impl<A: Accumulator> DailyTotals<A> {
    /// Folds records into per-day totals.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a A::Record>,
        A::Record: 'a,
    {
        let mut totals = Self {
            days: BTreeMap::new(),
        };
        for record in records {
            totals.absorb(record);
        }
        tracing::debug!(days = totals.days.len(), "aggregated daily totals");
        totals
    }

    /// Adds one record to its day, creating a zeroed accumulator first if needed.
    pub fn absorb(&mut self, record: &A::Record) {
        self.days.entry(record.date()).or_default().absorb(record);
    }

    /// Days and their totals in ascending date order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &A)> {
        self.days.iter()
    }

    /// Totals for one day.
    #[inline]
    pub fn get(&self, date: NaiveDate) -> Option<&A> {
        self.days.get(&date)
    }

    /// Number of distinct days.
    #[inline]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// `true` when no record was folded in.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days inside an inclusive range; reversed endpoints are swapped.
    pub fn between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (&NaiveDate, &A)> {
        let (start, end) = ordered(start, end);
        self.days.range(start..=end)
    }

    /// Sum of all days inside an inclusive range.
    pub fn sum_between(&self, start: NaiveDate, end: NaiveDate) -> A {
        self.between(start, end).fold(A::default(), |mut acc, (_, day)| {
            acc.merge(day);
            acc
        })
    }
}

/// Period a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Inclusive day range, `start <= end`.
    Range {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
    /// One calendar month.
    Month {
        /// Year.
        year: i32,
        /// Month number 1..=12.
        month: u32,
    },
    /// One calendar year.
    Year(i32),
}

/// Consumption, production and temperature over a period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummary {
    /// Covered period.
    pub period: Period,
    /// Consumption sum in the file's unit.
    pub consumption: f64,
    /// Production sum in the file's unit.
    pub production: f64,
    /// Average temperature, °C.
    pub average_temperature: f64,
}

impl DailyTotals<EnergyTotals> {
    /// Totals over an inclusive range with the flat mean temperature of its readings.
    pub fn range_summary(&self, start: NaiveDate, end: NaiveDate) -> PeriodSummary {
        let (start, end) = ordered(start, end);
        let totals = self.sum_between(start, end);
        PeriodSummary {
            period: Period::Range { start, end },
            consumption: totals.consumption,
            production: totals.production,
            average_temperature: totals.average_temperature(),
        }
    }

    /// Totals for a month with the mean of daily mean temperatures.
    pub fn month_summary(&self, year: i32, month: u32) -> PeriodSummary {
        self.summary_where(Period::Month { year, month }, |d| {
            d.year() == year && d.month() == month
        })
    }

    /// Totals for a year with the mean of daily mean temperatures.
    pub fn year_summary(&self, year: i32) -> PeriodSummary {
        self.summary_where(Period::Year(year), |d| d.year() == year)
    }

    fn summary_where<F>(&self, period: Period, keep: F) -> PeriodSummary
    where
        F: Fn(&NaiveDate) -> bool,
    {
        let mut consumption = 0.0;
        let mut production = 0.0;
        let mut daily_averages = Vec::new();
        for (_, day) in self.days.iter().filter(|&(d, _)| keep(d)) {
            consumption += day.consumption;
            production += day.production;
            daily_averages.push(day.average_temperature());
        }
        PeriodSummary {
            period,
            consumption,
            production,
            average_temperature: two_level_average(daily_averages),
        }
    }
}

fn ordered(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    if b < a { (b, a) } else { (a, b) }
}

/// Confirmed versus not confirmed reservations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmationSummary {
    /// Confirmed count.
    pub confirmed: usize,
    /// Not confirmed count.
    pub not_confirmed: usize,
}

impl ConfirmationSummary {
    /// Counts both groups; they always add up to `reservations.len()`.
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        let confirmed = reservations.iter().filter(|r| r.is_confirmed()).count();
        Self {
            confirmed,
            not_confirmed: reservations.len() - confirmed,
        }
    }

    /// All reservations counted.
    #[inline]
    pub const fn total(&self) -> usize {
        self.confirmed + self.not_confirmed
    }
}

/// Sum of total prices over confirmed reservations.
///
/// # Errors
///
/// [`ReportError::Overflow`] when a price or the running sum leaves `Decimal` range.
pub fn total_revenue(reservations: &[Reservation]) -> Result<Money, ReportError> {
    reservations
        .iter()
        .filter(|r| r.is_confirmed())
        .try_fold(Decimal::ZERO, |acc, r| {
            acc.checked_add(r.total_price()?)
                .ok_or(ReportError::Overflow("total revenue"))
        })
}
