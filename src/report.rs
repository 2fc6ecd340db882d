//! Rendering aggregates and records into text reports.

use crate::aggregate::{
    ConfirmationSummary, DailyTotals, Period, PeriodSummary, PhaseTotals, total_revenue,
};
use crate::error::ReportError;
use crate::format::{
    confirmation_label, format_date, format_decimal, format_money, format_time, month_name,
    weekday_name, yes_no,
};
use crate::types::{EnergyUnit, Reservation};
use std::fmt;

const PERIOD_RULE_WIDTH: usize = 53;
const TABLE_RULE_WIDTH: usize = 75;

/// Ordered lines of rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Empty report.
    #[inline]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends a line (without trailing newline).
    #[inline]
    pub fn push<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    /// Appends all lines of another report.
    #[inline]
    pub fn append(&mut self, other: Self) {
        self.lines.extend(other.lines);
    }

    /// Rendered lines.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `true` when nothing was rendered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromIterator<String> for Report {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Which register sections to render (internal).
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct SectionOptions {
    pub confirmed: bool,
    pub long: bool,
    pub statuses: bool,
    pub summary: bool,
    pub revenue: bool,
}

impl SectionOptions {
    /// Every section.
    pub const fn everything() -> Self {
        Self {
            confirmed: true,
            long: true,
            statuses: true,
            summary: true,
            revenue: true,
        }
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self::everything()
    }
}

/// Builder for the reservation register report with selectable sections.
pub struct ReservationReportBuilder<'a> {
    reservations: &'a [Reservation],
    options: SectionOptions,
}

impl<'a> ReservationReportBuilder<'a> {
    /// Builder with every section enabled.
    ///
    /// # Example
    ///
    /// ```
    /// # use raportti::ReservationReportBuilder;
    /// let report = ReservationReportBuilder::new(&[])
    ///     .statuses(false)
    ///     .render()?;
    /// assert_eq!(report.lines()[0], "1) Confirmed Reservations");
    /// # Ok::<(), raportti::ReportError>(())
    /// ```
    #[inline]
    pub const fn new(reservations: &'a [Reservation]) -> Self {
        Self {
            reservations,
            options: SectionOptions::everything(),
        }
    }

    /// Toggles `1) Confirmed Reservations`.
    #[inline]
    pub const fn confirmed(mut self, enabled: bool) -> Self {
        self.options.confirmed = enabled;
        self
    }

    /// Toggles `2) Long Reservations (≥ 3 h)`.
    #[inline]
    pub const fn long(mut self, enabled: bool) -> Self {
        self.options.long = enabled;
        self
    }

    /// Toggles `3) Reservation Confirmation Status`.
    #[inline]
    pub const fn statuses(mut self, enabled: bool) -> Self {
        self.options.statuses = enabled;
        self
    }

    /// Toggles `4) Confirmation Summary`.
    #[inline]
    pub const fn summary(mut self, enabled: bool) -> Self {
        self.options.summary = enabled;
        self
    }

    /// Toggles `5) Total Revenue from Confirmed Reservations`.
    #[inline]
    pub const fn revenue(mut self, enabled: bool) -> Self {
        self.options.revenue = enabled;
        self
    }

    /// Renders the enabled sections, each followed by an empty line.
    ///
    /// # Errors
    ///
    /// [`ReportError::Overflow`] when the revenue section cannot be summed.
    pub fn render(self) -> Result<Report, ReportError> {
        let mut report = Report::new();
        let opts = self.options;
        if opts.confirmed {
            report.push("1) Confirmed Reservations");
            report.append(confirmed_lines(self.reservations));
            report.push("");
        }
        if opts.long {
            report.push("2) Long Reservations (≥ 3 h)");
            report.append(long_lines(self.reservations));
            report.push("");
        }
        if opts.statuses {
            report.push("3) Reservation Confirmation Status");
            report.append(status_lines(self.reservations));
            report.push("");
        }
        if opts.summary {
            report.push("4) Confirmation Summary");
            report.append(summary_lines(self.reservations));
            report.push("");
        }
        if opts.revenue {
            report.push("5) Total Revenue from Confirmed Reservations");
            report.push(revenue_line(self.reservations)?);
            report.push("");
        }
        Ok(report)
    }
}

/// `- name, resource, dd.mm.yyyy at HH.MM` per confirmed reservation.
pub fn confirmed_lines(reservations: &[Reservation]) -> Report {
    reservations
        .iter()
        .filter(|r| r.is_confirmed())
        .map(|r| {
            format!(
                "- {}, {}, {} at {}",
                r.name,
                r.resource,
                format_date(r.reservation_date),
                format_time(r.reservation_time)
            )
        })
        .collect()
}

/// One line per reservation of at least three hours.
pub fn long_lines(reservations: &[Reservation]) -> Report {
    reservations
        .iter()
        .filter(|r| r.is_long())
        .map(|r| {
            format!(
                "- {}, {} at {}, duration {} h, {}",
                r.name,
                format_date(r.reservation_date),
                format_time(r.reservation_time),
                r.duration_hours,
                r.resource
            )
        })
        .collect()
}

/// `name → Confirmed` or `name → NOT Confirmed` for every reservation.
pub fn status_lines(reservations: &[Reservation]) -> Report {
    reservations
        .iter()
        .map(|r| format!("{} → {}", r.name, confirmation_label(r.is_confirmed())))
        .collect()
}

/// Confirmed and not confirmed counts.
pub fn summary_lines(reservations: &[Reservation]) -> Report {
    let summary = ConfirmationSummary::from_reservations(reservations);
    [
        format!("- Confirmed reservations: {} pcs", summary.confirmed),
        format!("- Not confirmed reservations: {} pcs", summary.not_confirmed),
    ]
    .into_iter()
    .collect()
}

/// Revenue of confirmed reservations with a euro suffix.
///
/// # Errors
///
/// Propagates [`ReportError::Overflow`] from [`total_revenue`].
pub fn revenue_line(reservations: &[Reservation]) -> Result<String, ReportError> {
    Ok(format!(
        "Total revenue from confirmed reservations: {} €",
        format_money(total_revenue(reservations)?)
    ))
}

/// Every field of a single reservation, one per line.
///
/// # Errors
///
/// [`ReportError::Overflow`] when the total price does not fit.
pub fn reservation_details(r: &Reservation) -> Result<Report, ReportError> {
    let total = r.total_price()?;
    Ok([
        format!("Reservation number: {}", r.reservation_id),
        format!("Booker: {}", r.name),
        format!("Date: {}", format_date(r.reservation_date)),
        format!("Start time: {}", format_time(r.reservation_time)),
        format!("Number of hours: {}", r.duration_hours),
        format!("Hourly price: {} €", format_money(r.price)),
        format!("Total price: {} €", format_money(total)),
        format!("Paid: {}", yes_no(r.is_confirmed())),
        format!("Location: {}", r.resource),
        format!("Phone: {}", r.phone),
        format!("Email: {}", r.email),
    ]
    .into_iter()
    .collect())
}

/// Per-day phase table for one week, values in kWh.
pub fn weekly_table(week: u32, daily: &DailyTotals<PhaseTotals>, unit: EnergyUnit) -> Report {
    let mut report = Report::new();
    report.push(format!(
        "Week {week} electricity consumption and production (kWh, by phase)"
    ));
    report.push("Day          Date        Consumption [kWh]               Production [kWh]");
    report.push("            (dd.mm.yyyy)  v1      v2      v3             v1     v2     v3");
    report.push("-".repeat(TABLE_RULE_WIDTH));

    for (date, totals) in daily.iter() {
        let [c1, c2, c3] = totals.consumption.map(|v| format_decimal(unit.to_kwh(v)));
        let [p1, p2, p3] = totals.production.map(|v| format_decimal(unit.to_kwh(v)));
        report.push(format!(
            "{:<12} {:<12} {c1:>7} {c2:>7} {c3:>7}   {p1:>7} {p2:>7} {p3:>7}",
            weekday_name(*date),
            format_date(*date),
        ));
    }
    report
}

/// Several weekly tables separated by an empty line.
pub fn multi_week_summary<'a, I>(weeks: I, unit: EnergyUnit) -> Report
where
    I: IntoIterator<Item = (u32, &'a DailyTotals<PhaseTotals>)>,
{
    let mut report = Report::new();
    for (week, daily) in weeks {
        if !report.is_empty() {
            report.push("");
        }
        report.append(weekly_table(week, daily, unit));
    }
    report
}

/// Range, month or year summary block.
pub fn period_report(summary: &PeriodSummary, unit: EnergyUnit) -> Report {
    let mut report = Report::new();
    match summary.period {
        Period::Range { start, end } => {
            report.push("-".repeat(PERIOD_RULE_WIDTH));
            report.push(format!(
                "Report for the period {}-{}",
                format_date(start),
                format_date(end)
            ));
        }
        Period::Month { month, .. } => {
            report.push("-".repeat(PERIOD_RULE_WIDTH));
            let name = month_name(month).map_or_else(|| month.to_string(), str::to_string);
            report.push(format!("Report for the month: {name}"));
        }
        Period::Year(year) => {
            report.push(format!("Report for the year: {year}"));
        }
    }
    report.push(format!(
        "- Total consumption: {} kWh",
        format_decimal(unit.to_kwh(summary.consumption))
    ));
    report.push(format!(
        "- Total production: {} kWh",
        format_decimal(unit.to_kwh(summary.production))
    ));
    report.push(format!(
        "- Average temperature: {} °C",
        format_decimal(summary.average_temperature)
    ));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EnergyTotals;
    use crate::types::{EnergyReading, PhaseReading};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn reservation(id: u32, name: &str, hours: u32, price: i64, confirmed: bool) -> Reservation {
        Reservation {
            reservation_id: id,
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "0401234567".to_string(),
            reservation_date: NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_hours: hours,
            price: Decimal::new(price, 2),
            confirmed,
            resource: "Forest Area 1".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn moomin_register_lines() {
        let list = vec![reservation(201, "Moomin Valley", 2, 1850, true)];
        assert_eq!(
            confirmed_lines(&list).lines(),
            ["- Moomin Valley, Forest Area 1, 12.11.2025 at 09.00"]
        );
        assert!(long_lines(&list).is_empty());
        assert_eq!(
            revenue_line(&list).unwrap(),
            "Total revenue from confirmed reservations: 37,00 €"
        );
    }

    #[test]
    fn long_and_status_lines() {
        let list = vec![
            reservation(1, "Snufkin", 3, 1000, false),
            reservation(2, "Little My", 1, 1000, true),
        ];
        assert_eq!(
            long_lines(&list).lines(),
            ["- Snufkin, 12.11.2025 at 09.00, duration 3 h, Forest Area 1"]
        );
        assert_eq!(
            status_lines(&list).lines(),
            ["Snufkin → NOT Confirmed", "Little My → Confirmed"]
        );
        assert_eq!(
            summary_lines(&list).lines(),
            [
                "- Confirmed reservations: 1 pcs",
                "- Not confirmed reservations: 1 pcs"
            ]
        );
        assert_eq!(
            revenue_line(&list).unwrap(),
            "Total revenue from confirmed reservations: 10,00 €"
        );
    }

    #[test]
    fn confirmation_counts_cover_everything() {
        let list = vec![
            reservation(1, "A", 1, 100, true),
            reservation(2, "B", 1, 100, false),
            reservation(3, "C", 1, 100, false),
        ];
        let summary = ConfirmationSummary::from_reservations(&list);
        assert_eq!(summary.total(), list.len());
        assert_eq!(summary.confirmed, 1);
    }

    #[test]
    fn builder_skips_disabled_sections() {
        let list = vec![reservation(201, "Moomin Valley", 2, 1850, true)];
        let report = ReservationReportBuilder::new(&list)
            .confirmed(false)
            .long(false)
            .statuses(false)
            .summary(false)
            .render()
            .unwrap();
        assert_eq!(
            report.lines(),
            [
                "5) Total Revenue from Confirmed Reservations",
                "Total revenue from confirmed reservations: 37,00 €",
                ""
            ]
        );
    }

    #[test]
    fn details_block() {
        let mut r = reservation(123, "Anna Virtanen", 2, 1995, true);
        r.resource = "Meeting Room A".to_string();
        r.reservation_date = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        r.reservation_time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let report = reservation_details(&r).unwrap();
        assert_eq!(report.lines()[2], "Date: 31.10.2025");
        assert_eq!(report.lines()[3], "Start time: 10.00");
        assert_eq!(report.lines()[5], "Hourly price: 19,95 €");
        assert_eq!(report.lines()[6], "Total price: 39,90 €");
        assert_eq!(report.lines()[7], "Paid: Yes");
        assert_eq!(report.lines()[8], "Location: Meeting Room A");
    }

    #[test]
    fn revenue_overflow_is_an_error() {
        let mut huge = reservation(1, "A", 2, 0, true);
        huge.price = Decimal::MAX;
        assert!(matches!(
            revenue_line(std::slice::from_ref(&huge)),
            Err(ReportError::Overflow(_))
        ));
        assert!(reservation_details(&huge).is_err());

        let mut one_hour = reservation(2, "B", 1, 0, true);
        one_hour.price = Decimal::MAX;
        let list = vec![one_hour.clone(), one_hour];
        assert!(matches!(
            ReservationReportBuilder::new(&list).render(),
            Err(ReportError::Overflow("total revenue"))
        ));
        assert!(
            ReservationReportBuilder::new(&list)
                .revenue(false)
                .render()
                .is_ok()
        );
    }

    #[test]
    fn summary_separates_weeks_without_trailing_blank() {
        let readings = vec![PhaseReading {
            timestamp: NaiveDate::from_ymd_opt(2025, 10, 13)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            consumption: [1000.0, 0.0, 0.0],
            production: [0.0, 0.0, 0.0],
        }];
        let daily = DailyTotals::<PhaseTotals>::from_records(&readings);
        let report = multi_week_summary([(41, &daily), (42, &daily)], EnergyUnit::Wh);
        assert_eq!(report.lines().len(), 5 + 1 + 5);
        assert_eq!(report.lines()[5], "");
        assert!(report.lines()[6].starts_with("Week 42"));
        assert!(!report.lines().last().unwrap().is_empty());
    }

    #[test]
    fn weekly_row_in_kwh() {
        let ts = |h| {
            NaiveDate::from_ymd_opt(2025, 10, 13)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let readings = vec![
            PhaseReading {
                timestamp: ts(0),
                consumption: [700.0, 0.0, 0.0],
                production: [0.0, 0.0, 0.0],
            },
            PhaseReading {
                timestamp: ts(1),
                consumption: [800.0, 0.0, 0.0],
                production: [0.0, 0.0, 12.0],
            },
        ];
        let daily = DailyTotals::<PhaseTotals>::from_records(&readings);
        let report = weekly_table(42, &daily, EnergyUnit::Wh);
        assert_eq!(
            report.lines()[0],
            "Week 42 electricity consumption and production (kWh, by phase)"
        );
        assert_eq!(report.lines()[3], "-".repeat(75));
        assert_eq!(
            report.lines()[4],
            "Maanantai    13.10.2025      1,50    0,00    0,00      0,00    0,00    0,01"
        );
    }

    #[test]
    fn period_blocks() {
        let ts = |d, h| {
            NaiveDate::from_ymd_opt(2025, 3, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let readings = vec![
            EnergyReading {
                timestamp: ts(1, 0),
                consumption: 1.25,
                production: 0.5,
                temperature: 10.0,
            },
            EnergyReading {
                timestamp: ts(1, 1),
                consumption: 1.25,
                production: 0.5,
                temperature: 20.0,
            },
            EnergyReading {
                timestamp: ts(2, 0),
                consumption: 2.0,
                production: 0.0,
                temperature: 0.0,
            },
        ];
        let daily = DailyTotals::<EnergyTotals>::from_records(&readings);

        let month = period_report(&daily.month_summary(2025, 3), EnergyUnit::Kwh);
        assert_eq!(
            month.lines(),
            [
                "-".repeat(53).as_str(),
                "Report for the month: March",
                "- Total consumption: 4,50 kWh",
                "- Total production: 1,00 kWh",
                "- Average temperature: 7,50 °C",
            ]
        );

        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let range = period_report(&daily.range_summary(start, end), EnergyUnit::Kwh);
        assert_eq!(range.lines()[1], "Report for the period 01.03.2025-02.03.2025");
        assert_eq!(range.lines()[4], "- Average temperature: 10,00 °C");

        let year = period_report(&daily.year_summary(2025), EnergyUnit::Kwh);
        assert_eq!(year.lines()[0], "Report for the year: 2025");
    }

    #[test]
    fn display_ends_every_line() {
        let report: Report = ["a".to_string(), String::new(), "b".to_string()]
            .into_iter()
            .collect();
        assert_eq!(report.to_string(), "a\n\nb\n");
    }
}
