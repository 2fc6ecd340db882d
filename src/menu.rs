//! Interactive report menu over a yearly energy export.

use crate::aggregate::{DailyTotals, EnergyTotals};
use crate::config::Settings;
use crate::error::ReportError;
use crate::report::{Report, period_report};
use crate::sink::{ReportSink, write_report};
use crate::utils::parse_fi_date;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

/// What the user picked in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    DailyRange,
    Monthly,
    Yearly,
    Exit,
}

impl MainChoice {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::DailyRange),
            "2" => Some(Self::Monthly),
            "3" => Some(Self::Yearly),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Parses a month number 1..=12.
pub fn parse_month(s: &str) -> Result<u32, ReportError> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| ReportError::UserInput(format!("month '{}' is not 1-12", s.trim())))
}

/// Menu loop reading answers from `input` and printing to `output`.
///
/// End of input leaves the loop as if the user had chosen exit.
pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    daily: &'a DailyTotals<EnergyTotals>,
    settings: &'a Settings,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Menu over precomputed daily totals.
    pub const fn new(
        input: R,
        output: W,
        daily: &'a DailyTotals<EnergyTotals>,
        settings: &'a Settings,
    ) -> Self {
        Self {
            input,
            output,
            daily,
            settings,
        }
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), ReportError> {
        loop {
            writeln!(self.output)?;
            self.show_main_menu()?;
            let Some(answer) = self.prompt("Your choice: ")? else {
                return Ok(());
            };
            let Some(choice) = MainChoice::parse(&answer) else {
                writeln!(self.output, "Invalid selection. Please choose 1-4.")?;
                continue;
            };

            let report = match choice {
                MainChoice::DailyRange => self.daily_report()?,
                MainChoice::Monthly => self.monthly_report()?,
                MainChoice::Yearly => Some(self.yearly_report()),
                MainChoice::Exit => return Ok(()),
            };
            let Some(report) = report else {
                return Ok(());
            };
            write_report(&mut self.output, &report)?;

            if !self.after_report(&report)? {
                return Ok(());
            }
        }
    }

    fn show_main_menu(&mut self) -> Result<(), ReportError> {
        writeln!(self.output, "Choose a report type:")?;
        writeln!(self.output, "1) Daily summary for a date range")?;
        writeln!(self.output, "2) Monthly summary for one month")?;
        writeln!(
            self.output,
            "3) Full year {} summary",
            self.settings.report_year
        )?;
        writeln!(self.output, "4) Exit the program")?;
        Ok(())
    }

    /// Returns `false` when the program should end.
    fn after_report(&mut self, report: &Report) -> Result<bool, ReportError> {
        loop {
            writeln!(self.output, "What would you like to do next?")?;
            writeln!(
                self.output,
                "1) Write the report to the file {}",
                self.settings.report_file.display()
            )?;
            writeln!(self.output, "2) Create a new report")?;
            writeln!(self.output, "3) Exit")?;
            let Some(answer) = self.prompt("Your choice: ")? else {
                return Ok(false);
            };
            match answer.as_str() {
                "1" => {
                    ReportSink::File(self.settings.report_file.clone()).emit(report)?;
                    writeln!(
                        self.output,
                        "Saved to {}.",
                        self.settings.report_file.display()
                    )?;
                }
                "2" => return Ok(true),
                "3" => return Ok(false),
                _ => writeln!(self.output, "Invalid selection. Please choose 1-3.")?,
            }
        }
    }

    fn daily_report(&mut self) -> Result<Option<Report>, ReportError> {
        let Some(start) = self.ask_date("Enter start date (dd.mm.yyyy): ")? else {
            return Ok(None);
        };
        let Some(end) = self.ask_date("Enter end date (dd.mm.yyyy): ")? else {
            return Ok(None);
        };
        let summary = self.daily.range_summary(start, end);
        Ok(Some(period_report(
            &summary,
            self.settings.yearly_energy_unit,
        )))
    }

    fn monthly_report(&mut self) -> Result<Option<Report>, ReportError> {
        loop {
            let Some(answer) = self.prompt("Enter month number (1-12): ")? else {
                return Ok(None);
            };
            match parse_month(&answer) {
                Ok(month) => {
                    let summary = self.daily.month_summary(self.settings.report_year, month);
                    return Ok(Some(period_report(
                        &summary,
                        self.settings.yearly_energy_unit,
                    )));
                }
                Err(err) => {
                    tracing::debug!(%err, "rejected month input");
                    writeln!(self.output, "Invalid month. Please enter a number 1-12.")?;
                }
            }
        }
    }

    fn yearly_report(&self) -> Report {
        let summary = self.daily.year_summary(self.settings.report_year);
        period_report(&summary, self.settings.yearly_energy_unit)
    }

    fn ask_date(&mut self, text: &str) -> Result<Option<NaiveDate>, ReportError> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_fi_date(&answer) {
                Ok(date) => return Ok(Some(date)),
                Err(err) => {
                    tracing::debug!(%err, "rejected date input");
                    writeln!(self.output, "Invalid date. Please use dd.mm.yyyy.")?;
                }
            }
        }
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, ReportError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
