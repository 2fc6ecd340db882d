//! CLI: renders reservation and energy reports from delimited files.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use raportti::{
    DailyTotals, EnergyTotals, Menu, PhaseTotals, RawTable, ReportError, ReportSink,
    ReservationLayout, ReservationReportBuilder, Settings, SourceFormat, TimeFormat,
    multi_week_summary, reservation_details, weekly_table,
};
use tracing_subscriber::EnvFilter;

/// Reservation and electricity reports in Finnish formatting.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true, env = raportti::CONFIG_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Details of a single reservation (10-column file).
    Reservation {
        /// Pipe-delimited reservation file.
        file: PathBuf,
        /// Overrides the configured time column format.
        #[arg(long, value_enum)]
        time_format: Option<TimeFormat>,
    },
    /// Confirmed, long, status, summary and revenue sections (11-column file).
    Reservations {
        /// Pipe-delimited reservation register.
        file: PathBuf,
        /// Overrides the configured time column format.
        #[arg(long, value_enum)]
        time_format: Option<TimeFormat>,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Per-day phase table of one week.
    Week {
        /// Semicolon-delimited phase export.
        file: PathBuf,
        /// Week number shown in the title.
        #[arg(short, long)]
        week: u32,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Phase tables of several weeks in one file.
    Summary {
        /// `WEEK=FILE` pairs, e.g. `41=week41.csv`.
        #[arg(required = true, value_parser = parse_week_source)]
        weeks: Vec<(u32, PathBuf)>,
        /// Output file, `-` for stdout. Defaults to the configured summary file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive range/month/year reports over a yearly export.
    Menu {
        /// Semicolon-delimited export: timestamp, consumption, production, temperature.
        file: PathBuf,
    },
}

fn parse_week_source(s: &str) -> Result<(u32, PathBuf), ReportError> {
    let (week, path) = s
        .split_once('=')
        .ok_or_else(|| ReportError::UserInput(format!("expected WEEK=FILE, got '{s}'")))?;
    let week = week
        .trim()
        .parse()
        .map_err(|_| ReportError::UserInput(format!("invalid week number '{week}'")))?;
    Ok((week, PathBuf::from(path.trim())))
}

fn sink_for(output: Option<PathBuf>) -> ReportSink {
    match output {
        Some(path) if path.as_os_str() == "-" => ReportSink::Stdout,
        Some(path) => ReportSink::File(path),
        None => ReportSink::Stdout,
    }
}

/// `summary` always writes somewhere: `--output`, else the configured summary file.
fn summary_sink(output: Option<PathBuf>, settings: &Settings) -> ReportSink {
    sink_for(Some(output.unwrap_or_else(|| settings.summary_file.clone())))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raportti=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Reservation { file, time_format } => {
            let layout = ReservationLayout::Single(
                time_format.unwrap_or(settings.single_time_format),
            );
            let reservations =
                RawTable::from_path(&file, SourceFormat::RESERVATIONS)?.reservations(layout)?;
            let first = reservations
                .first()
                .ok_or_else(|| format!("no reservation in {}", file.display()))?;
            ReportSink::Stdout.emit(&reservation_details(first)?)?;
        }
        Command::Reservations {
            file,
            time_format,
            output,
        } => {
            let layout = ReservationLayout::Register(
                time_format.unwrap_or(settings.register_time_format),
            );
            let reservations =
                RawTable::from_path(&file, SourceFormat::RESERVATIONS)?.reservations(layout)?;
            let report = ReservationReportBuilder::new(&reservations).render()?;
            sink_for(output).emit(&report)?;
        }
        Command::Week { file, week, output } => {
            let readings = RawTable::from_path(&file, SourceFormat::METER_CSV)?.phase_readings()?;
            let daily = DailyTotals::<PhaseTotals>::from_records(&readings);
            sink_for(output).emit(&weekly_table(week, &daily, settings.phase_energy_unit))?;
        }
        Command::Summary { weeks, output } => {
            let mut tables = Vec::with_capacity(weeks.len());
            for (week, file) in weeks {
                let readings =
                    RawTable::from_path(&file, SourceFormat::METER_CSV)?.phase_readings()?;
                tables.push((week, DailyTotals::<PhaseTotals>::from_records(&readings)));
            }
            let report = multi_week_summary(
                tables.iter().map(|(week, daily)| (*week, daily)),
                settings.phase_energy_unit,
            );
            summary_sink(output, &settings).emit(&report)?;
        }
        Command::Menu { file } => {
            let readings = RawTable::from_path(&file, SourceFormat::METER_CSV)?.energy_readings()?;
            let daily = DailyTotals::<EnergyTotals>::from_records(&readings);
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(stdin.lock(), stdout.lock(), &daily, &settings).run()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    run(cli).inspect_err(|err| tracing::error!(%err, "report failed"))
}
