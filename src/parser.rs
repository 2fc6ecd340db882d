//! Typed records from raw rows.

use crate::error::ReportError;
use crate::raw::{RawRow, RawTable};
use crate::types::{EnergyReading, PhaseReading, Reservation, ReservationLayout};
use crate::utils::{
    parse_float,
    parse_flag,
    parse_int,
    parse_iso_date,
    parse_money,
    parse_time,
    parse_timestamp,
};

/// Columns in a phase export: timestamp, consumption v1..v3, production v1..v3.
const PHASE_COLUMNS: usize = 7;
/// Columns in a yearly export: timestamp, consumption, production, temperature.
const ENERGY_COLUMNS: usize = 4;

impl RawTable {
    /// Parses every row as a reservation in the given layout.
    pub fn reservations(&self, layout: ReservationLayout) -> Result<Vec<Reservation>, ReportError> {
        let reservations = self
            .rows
            .iter()
            .map(|row| parse_reservation(row, layout))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = reservations.len(), ?layout, "parsed reservations");
        Ok(reservations)
    }

    /// Parses every row as a per-phase meter reading.
    pub fn phase_readings(&self) -> Result<Vec<PhaseReading>, ReportError> {
        let readings = self
            .rows
            .iter()
            .map(parse_phase_reading)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = readings.len(), "parsed phase readings");
        Ok(readings)
    }

    /// Parses every row as a consumption/production/temperature reading.
    pub fn energy_readings(&self) -> Result<Vec<EnergyReading>, ReportError> {
        let readings = self
            .rows
            .iter()
            .map(parse_energy_reading)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = readings.len(), "parsed energy readings");
        Ok(readings)
    }
}

/// Returns the trimmed fields or a `ShortRow` error when columns are missing.
fn columns(row: &RawRow, expected: usize) -> Result<Vec<&str>, ReportError> {
    let found = row.fields.len();
    if found < expected {
        return Err(ReportError::ShortRow {
            line: row.line,
            expected,
            found,
        });
    }
    Ok(row.fields.iter().map(str::trim).collect())
}

/// Parses one reservation row.
pub fn parse_reservation(
    row: &RawRow,
    layout: ReservationLayout,
) -> Result<Reservation, ReportError> {
    let c = columns(row, layout.field_count())?;
    let time_format = layout.time_format();

    let reservation = match layout {
        ReservationLayout::Register(_) => Reservation {
            reservation_id: parse_int(c[0], "reservationId")?,
            name: c[1].to_string(),
            email: c[2].to_string(),
            phone: c[3].to_string(),
            reservation_date: parse_iso_date(c[4])?,
            reservation_time: parse_time(c[5], time_format)?,
            duration_hours: parse_int(c[6], "durationHours")?,
            price: parse_money(c[7], "price")?,
            confirmed: parse_flag(c[8], "confirmed"),
            resource: c[9].to_string(),
            created_at: Some(parse_timestamp(c[10])?),
        },
        ReservationLayout::Single(_) => Reservation {
            reservation_id: parse_int(c[0], "reservationId")?,
            name: c[1].to_string(),
            reservation_date: parse_iso_date(c[2])?,
            reservation_time: parse_time(c[3], time_format)?,
            duration_hours: parse_int(c[4], "hours")?,
            price: parse_money(c[5], "hourlyPrice")?,
            confirmed: parse_flag(c[6], "paid"),
            resource: c[7].to_string(),
            phone: c[8].to_string(),
            email: c[9].to_string(),
            created_at: None,
        },
    };
    Ok(reservation)
}

/// Parses one row of a per-phase export.
pub fn parse_phase_reading(row: &RawRow) -> Result<PhaseReading, ReportError> {
    let c = columns(row, PHASE_COLUMNS)?;
    Ok(PhaseReading {
        timestamp: parse_timestamp(c[0])?,
        consumption: [
            parse_float(c[1], "consumption v1")?,
            parse_float(c[2], "consumption v2")?,
            parse_float(c[3], "consumption v3")?,
        ],
        production: [
            parse_float(c[4], "production v1")?,
            parse_float(c[5], "production v2")?,
            parse_float(c[6], "production v3")?,
        ],
    })
}

/// Parses one row of a yearly export.
pub fn parse_energy_reading(row: &RawRow) -> Result<EnergyReading, ReportError> {
    let c = columns(row, ENERGY_COLUMNS)?;
    Ok(EnergyReading {
        timestamp: parse_timestamp(c[0])?,
        consumption: parse_float(c[1], "consumption")?,
        production: parse_float(c[2], "production")?,
        temperature: parse_float(c[3], "temperature")?,
    })
}
