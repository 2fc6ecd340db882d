//! Settings loaded from an optional TOML file.

use crate::error::ReportError;
use crate::types::{EnergyUnit, ReservationLayout, TimeFormat};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--config` is given.
pub const CONFIG_ENV: &str = "RAPORTTI_CONFIG";

/// Report settings; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Year used by the monthly and yearly menu reports.
    pub report_year: i32,
    /// File the menu saves reports to.
    pub report_file: PathBuf,
    /// File the multi-week summary is written to.
    pub summary_file: PathBuf,
    /// Time column format of reservation registers.
    pub register_time_format: TimeFormat,
    /// Time column format of single-reservation files.
    pub single_time_format: TimeFormat,
    /// Unit of the consumption/production columns in yearly exports.
    pub yearly_energy_unit: EnergyUnit,
    /// Unit of the phase columns in weekly exports.
    pub phase_energy_unit: EnergyUnit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report_year: 2025,
            report_file: PathBuf::from("report.txt"),
            summary_file: PathBuf::from("summary.txt"),
            register_time_format: TimeFormat::HourMinuteSecond,
            single_time_format: TimeFormat::HourMinute,
            yearly_energy_unit: EnergyUnit::Kwh,
            phase_energy_unit: EnergyUnit::Wh,
        }
    }
}

impl Settings {
    /// Loads from `path`, else from `$RAPORTTI_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ReportError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading settings");
                Self::from_toml(&fs::read_to_string(path)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parses settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ReportError> {
        Ok(toml::from_str(text)?)
    }

    /// Layout for reservation registers.
    #[inline]
    pub const fn register_layout(&self) -> ReservationLayout {
        ReservationLayout::Register(self.register_time_format)
    }

    /// Layout for single-reservation files.
    #[inline]
    pub const fn single_layout(&self) -> ReservationLayout {
        ReservationLayout::Single(self.single_time_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_override() {
        let settings = Settings::from_toml(
            "report_year = 2024\nregister_time_format = \"hh:mm\"\nyearly_energy_unit = \"wh\"\n",
        )
        .unwrap();
        assert_eq!(settings.report_year, 2024);
        assert_eq!(
            settings.register_layout(),
            ReservationLayout::Register(TimeFormat::HourMinute)
        );
        assert_eq!(settings.yearly_energy_unit, EnergyUnit::Wh);
        assert_eq!(settings.report_file, PathBuf::from("report.txt"));
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = Settings::from_toml("report_year = \"soon\"").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raportti.toml");
        fs::write(&path, "summary_file = \"weeks.txt\"\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.summary_file, PathBuf::from("weeks.txt"));
    }
}
