// src/data_input/mission_filter.rs

use crate::constants::{GPS_SUBMERGED_FLAG, MIN_MISSION_DEPTH_M, MISSION_STATUS};
use crate::data_input::column_names::Channel;
use crate::data_input::dive_data::DiveData;
use crate::data_input::log_data::YucoRowData;
use crate::data_input::log_parser::ParsedLog;
use crate::error::LogParseError;

/// Optional inclusive bounds on one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueBounds {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// A missing value only passes when no bound is configured.
    pub fn contains(&self, value: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(v) = value else {
            return false;
        };
        self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
    }
}

/// Which rows count as mission samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionCriteria {
    /// Rows must be strictly deeper than this.
    pub min_depth_m: f64,
    pub temperature: ValueBounds,
    pub salinity: ValueBounds,
}

impl Default for MissionCriteria {
    fn default() -> Self {
        Self {
            min_depth_m: MIN_MISSION_DEPTH_M,
            temperature: ValueBounds::default(),
            salinity: ValueBounds::default(),
        }
    }
}

impl MissionCriteria {
    pub fn accepts(&self, row: &YucoRowData) -> bool {
        row.temperature_c.is_some()
            && row.auv_status.as_deref() == Some(MISSION_STATUS)
            && row.gps_accepted.as_deref() == Some(GPS_SUBMERGED_FLAG)
            && row.depth_m.is_some_and(|depth| depth > self.min_depth_m)
            && self.temperature.contains(row.temperature_c)
            && self.salinity.contains(row.salinity_psu)
    }
}

/// Keeps the submerged mission rows of a parsed export.
///
/// Fails with `MissingColumns` when the export has no GPS acceptance flag,
/// since surface and dive samples cannot be told apart without it.
pub fn select_mission_samples(
    log: &ParsedLog,
    criteria: &MissionCriteria,
) -> Result<DiveData, LogParseError> {
    if !log.columns.contains(Channel::GpsAccepted) {
        return Err(LogParseError::MissingColumns(vec![
            Channel::GpsAccepted.name().to_string()
        ]));
    }

    let selected: Vec<&YucoRowData> = log.rows.iter().filter(|row| criteria.accepts(row)).collect();
    log::info!(
        "Selected {} of {} rows as mission samples (depth > {} m).",
        selected.len(),
        log.rows.len(),
        criteria.min_depth_m
    );

    Ok(DiveData::from_rows(&selected, &log.columns))
}
