// src/data_input/dive_data.rs

use ndarray::Array1;

use crate::data_analysis::oxygen_calibration::{CalibrationTable, OxygenSeries};
use crate::data_input::column_names::{Channel, ColumnMap};
use crate::data_input::log_data::YucoRowData;
use crate::error::CalibrationError;

/// Optode channels, present only when the export carries concentration and phase.
#[derive(Debug, Clone, PartialEq)]
pub struct OxygenChannels {
    pub reported_umol_l: Array1<f64>,
    pub phase_deg: Array1<f64>,
    pub odo_temperature_c: Option<Array1<f64>>,
}

/// Columnar mission samples. Every array has the same length; cells that
/// were missing in the export are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveData {
    pub time_s: Array1<f64>,
    pub monotonic_time_s: Option<Array1<f64>>,
    pub depth_m: Array1<f64>,
    /// Vehicle depth plus altitude.
    pub bottom_depth_m: Option<Array1<f64>>,
    pub pressure_bar: Array1<f64>,
    pub temperature_c: Array1<f64>,
    pub conductivity_ms_cm: Array1<f64>,
    pub salinity_psu: Array1<f64>,
    pub oxygen: Option<OxygenChannels>,
    pub turbidity: Option<Array1<f64>>,
}

fn column<F>(rows: &[&YucoRowData], value: F) -> Array1<f64>
where
    F: Fn(&YucoRowData) -> Option<f64>,
{
    rows.iter().map(|row| value(row).unwrap_or(f64::NAN)).collect()
}

impl DiveData {
    pub fn from_rows(rows: &[&YucoRowData], columns: &ColumnMap) -> Self {
        let optional = |channel: Channel, value: fn(&YucoRowData) -> Option<f64>| {
            columns.contains(channel).then(|| column(rows, value))
        };

        let bottom_depth_m = match (
            optional(Channel::VehicleDepth, |r| r.vehicle_depth_m),
            optional(Channel::Altitude, |r| r.altitude_m),
        ) {
            (Some(depth), Some(altitude)) => Some(depth + altitude),
            _ => None,
        };

        let oxygen = match (
            optional(Channel::OxygenConcentration, |r| r.oxygen_umol_l),
            optional(Channel::OdoPhase, |r| r.odo_phase_deg),
        ) {
            (Some(reported_umol_l), Some(phase_deg)) => Some(OxygenChannels {
                reported_umol_l,
                phase_deg,
                odo_temperature_c: optional(Channel::OdoTemperature, |r| r.odo_temperature_c),
            }),
            _ => None,
        };

        DiveData {
            time_s: column(rows, |r| r.time_s),
            monotonic_time_s: optional(Channel::MonotonicTime, |r| r.monotonic_time_s),
            depth_m: column(rows, |r| r.depth_m),
            bottom_depth_m,
            pressure_bar: column(rows, |r| r.pressure_bar),
            temperature_c: column(rows, |r| r.temperature_c),
            conductivity_ms_cm: column(rows, |r| r.conductivity_ms_cm),
            salinity_psu: column(rows, |r| r.salinity_psu),
            oxygen,
            turbidity: optional(Channel::Turbidity, |r| r.turbidity),
        }
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Runs the calibration chain on the optode channels, if any.
    pub fn derive_oxygen(
        &self,
        table: &CalibrationTable,
    ) -> Result<Option<OxygenSeries>, CalibrationError> {
        let Some(oxygen) = &self.oxygen else {
            return Ok(None);
        };
        table
            .derive_series(
                self.temperature_c.view(),
                oxygen.phase_deg.view(),
                self.pressure_bar.view(),
                self.salinity_psu.view(),
            )
            .map(Some)
    }
}
