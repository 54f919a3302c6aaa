// src/data_input/log_data.rs

/// Structure to hold data parsed from a single row of a YUCO CSV export.
/// Uses `Option<f64>` to handle missing, empty or unparseable cells.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct YucoRowData {
    pub time_s: Option<f64>,             // Time since vehicle startup.
    pub monotonic_time_s: Option<f64>,   // Legato3 monotonic clock.
    pub depth_m: Option<f64>,            // Legato3 depth.
    pub vehicle_depth_m: Option<f64>,    // Vehicle depth, added to altitude for the seabed.
    pub altitude_m: Option<f64>,         // Altitude above the seabed.
    pub pressure_bar: Option<f64>,
    pub temperature_c: Option<f64>,
    pub conductivity_ms_cm: Option<f64>,
    pub salinity_psu: Option<f64>,
    pub oxygen_umol_l: Option<f64>,      // Concentration reported by the Legato3.
    pub odo_phase_deg: Option<f64>,      // Raw optode phase.
    pub odo_temperature_c: Option<f64>,
    pub turbidity: Option<f64>,          // FTU or NTU depending on the export.
    pub auv_status: Option<String>,      // "MISSION" while diving a mission.
    pub gps_accepted: Option<String>,    // "N" while submerged.
}
