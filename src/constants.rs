// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, BROWN, LIGHTBLUE};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Font sizes, used through font_config.
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 15;
pub const FONT_SIZE_LEGEND: i32 = 15;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// --- Mission segment selection ---
pub const MISSION_STATUS: &str = "MISSION";
pub const GPS_SUBMERGED_FLAG: &str = "N"; // GPS fix rejected while under water
pub const MIN_MISSION_DEPTH_M: f64 = 1.0;

// --- Plot Color Assignments ---
pub const COLOR_VEHICLE_DEPTH: &RGBColor = &LIGHTBLUE;
pub const COLOR_BOTTOM_DEPTH: &RGBColor = &BROWN;
pub const COLOR_TIME_SERIES: &RGBColor = &BLUE;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_BOTTOM: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// --- Colored scatter ---
pub const SCATTER_POINT_SIZE: i32 = 2;
pub const COLORBAR_WIDTH_PX: i32 = 150;
pub const COLORBAR_STEPS: usize = 128;

// --- Axis and colorbar labels ---
pub const LABEL_TIME_SINCE_STARTUP: &str = "Time since startup [s]";
pub const LABEL_MONOTONIC_TIME: &str = "Monotonic time [s]";
pub const LABEL_DEPTH: &str = "Depth [m]";
pub const LABEL_BOTTOM_DEPTH: &str = "Bottom depth [m]";
pub const LABEL_TEMPERATURE: &str = "Temperature [°C]";
pub const LABEL_CONDUCTIVITY: &str = "Conductivity [mS/cm]";
pub const LABEL_SALINITY: &str = "Salinity [PSU]";
pub const LABEL_OXYGEN: &str = "Oxygen concentration [umol/L]";
pub const LABEL_SATURATION: &str = "Oxygen saturation [%]";
pub const LABEL_PHASE: &str = "Phase [°]";
pub const LABEL_TURBIDITY: &str = "Turbidity [FTU]";

// --- Figure file names, one per figure ---
pub const FIG_TIME_DEPTH: &str = "FIG1_TEMPS_PROF.png";
pub const FIG_SECTION_TEMPERATURE: &str = "FIG2_TEMPS_PROF_TEMP.png";
pub const FIG_TEMPERATURE: &str = "FIG3_TEMPS_TEMP.png";
pub const FIG_SECTION_CONDUCTIVITY: &str = "FIG4_TEMPS_PROF_COND.png";
pub const FIG_CONDUCTIVITY: &str = "FIG5_TEMPS_COND.png";
pub const FIG_SECTION_REPORTED_OXYGEN: &str = "FIG6_TEMPS_PROF_OXY.png";
pub const FIG_REPORTED_OXYGEN: &str = "FIG7_TEMPS_OXY.png";
pub const FIG_SECTION_ODO_TEMPERATURE: &str = "FIG8_TEMPS_PROF_ODOTEMP.png";
pub const FIG_ODO_TEMPERATURE: &str = "FIG9_TEMPS_ODOTEMP.png";
pub const FIG_SECTION_ODO_PHASE: &str = "FIG10_TEMPS_PROF_ODOPHASE.png";
pub const FIG_ODO_PHASE: &str = "F11_PHASE.png";
pub const FIG_SECTION_SALINITY: &str = "F12_SAL_P.png";
pub const FIG_SALINITY: &str = "F13_SAL.png";
pub const FIG_SECTION_TURBIDITY: &str = "F14_TURB_P.png";
pub const FIG_TURBIDITY: &str = "F15_TURB.png";
pub const FIG_TS_DIAGRAM: &str = "FIG16_SAL_TEMP_PROF.png";
pub const FIG_SECTION_COMPENSATED_OXYGEN: &str = "FIG17_O2COMP.png";
pub const FIG_SECTION_SATURATION: &str = "FIG18_O2SAT.png";

// src/constants.rs
