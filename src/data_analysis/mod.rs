// src/data_analysis/mod.rs

pub mod dive_statistics;
pub mod oxygen_calibration;

// src/data_analysis/mod.rs
