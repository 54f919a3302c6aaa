// src/plot_functions/mod.rs

pub mod plot_depth_profile;
pub mod plot_depth_section;
pub mod plot_dive;
pub mod plot_time_series;
pub mod plot_ts_diagram;

// src/plot_functions/mod.rs
