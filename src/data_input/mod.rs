// src/data_input/mod.rs

pub mod column_names;
pub mod discovery;
pub mod dive_data;
pub mod log_data;
pub mod log_parser;
pub mod mission_filter;

// src/data_input/mod.rs
