// src/plot_functions/plot_ts_diagram.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{LABEL_DEPTH, LABEL_SALINITY, LABEL_TEMPERATURE};
use crate::data_input::dive_data::DiveData;
use crate::plot_framework::{
    calculate_range, draw_scatter_plot, finite_bounds, finite_colored_points, span_range,
    ScatterPlotConfig,
};

/// Temperature-salinity diagram, each sample colored by its depth.
pub fn ts_diagram_config(dive: &DiveData) -> Option<ScatterPlotConfig> {
    let points = finite_colored_points(
        dive.salinity_psu.view(),
        dive.temperature_c.view(),
        dive.depth_m.view(),
    );
    let (sal_min, sal_max) = finite_bounds(points.iter().map(|p| p.0))?;
    let (temp_min, temp_max) = finite_bounds(points.iter().map(|p| p.1))?;
    let (depth_min, depth_max) = finite_bounds(points.iter().map(|p| p.2))?;
    let (x_min, x_max) = calculate_range(sal_min, sal_max);
    let (y_min, y_max) = calculate_range(temp_min, temp_max);

    Some(ScatterPlotConfig {
        title: "T-S diagram colored by depth".to_string(),
        x_range: x_min..x_max,
        y_range: y_min..y_max,
        points,
        color_range: span_range(depth_min, depth_max),
        color_label: LABEL_DEPTH.to_string(),
        overlay: Vec::new(),
        x_label: LABEL_SALINITY.to_string(),
        y_label: LABEL_TEMPERATURE.to_string(),
        invert_y: false,
    })
}

pub fn plot_ts_diagram(
    dive: &DiveData,
    output_path: &Path,
    root_name: &str,
) -> Result<bool, Box<dyn Error>> {
    draw_scatter_plot(output_path, root_name, "T-S Diagram", ts_diagram_config(dive))
}
