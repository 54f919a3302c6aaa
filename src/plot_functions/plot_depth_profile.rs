// src/plot_functions/plot_depth_profile.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_BOTTOM_DEPTH, COLOR_VEHICLE_DEPTH, LABEL_BOTTOM_DEPTH, LABEL_DEPTH,
    LABEL_TIME_SINCE_STARTUP, LINE_WIDTH_BOTTOM, LINE_WIDTH_PLOT,
};
use crate::data_input::dive_data::DiveData;
use crate::plot_framework::{
    calculate_range, draw_line_plot, finite_bounds, finite_points, span_range, PlotConfig,
    PlotSeries,
};

/// Vehicle depth against time, with the detected seabed when available.
/// The depth axis grows downwards.
pub fn depth_profile_config(dive: &DiveData) -> Option<PlotConfig> {
    let mut series = vec![PlotSeries {
        data: finite_points(dive.time_s.view(), dive.depth_m.view()),
        label: "Legato3 depth [m]".to_string(),
        color: *COLOR_VEHICLE_DEPTH,
        stroke_width: LINE_WIDTH_PLOT,
    }];
    if let Some(bottom) = &dive.bottom_depth_m {
        series.push(PlotSeries {
            data: finite_points(dive.time_s.view(), bottom.view()),
            label: LABEL_BOTTOM_DEPTH.to_string(),
            color: *COLOR_BOTTOM_DEPTH,
            stroke_width: LINE_WIDTH_BOTTOM,
        });
    }

    let (time_min, time_max) =
        finite_bounds(series.iter().flat_map(|s| s.data.iter().map(|p| p.0)))?;
    let (depth_min, depth_max) =
        finite_bounds(series.iter().flat_map(|s| s.data.iter().map(|p| p.1)))?;
    let (y_min, y_max) = calculate_range(depth_min, depth_max);

    Some(PlotConfig {
        title: "Vehicle depth relative to the detected seabed".to_string(),
        x_range: span_range(time_min, time_max),
        y_range: y_min..y_max,
        series,
        x_label: LABEL_TIME_SINCE_STARTUP.to_string(),
        y_label: LABEL_DEPTH.to_string(),
        invert_y: true,
    })
}

pub fn plot_depth_profile(
    dive: &DiveData,
    output_path: &Path,
    root_name: &str,
) -> Result<bool, Box<dyn Error>> {
    draw_line_plot(output_path, root_name, "Depth Profile", depth_profile_config(dive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dive() -> DiveData {
        DiveData {
            time_s: array![0.0, 10.0, 20.0],
            monotonic_time_s: None,
            depth_m: array![2.0, f64::NAN, 6.0],
            bottom_depth_m: Some(array![30.0, 32.0, 31.0]),
            pressure_bar: array![0.2, 0.4, 0.6],
            temperature_c: array![15.0, 14.0, 13.0],
            conductivity_ms_cm: array![50.0, 50.0, 50.0],
            salinity_psu: array![37.0, 37.1, 37.2],
            oxygen: None,
            turbidity: None,
        }
    }

    #[test]
    fn test_profile_has_vehicle_and_bottom_series() {
        let config = depth_profile_config(&dive()).expect("config");
        assert_eq!(config.series.len(), 2);
        assert_eq!(config.series[0].data, vec![(0.0, 2.0), (20.0, 6.0)]);
        assert_eq!(config.series[1].data.len(), 3);
        assert!(config.invert_y);
        assert_eq!(config.x_range, 0.0..20.0);
        assert!(config.y_range.start < 2.0 && config.y_range.end > 32.0);
    }

    #[test]
    fn test_profile_without_bottom_columns() {
        let mut dive = dive();
        dive.bottom_depth_m = None;
        let config = depth_profile_config(&dive).expect("config");
        assert_eq!(config.series.len(), 1);
    }

    #[test]
    fn test_profile_without_finite_depth_is_none() {
        let mut dive = dive();
        dive.bottom_depth_m = None;
        dive.depth_m = array![f64::NAN, f64::NAN, f64::NAN];
        assert!(depth_profile_config(&dive).is_none());
    }
}
