// src/plot_functions/plot_time_series.rs

use std::error::Error;
use std::path::Path;

use ndarray::ArrayView1;

use crate::constants::{COLOR_TIME_SERIES, LINE_WIDTH_PLOT};
use crate::plot_framework::{
    calculate_range, draw_line_plot, finite_bounds, finite_points, span_range, PlotConfig,
    PlotSeries,
};

/// One channel against time.
#[derive(Debug, Clone)]
pub struct TimeSeriesFigure<'a> {
    pub title: &'static str,
    pub value_label: &'static str,
    pub time_label: &'static str,
    pub time_s: ArrayView1<'a, f64>,
    pub values: ArrayView1<'a, f64>,
}

impl TimeSeriesFigure<'_> {
    pub fn config(&self) -> Option<PlotConfig> {
        let data = finite_points(self.time_s, self.values);
        let (time_min, time_max) = finite_bounds(data.iter().map(|p| p.0))?;
        let (value_min, value_max) = finite_bounds(data.iter().map(|p| p.1))?;
        let (y_min, y_max) = calculate_range(value_min, value_max);

        Some(PlotConfig {
            title: self.title.to_string(),
            x_range: span_range(time_min, time_max),
            y_range: y_min..y_max,
            series: vec![PlotSeries {
                data,
                label: self.value_label.to_string(),
                color: *COLOR_TIME_SERIES,
                stroke_width: LINE_WIDTH_PLOT,
            }],
            x_label: self.time_label.to_string(),
            y_label: self.value_label.to_string(),
            invert_y: false,
        })
    }

    pub fn plot(&self, output_path: &Path, root_name: &str) -> Result<bool, Box<dyn Error>> {
        draw_line_plot(output_path, root_name, self.value_label, self.config())
    }
}
