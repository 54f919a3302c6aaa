// src/plot_functions/plot_depth_section.rs

use std::error::Error;
use std::path::Path;

use ndarray::ArrayView1;

use crate::constants::{COLOR_BOTTOM_DEPTH, LABEL_BOTTOM_DEPTH, LABEL_DEPTH, LINE_WIDTH_BOTTOM};
use crate::plot_framework::{
    calculate_range, draw_scatter_plot, finite_bounds, finite_colored_points, finite_points,
    span_range, PlotSeries, ScatterPlotConfig,
};

/// One depth section: samples placed by time and depth, colored by a channel.
#[derive(Debug, Clone)]
pub struct SectionFigure<'a> {
    pub title: &'static str,
    pub value_label: &'static str,
    pub time_label: &'static str,
    pub time_s: ArrayView1<'a, f64>,
    pub depth_m: ArrayView1<'a, f64>,
    pub values: ArrayView1<'a, f64>,
    /// Seabed line, only meaningful on the time-since-startup axis.
    pub bottom_depth_m: Option<ArrayView1<'a, f64>>,
}

impl SectionFigure<'_> {
    pub fn config(&self) -> Option<ScatterPlotConfig> {
        let points = finite_colored_points(self.time_s, self.depth_m, self.values);
        let overlay: Vec<PlotSeries> = self
            .bottom_depth_m
            .map(|bottom| PlotSeries {
                data: finite_points(self.time_s, bottom),
                label: LABEL_BOTTOM_DEPTH.to_string(),
                color: *COLOR_BOTTOM_DEPTH,
                stroke_width: LINE_WIDTH_BOTTOM,
            })
            .into_iter()
            .filter(|s| !s.data.is_empty())
            .collect();

        let overlay_points = overlay.iter().flat_map(|s| s.data.iter().copied());
        let all_xy = points.iter().map(|&(x, y, _)| (x, y)).chain(overlay_points);
        let (xs, ys): (Vec<f64>, Vec<f64>) = all_xy.unzip();

        let (time_min, time_max) = finite_bounds(xs)?;
        let (depth_min, depth_max) = finite_bounds(ys)?;
        let (value_min, value_max) = finite_bounds(points.iter().map(|p| p.2))?;
        let (y_min, y_max) = calculate_range(depth_min, depth_max);

        Some(ScatterPlotConfig {
            title: self.title.to_string(),
            x_range: span_range(time_min, time_max),
            y_range: y_min..y_max,
            points,
            color_range: span_range(value_min, value_max),
            color_label: self.value_label.to_string(),
            overlay,
            x_label: self.time_label.to_string(),
            y_label: LABEL_DEPTH.to_string(),
            invert_y: true,
        })
    }

    pub fn plot(&self, output_path: &Path, root_name: &str) -> Result<bool, Box<dyn Error>> {
        draw_scatter_plot(output_path, root_name, self.value_label, self.config())
    }
}
