// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use ndarray::ArrayView1;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    COLORBAR_STEPS, COLORBAR_WIDTH_PX, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT,
    PLOT_WIDTH, SCATTER_POINT_SIZE,
};
use crate::types::{ColoredPoints, SeriesPoints};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};

type FloatChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Unpadded range, widened only when degenerate (a single sample).
pub fn span_range(min_val: f64, max_val: f64) -> Range<f64> {
    if (max_val - min_val).abs() < 1e-9 {
        (min_val - 0.5)..(max_val + 0.5)
    } else {
        min_val.min(max_val)..max_val.max(min_val)
    }
}

/// Min and max over the finite values, `None` if there are none.
pub fn finite_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Pairs `x` and `y` and drops pairs with a non-finite coordinate.
pub fn finite_points(x: ArrayView1<f64>, y: ArrayView1<f64>) -> SeriesPoints {
    x.iter()
        .zip(y.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

/// Like [`finite_points`] with a third, color-mapped value.
pub fn finite_colored_points(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    value: ArrayView1<f64>,
) -> ColoredPoints {
    x.iter()
        .zip(y.iter())
        .zip(value.iter())
        .filter(|((x, y), v)| x.is_finite() && y.is_finite() && v.is_finite())
        .map(|((&x, &y), &v)| (x, y, v))
        .collect()
}

/// Y axis tick label: `k`/`M` suffixes for large values, up to two decimals
/// for fractional ones, integers otherwise.
pub fn format_axis_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value }; // no "-0"
    let magnitude = value.abs();
    let label = if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let fixed = format!("{:.2}", value);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    if label == "-0" {
        "0".to_string()
    } else {
        label
    }
}

/// Viridis color of `value` within `[min_value, max_value]`.
pub fn map_value_to_color(value: f64, min_value: f64, max_value: f64) -> RGBColor {
    if !value.is_finite() || !min_value.is_finite() || !max_value.is_finite() {
        return RGBColor(0, 0, 0); // Black for invalid values
    }

    // Ensure span is non-zero to avoid division by zero
    let span = (max_value - min_value).abs().max(1e-9);
    let t = ((value - min_value) / span).clamp(0.0, 1.0);

    let color = colorous::VIRIDIS.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    // Approximate character width relative to font size
    const CHAR_WIDTH_RATIO: f32 = 0.6;

    let (width, height) = area.dim_in_pixel();
    let message = format!("{plot_type} Data Unavailable: {reason}");
    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = (message.len() as i32).saturating_mul(estimated_char_width);

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: SeriesPoints,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// One line chart. With `invert_y`, values grow downwards (depth axes).
#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub invert_y: bool,
}

/// One scatter chart whose points are colored by a third value.
#[derive(Clone)]
pub struct ScatterPlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub points: ColoredPoints,
    pub color_range: Range<f64>,
    pub color_label: String,
    /// Lines drawn over the points, e.g. the seabed.
    pub overlay: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub invert_y: bool,
}

// Inverted axes are drawn on negated values; the tick formatter negates back.
fn y_orientation(range: &Range<f64>, invert: bool) -> (Range<f64>, f64) {
    if invert {
        (-range.end..-range.start, -1.0)
    } else {
        (range.clone(), 1.0)
    }
}

fn valid_ranges(x_range: &Range<f64>, y_range: &Range<f64>) -> bool {
    x_range.end > x_range.start && y_range.end > y_range.start
}

fn draw_line_series(
    chart: &mut FloatChart<'_, '_>,
    series: &[PlotSeries],
    y_sign: f64,
) -> Result<usize, Box<dyn Error>> {
    let mut legend_series_count = 0;
    for s in series {
        if s.data.is_empty() {
            continue;
        }
        let mut drawn = chart.draw_series(LineSeries::new(
            s.data.iter().map(|&(x, y)| (x, y * y_sign)),
            s.color.stroke_width(s.stroke_width),
        ))?;

        if !s.label.is_empty() {
            let color = s.color;
            drawn.label(s.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }
    Ok(legend_series_count)
}

fn draw_legend<'a>(chart: &mut FloatChart<'a, 'a>) -> Result<(), Box<dyn Error>> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(FONT_TUPLE_LEGEND)
        .draw()?;
    Ok(())
}

fn draw_line_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let (y_range, y_sign) = y_orientation(&plot_config.y_range, plot_config.invert_y);
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format_axis_value(y * y_sign))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    if draw_line_series(&mut chart, &plot_config.series, y_sign)? > 0 {
        draw_legend(&mut chart)?;
    }
    Ok(())
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, Shift>,
    color_range: &Range<f64>,
    color_label: &str,
) -> Result<(), Box<dyn Error>> {
    let mut bar = ChartBuilder::on(area)
        .margin(5)
        .margin_top(40)
        .x_label_area_size(50)
        .y_label_area_size(95)
        .build_cartesian_2d(0.0..1.0, color_range.clone())?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc(color_label)
        .y_labels(8)
        .y_label_formatter(&|v| format_axis_value(*v))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let step = (color_range.end - color_range.start) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = color_range.start + step * i as f64;
        let color = map_value_to_color(low + step * 0.5, color_range.start, color_range.end);
        Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
    }))?;
    Ok(())
}

fn draw_scatter_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &ScatterPlotConfig,
) -> Result<(), Box<dyn Error>> {
    let (area_width, _) = area.dim_in_pixel();
    let (chart_area, colorbar_area) =
        area.split_horizontally(area_width as i32 - COLORBAR_WIDTH_PX);

    let (y_range, y_sign) = y_orientation(&plot_config.y_range, plot_config.invert_y);
    let mut chart = ChartBuilder::on(&chart_area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format_axis_value(y * y_sign))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let (color_min, color_max) = (plot_config.color_range.start, plot_config.color_range.end);
    chart.draw_series(plot_config.points.iter().map(|&(x, y, value)| {
        Circle::new(
            (x, y * y_sign),
            SCATTER_POINT_SIZE,
            map_value_to_color(value, color_min, color_max).filled(),
        )
    }))?;

    if draw_line_series(&mut chart, &plot_config.overlay, y_sign)? > 0 {
        draw_legend(&mut chart)?;
    }

    draw_colorbar(&colorbar_area, &plot_config.color_range, &plot_config.color_label)
}

/// White 1920x1080 canvas with the export name in the top-left corner.
fn open_figure<'a>(
    output_path: &'a Path,
    root_name: &str,
) -> Result<DrawingArea<BitMapBackend<'a>, Shift>, Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    Ok(root_area)
}

fn report_saved(output_path: &Path, plotted: bool) {
    if plotted {
        log::info!("  Plot saved as '{}'.", output_path.display());
    } else {
        log::warn!(
            "  '{}' saved with a placeholder message only: no data to plot.",
            output_path.display()
        );
    }
}

/// Renders a line chart, or a placeholder when `plot_config` has nothing to show.
/// Returns whether data was drawn.
pub fn draw_line_plot(
    output_path: &Path,
    root_name: &str,
    plot_type_name: &str,
    plot_config: Option<PlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    let root_area = open_figure(output_path, root_name)?;
    let area = root_area.margin(50, 5, 5, 5);

    let plotted = match plot_config {
        Some(config) => {
            let has_data = config.series.iter().any(|s| !s.data.is_empty());
            if has_data && valid_ranges(&config.x_range, &config.y_range) {
                draw_line_chart(&area, &config)?;
                true
            } else {
                let reason = if !has_data { "No data points" } else { "Invalid ranges" };
                draw_unavailable_message(&area, plot_type_name, reason)?;
                false
            }
        }
        None => {
            draw_unavailable_message(&area, plot_type_name, "Data Not Available")?;
            false
        }
    };

    root_area.present()?;
    report_saved(output_path, plotted);
    Ok(plotted)
}

/// Renders a colored scatter chart with its colorbar, or a placeholder.
/// Returns whether data was drawn.
pub fn draw_scatter_plot(
    output_path: &Path,
    root_name: &str,
    plot_type_name: &str,
    plot_config: Option<ScatterPlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    let root_area = open_figure(output_path, root_name)?;
    let area = root_area.margin(50, 5, 5, 5);

    let plotted = match plot_config {
        Some(config) => {
            let has_data = !config.points.is_empty();
            let valid = valid_ranges(&config.x_range, &config.y_range)
                && config.color_range.end > config.color_range.start;
            if has_data && valid {
                draw_scatter_chart(&area, &config)?;
                true
            } else {
                let reason = if !has_data { "No data points" } else { "Invalid ranges" };
                draw_unavailable_message(&area, plot_type_name, reason)?;
                false
            }
        }
        None => {
            draw_unavailable_message(&area, plot_type_name, "Data Not Available")?;
            false
        }
    };

    root_area.present()?;
    report_saved(output_path, plotted);
    Ok(plotted)
}
