// src/types.rs
// Type aliases to reduce complexity warnings

use crate::plot_functions::plot_dive::Figure;

// (x, y) points of one drawn line
pub type SeriesPoints = Vec<(f64, f64)>;

// (x, y, color value) points of a colored scatter
pub type ColoredPoints = Vec<(f64, f64, f64)>;

// Figures selected for one dive, keyed by output file name
pub type FigureList<'a> = Vec<(&'static str, Figure<'a>)>;
