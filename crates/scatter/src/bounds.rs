//! Axis bounds calculation
//!
//! Bounds are the data extent of each axis widened by a fixed fraction of
//! the range, so points never sit on the plot edge. Zero-width extents get
//! a fallback padding so every axis stays renderable.

use crate::model::{AxisBounds, PlotBounds, Point};

/// Fraction of the data range added on each side of an axis
pub const DEFAULT_PADDING: f64 = 0.05;

/// Padding used when every value is zero
pub const ZERO_RANGE_PADDING: f64 = 1.0;

/// Compute padded bounds for one axis. Returns `None` for empty input.
pub fn calculate_axis_bounds(values: &[f64], padding_fraction: f64) -> Option<AxisBounds> {
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let padding = if range == 0.0 {
        let relative = min.abs() * padding_fraction;
        if relative == 0.0 {
            ZERO_RANGE_PADDING
        } else {
            relative
        }
    } else if range.is_finite() {
        range * padding_fraction
    } else {
        // The extent itself overflows, so pad from the endpoints separately
        max * padding_fraction - min * padding_fraction
    };

    Some(AxisBounds::new(
        (min - padding).max(f64::MIN),
        (max + padding).min(f64::MAX),
    ))
}

/// Compute padded bounds for both axes of a point set
pub fn calculate_plot_bounds(points: &[Point], padding_fraction: f64) -> Option<PlotBounds> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    Some(PlotBounds {
        x: calculate_axis_bounds(&xs, padding_fraction)?,
        y: calculate_axis_bounds(&ys, padding_fraction)?,
    })
}
