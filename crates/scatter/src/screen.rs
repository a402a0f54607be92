//! Screen mapping
//!
//! Maps data coordinates into the inner plot area. Screen Y grows
//! downward, so the Y scale runs from the bottom of the plot to the top.

use serde::{Deserialize, Serialize};

use crate::colors::ColorMap;
use crate::model::{PlotBounds, Point, RenderedPoint};
use crate::scale::LinearScale;

/// Outer size of the plot in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Viewport used before the host reports a real size
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

impl Default for Viewport {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The plot area left after the margins, never negative
    pub fn inner_size(&self, margins: &Margins) -> InnerSize {
        InnerSize {
            width: (self.width - margins.left - margins.right).max(0.0),
            height: (self.height - margins.top - margins.bottom).max(0.0),
        }
    }
}

/// Space reserved around the plot area for axes and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Size of the inner plot area in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerSize {
    pub width: f64,
    pub height: f64,
}

impl InnerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale for the X axis: left edge to right edge
    pub fn x_scale(&self, bounds: &PlotBounds) -> LinearScale {
        LinearScale::new((bounds.x.min, bounds.x.max), (0.0, self.width))
    }

    /// Scale for the Y axis: bottom edge to top edge
    pub fn y_scale(&self, bounds: &PlotBounds) -> LinearScale {
        LinearScale::new((bounds.y.min, bounds.y.max), (self.height, 0.0))
    }
}

/// Attach screen coordinates and colors to points, keeping their order
pub fn transform_points_to_screen(
    points: &[Point],
    bounds: &PlotBounds,
    inner: InnerSize,
    color_map: &ColorMap,
) -> Vec<RenderedPoint> {
    let x_scale = inner.x_scale(bounds);
    let y_scale = inner.y_scale(bounds);

    points
        .iter()
        .map(|point| RenderedPoint {
            screen_x: x_scale.map(point.x),
            screen_y: y_scale.map(point.y),
            color: color_map.color_for(point.category.as_deref()).to_string(),
            point: point.clone(),
        })
        .collect()
}
