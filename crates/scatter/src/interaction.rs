//! Interaction math: hit testing and zoom rescaling.
//!
//! The host owns the events; these functions only answer "which point is
//! under the cursor" and "what data range is visible after this zoom".

use serde::{Deserialize, Serialize};

use crate::model::{AxisBounds, PlotBounds, RenderedPoint};
use crate::screen::InnerSize;

/// Radius in pixels within which a cursor hits a point
pub const DEFAULT_HIT_RADIUS: f64 = 8.0;

/// Nearest point within `radius` pixels of a position in the inner plot area.
///
/// Ties go to the earlier point.
pub fn hit_test(
    points: &[RenderedPoint],
    screen_x: f64,
    screen_y: f64,
    radius: f64,
) -> Option<&RenderedPoint> {
    let radius_sq = radius * radius;
    let mut best: Option<(&RenderedPoint, f64)> = None;

    for point in points {
        let dx = point.screen_x - screen_x;
        let dy = point.screen_y - screen_y;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq > radius_sq {
            continue;
        }
        if best.map_or(true, |(_, d)| dist_sq < d) {
            best = Some((point, dist_sq));
        }
    }

    best.map(|(point, _)| point)
}

/// A zoom/pan transform in screen space: `screen' = screen * k + t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    pub fn identity() -> Self {
        Self {
            k: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn new(k: f64, tx: f64, ty: f64) -> Self {
        Self { k, tx, ty }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Zoom by `factor` keeping the screen position `(cx, cy)` fixed
    pub fn zoomed_at(&self, factor: f64, cx: f64, cy: f64) -> Self {
        let k = self.k * factor;
        Self {
            k,
            tx: cx - (cx - self.tx) * factor,
            ty: cy - (cy - self.ty) * factor,
        }
    }

    /// Shift by a screen-space offset
    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            tx: self.tx + dx,
            ty: self.ty + dy,
        }
    }

    /// Data bounds visible through this transform.
    ///
    /// The visible screen edges are mapped back through the inverse of
    /// the base scales, so the result may extend past the data bounds.
    /// A non-positive or non-finite zoom factor leaves the bounds unchanged.
    pub fn rescale(&self, bounds: &PlotBounds, inner: InnerSize) -> PlotBounds {
        if !(self.k > 0.0 && self.k.is_finite()) {
            return *bounds;
        }

        let x_inverse = inner.x_scale(bounds).inverse();
        let y_inverse = inner.y_scale(bounds).inverse();

        let left = (0.0 - self.tx) / self.k;
        let right = (inner.width - self.tx) / self.k;
        let top = (0.0 - self.ty) / self.k;
        let bottom = (inner.height - self.ty) / self.k;

        PlotBounds {
            x: AxisBounds::new(x_inverse.map(left), x_inverse.map(right)),
            y: AxisBounds::new(y_inverse.map(bottom), y_inverse.map(top)),
        }
    }
}
