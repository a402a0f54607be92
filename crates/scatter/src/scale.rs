//! Linear scales
//!
//! A linear scale maps a numeric domain onto a numeric range. Values
//! outside the domain extrapolate rather than clamp, which zoom and pan
//! depend on.

use serde::{Deserialize, Serialize};

/// Affine mapping from a domain interval to a range interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into the range.
    ///
    /// A zero-width domain maps every input to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;

        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }

        let domain_span = d1 - d0;
        let t = if domain_span.is_finite() {
            (value - d0) / domain_span
        } else {
            (value / 2.0 - d0 / 2.0) / (d1 / 2.0 - d0 / 2.0)
        };

        let range_span = r1 - r0;
        if range_span.is_finite() {
            r0 + t * range_span
        } else {
            r0 * (1.0 - t) + r1 * t
        }
    }

    /// The scale mapping range values back into the domain
    pub fn inverse(&self) -> LinearScale {
        LinearScale::new(self.range, self.domain)
    }

    /// Map a range value back into the domain
    pub fn invert(&self, value: f64) -> f64 {
        self.inverse().map(value)
    }
}

/// Build a mapping from `[d0, d1]` onto `[r0, r1]`
pub fn create_linear_scale(d0: f64, d1: f64, r0: f64, r1: f64) -> impl Fn(f64) -> f64 {
    let scale = LinearScale::new((d0, d1), (r0, r1));
    move |value| scale.map(value)
}

/// Build the mapping from `[r0, r1]` back onto `[d0, d1]`
pub fn create_inverse_linear_scale(d0: f64, d1: f64, r0: f64, r1: f64) -> impl Fn(f64) -> f64 {
    let scale = LinearScale::new((d0, d1), (r0, r1)).inverse();
    move |value| scale.map(value)
}
