//! Axis ticks
//!
//! Gridlines and tick labels use the same values, so both come from
//! [`generate_ticks`].

use crate::model::AxisBounds;

/// Number of ticks per axis when not configured
pub const DEFAULT_TICK_COUNT: usize = 5;

/// `count` evenly spaced values from `bounds.min` to exactly `bounds.max`.
///
/// One tick yields `[min]`; zero ticks yield nothing.
pub fn generate_ticks(bounds: AxisBounds, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![bounds.min],
        _ => {
            let intervals = (count - 1) as f64;
            let span = bounds.max - bounds.min;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        bounds.max
                    } else if span.is_finite() {
                        bounds.min + span / intervals * i as f64
                    } else {
                        let t = i as f64 / intervals;
                        bounds.min * (1.0 - t) + bounds.max * t
                    }
                })
                .collect()
        }
    }
}

/// Format a tick value with two significant digits of the tick step
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (1.0 - step.log10().floor()).clamp(0.0, 10.0) as usize
    } else {
        0
    };

    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
