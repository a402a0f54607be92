//! Scatter model types
//!
//! This module defines the values that flow through the pipeline:
//! points, skipped records, axis bounds, and rendered points.

use serde::{Deserialize, Serialize};

/// Identity of a source record, usable as a lookup key back into the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Position of the record in the input sequence
    pub index: usize,
    /// Stable host key (for example a file path)
    pub key: String,
}

impl RecordRef {
    pub fn new(index: usize, key: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
        }
    }
}

/// A record that produced two finite coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Color grouping label, absent when no color field is set or the value is missing
    pub category: Option<String>,
    /// Display label taken from the record's short name
    pub label: String,
    pub record: RecordRef,
}

/// A record excluded from the plot, with the reason it was excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub record: RecordRef,
    pub label: String,
    pub reason: String,
}

/// Outcome of building a point from one record
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    Plotted(Point),
    Skipped(SkippedRecord),
}

impl PointOutcome {
    /// Get the point if the record was plotted
    pub fn point(&self) -> Option<&Point> {
        match self {
            PointOutcome::Plotted(point) => Some(point),
            PointOutcome::Skipped(_) => None,
        }
    }

    /// Get the skip reason if the record was skipped
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            PointOutcome::Plotted(_) => None,
            PointOutcome::Skipped(skipped) => Some(&skipped.reason),
        }
    }
}

/// Points and skipped records from one batch, plus the categories seen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub points: Vec<Point>,
    pub skipped: Vec<SkippedRecord>,
    /// Distinct categories in first-seen order
    pub categories: Vec<String>,
}

impl BatchResult {
    /// Total number of records processed
    pub fn record_count(&self) -> usize {
        self.points.len() + self.skipped.len()
    }
}

/// Padded extent of one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the axis in data units
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether a value lies within the bounds (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounds for both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

/// A point with its screen position and resolved color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPoint {
    #[serde(flatten)]
    pub point: Point,
    pub screen_x: f64,
    pub screen_y: f64,
    pub color: String,
}
