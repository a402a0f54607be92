//! Scatter layout calculation
//!
//! This module runs the whole pipeline for one update cycle: records are
//! turned into points, bounded, colored, mapped to the screen, and given
//! axis ticks. Each call builds a fresh [`ScatterLayout`]; nothing carries
//! over between calls.

use serde::{Deserialize, Serialize};

use crate::bounds::{calculate_plot_bounds, DEFAULT_PADDING};
use crate::colors::{create_category_color_map, ColorMap, Palette};
use crate::model::*;
use crate::points::process_records;
use crate::record::{PlotConfig, Record};
use crate::scale::LinearScale;
use crate::screen::{transform_points_to_screen, InnerSize, Margins, Viewport};
use crate::ticks::{format_tick, generate_ticks, DEFAULT_TICK_COUNT};

/// Number of skip reasons kept for display when not configured
pub const DEFAULT_MAX_REPORTED_SKIPS: usize = 5;

/// Whether there is anything to draw, and if not, why
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotState {
    /// X or Y field is not set; no record was read
    Unconfigured,
    /// The record source was empty
    NoRecords,
    /// Every record was skipped
    AllSkipped { skipped: usize },
    /// At least one point is plotted
    Ready,
}

impl PlotState {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlotState::Ready)
    }

    /// Empty-state text for the user, `None` when there is a plot to show
    pub fn message(&self) -> Option<String> {
        match self {
            PlotState::Unconfigured => {
                Some("Select properties for the X and Y axes to plot".to_string())
            }
            PlotState::NoRecords => Some("No records match the current view".to_string()),
            PlotState::AllSkipped { skipped } => Some(format!(
                "No plottable records: {} record{} skipped for missing or non-numeric data",
                skipped,
                if *skipped == 1 { "" } else { "s" }
            )),
            PlotState::Ready => None,
        }
    }
}

/// One axis tick: data value, pixel position along the axis, and label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLayout {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayout {
    pub state: PlotState,
    pub viewport: Viewport,
    pub margins: Margins,
    /// Size of the plot area inside the margins
    pub inner: InnerSize,
    pub points: Vec<RenderedPoint>,
    pub skipped_count: usize,
    /// The first few skipped records, for diagnostics
    pub skip_reasons: Vec<SkippedRecord>,
    pub categories: Vec<String>,
    pub color_map: ColorMap,
    pub bounds: Option<PlotBounds>,
    /// Ticks along the bottom axis, positions in pixels from the left
    pub x_ticks: Vec<TickLayout>,
    /// Ticks along the left axis, positions in pixels from the top
    pub y_ticks: Vec<TickLayout>,
}

impl ScatterLayout {
    fn empty(state: PlotState, viewport: Viewport, margins: Margins, palette: &Palette) -> Self {
        Self {
            state,
            viewport,
            margins,
            inner: viewport.inner_size(&margins),
            points: Vec::new(),
            skipped_count: 0,
            skip_reasons: Vec::new(),
            categories: Vec::new(),
            color_map: create_category_color_map(&[], palette),
            bounds: None,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
        }
    }

    /// Find a rendered point by its source record key
    pub fn point_for_key(&self, key: &str) -> Option<&RenderedPoint> {
        self.points.iter().find(|p| p.point.record.key == key)
    }
}

/// Layout calculator for scatter plots
#[derive(Debug, Clone)]
pub struct ScatterLayoutCalculator {
    /// Fraction of the data range added on each side of an axis
    pub padding: f64,
    /// Ticks per axis
    pub tick_count: usize,
    /// Space around the plot area
    pub margins: Margins,
    /// Category colors
    pub palette: Palette,
    /// How many skipped records to keep for display
    pub max_reported_skips: usize,
}

impl Default for ScatterLayoutCalculator {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            tick_count: DEFAULT_TICK_COUNT,
            margins: Margins::default(),
            palette: Palette::default(),
            max_reported_skips: DEFAULT_MAX_REPORTED_SKIPS,
        }
    }
}

impl ScatterLayoutCalculator {
    /// Create a new layout calculator
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn with_max_reported_skips(mut self, max: usize) -> Self {
        self.max_reported_skips = max;
        self
    }

    /// Calculate the complete layout, with bounds fitted to the data
    pub fn calculate<R: Record>(
        &self,
        records: &[R],
        config: &PlotConfig,
        viewport: Viewport,
    ) -> ScatterLayout {
        self.calculate_with_bounds(records, config, viewport, None)
    }

    /// Calculate the layout against fixed bounds, e.g. after a zoom.
    ///
    /// Falls back to fitted bounds when `bounds` is `None`.
    pub fn calculate_with_bounds<R: Record>(
        &self,
        records: &[R],
        config: &PlotConfig,
        viewport: Viewport,
        bounds: Option<PlotBounds>,
    ) -> ScatterLayout {
        if !config.is_complete() {
            tracing::debug!("axis fields not configured, skipping layout");
            return ScatterLayout::empty(PlotState::Unconfigured, viewport, self.margins, &self.palette);
        }

        self.layout_batch(process_records(records, config), viewport, bounds)
    }

    /// Lay out an already processed batch
    ///
    /// For callers that need the batch's fitted bounds before choosing the
    /// bounds to draw with, so the records are only read once.
    pub fn layout_batch(
        &self,
        batch: BatchResult,
        viewport: Viewport,
        bounds: Option<PlotBounds>,
    ) -> ScatterLayout {
        let mut layout = ScatterLayout::empty(PlotState::Ready, viewport, self.margins, &self.palette);
        layout.skipped_count = batch.skipped.len();
        layout.skip_reasons = batch
            .skipped
            .iter()
            .take(self.max_reported_skips)
            .cloned()
            .collect();

        let bounds = match bounds.or_else(|| calculate_plot_bounds(&batch.points, self.padding)) {
            Some(bounds) if !batch.points.is_empty() => bounds,
            _ => {
                layout.state = if batch.skipped.is_empty() {
                    PlotState::NoRecords
                } else {
                    PlotState::AllSkipped {
                        skipped: batch.skipped.len(),
                    }
                };
                return layout;
            }
        };

        layout.color_map = create_category_color_map(&batch.categories, &self.palette);
        layout.points = transform_points_to_screen(&batch.points, &bounds, layout.inner, &layout.color_map);
        layout.x_ticks = self.axis_ticks(bounds.x, layout.inner.x_scale(&bounds));
        layout.y_ticks = self.axis_ticks(bounds.y, layout.inner.y_scale(&bounds));
        layout.categories = batch.categories;
        layout.bounds = Some(bounds);

        tracing::debug!(
            points = layout.points.len(),
            skipped = layout.skipped_count,
            width = layout.inner.width,
            height = layout.inner.height,
            "scatter layout calculated"
        );

        layout
    }

    fn axis_ticks(&self, bounds: AxisBounds, scale: LinearScale) -> Vec<TickLayout> {
        let values = generate_ticks(bounds, self.tick_count);
        let step = if values.len() > 1 {
            bounds.span() / (values.len() - 1) as f64
        } else {
            bounds.span()
        };

        values
            .into_iter()
            .map(|value| TickLayout {
                value,
                position: scale.map(value),
                label: format_tick(value, step),
            })
            .collect()
    }
}
