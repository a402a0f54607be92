//! Interactive scatter view state
//!
//! [`ScatterView`] owns everything one plot needs between frames: the
//! records, the settings, the current size and zoom, and the last layout.
//! Every change triggers a full recompute that replaces the previous
//! layout wholesale.

use scatter::{
    calculate_plot_bounds, hit_test, process_records, Record, ScatterLayout, Viewport,
    ZoomTransform, DEFAULT_HIT_RADIUS,
};

use crate::settings::ViewSettings;

/// A scatter plot's records, settings, and current layout
pub struct ScatterView<R> {
    records: Vec<R>,
    settings: ViewSettings,
    viewport: Viewport,
    zoom: ZoomTransform,
    layout: ScatterLayout,
}

impl<R: Record> ScatterView<R> {
    /// Create a view with no records yet
    pub fn new(settings: ViewSettings) -> Self {
        Self::with_records(settings, Vec::new())
    }

    /// Create a view over a record set
    pub fn with_records(settings: ViewSettings, records: Vec<R>) -> Self {
        let viewport = settings.viewport;
        let layout = settings.calculator().calculate(&records, &settings.plot_config(), viewport);
        Self {
            records,
            settings,
            viewport,
            zoom: ZoomTransform::identity(),
            layout,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom_transform(&self) -> ZoomTransform {
        self.zoom
    }

    /// The layout from the last recompute
    pub fn layout(&self) -> &ScatterLayout {
        &self.layout
    }

    /// Replace the record set, keeping the current zoom
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.recompute();
    }

    /// Replace the settings. The zoom is reset since the axes may have changed.
    pub fn set_settings(&mut self, settings: ViewSettings) {
        self.settings = settings;
        self.zoom = ZoomTransform::identity();
        self.recompute();
    }

    /// Apply a new container size
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.recompute();
    }

    /// Apply a zoom/pan transform relative to the fitted bounds
    pub fn zoom(&mut self, transform: ZoomTransform) {
        self.zoom = transform;
        self.recompute();
    }

    /// Return to the fitted bounds
    pub fn reset_zoom(&mut self) {
        self.zoom(ZoomTransform::identity());
    }

    /// Key of the record drawn under a position in viewport pixels
    pub fn point_at(&self, x: f64, y: f64) -> Option<&str> {
        let inner_x = x - self.layout.margins.left;
        let inner_y = y - self.layout.margins.top;
        let inner = self.layout.inner;
        if !(0.0..=inner.width).contains(&inner_x) || !(0.0..=inner.height).contains(&inner_y) {
            return None;
        }

        hit_test(&self.layout.points, inner_x, inner_y, DEFAULT_HIT_RADIUS)
            .map(|point| point.point.record.key.as_str())
    }

    /// One-line description of what is on screen
    pub fn summary(&self) -> String {
        match self.layout.state.message() {
            Some(message) => message,
            None => format!(
                "{} of {} records plotted, {} skipped, {} categories",
                self.layout.points.len(),
                self.records.len(),
                self.layout.skipped_count,
                self.layout.categories.len()
            ),
        }
    }

    fn recompute(&mut self) {
        let calculator = self.settings.calculator();
        let config = self.settings.plot_config();

        self.layout = if config.is_complete() && !self.zoom.is_identity() {
            let batch = process_records(&self.records, &config);
            let inner = self.viewport.inner_size(&calculator.margins);
            let visible = calculate_plot_bounds(&batch.points, calculator.padding)
                .map(|fitted| self.zoom.rescale(&fitted, inner));
            calculator.layout_batch(batch, self.viewport, visible)
        } else {
            calculator.calculate(&self.records, &config, self.viewport)
        };

        tracing::debug!(
            records = self.records.len(),
            points = self.layout.points.len(),
            zoom = self.zoom.k,
            "scatter view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use scatter::{AxisBounds, FieldId, FieldResult, MemoryRecord, PlotState, Value};

    fn settings() -> ViewSettings {
        ViewSettings::default()
            .with_axes("property.x", "property.y")
            .with_color_field("property.group")
            .with_viewport(Viewport::new(270.0, 160.0))
    }

    fn records() -> Vec<MemoryRecord> {
        vec![
            MemoryRecord::new("a").with_key("a.md").with("x", 0).with("y", 0).with("group", "g1"),
            MemoryRecord::new("b").with_key("b.md").with("x", 10).with("y", 10).with("group", "g2"),
            MemoryRecord::new("c").with_key("c.md").with("x", "?").with("y", 3),
        ]
    }

    #[test]
    fn test_initial_layout() {
        let view = ScatterView::with_records(settings(), records());
        let layout = view.layout();

        assert!(layout.state.is_ready());
        assert_eq!(layout.points.len(), 2);
        assert_eq!(layout.skipped_count, 1);
        assert_eq!(layout.inner.width, 200.0);
        assert_eq!(layout.inner.height, 100.0);
        assert_eq!(
            view.summary(),
            "2 of 3 records plotted, 1 skipped, 2 categories"
        );
    }

    #[test]
    fn test_unconfigured_view() {
        let view: ScatterView<MemoryRecord> = ScatterView::new(ViewSettings::default());
        assert_eq!(view.layout().state, PlotState::Unconfigured);
        assert!(view.summary().contains("X and Y"));
    }

    #[test]
    fn test_set_records_replaces_layout() {
        let mut view = ScatterView::with_records(settings(), records());
        view.set_records(Vec::new());

        assert_eq!(view.layout().state, PlotState::NoRecords);
        assert!(view.layout().points.is_empty());
        assert!(view.layout().categories.is_empty());
    }

    #[test]
    fn test_resize_recomputes() {
        let mut view = ScatterView::with_records(settings(), records());
        view.resize(Viewport::new(470.0, 260.0));

        assert_eq!(view.layout().inner.width, 400.0);
        let b = view.layout().point_for_key("b.md").unwrap();
        assert!(b.screen_x > 380.0 && b.screen_x < 400.0);
    }

    #[test]
    fn test_point_at_uses_viewport_coordinates() {
        let view = ScatterView::with_records(settings(), records());
        let a = view.layout().point_for_key("a.md").unwrap();
        let margins = view.layout().margins;

        let hit = view.point_at(a.screen_x + margins.left + 1.0, a.screen_y + margins.top);
        assert_eq!(hit, Some("a.md"));
        assert_eq!(view.point_at(0.0, 0.0), None);
    }

    #[test]
    fn test_zoom_and_reset() {
        let mut view = ScatterView::with_records(settings(), records());
        let fitted = view.layout().bounds.unwrap();

        view.zoom(ZoomTransform::identity().zoomed_at(2.0, 100.0, 50.0));
        let zoomed = view.layout().bounds.unwrap();
        assert!((zoomed.x.span() - fitted.x.span() / 2.0).abs() < 1e-9);
        assert!((zoomed.y.span() - fitted.y.span() / 2.0).abs() < 1e-9);

        view.reset_zoom();
        assert_eq!(view.layout().bounds.unwrap(), fitted);
    }

    /// Counts field lookups across clones
    struct CountingRecord {
        inner: MemoryRecord,
        reads: Rc<Cell<usize>>,
    }

    impl Record for CountingRecord {
        fn field(&self, field: &FieldId) -> FieldResult<Option<Value>> {
            self.reads.set(self.reads.get() + 1);
            self.inner.field(field)
        }

        fn short_name(&self) -> &str {
            self.inner.short_name()
        }

        fn key(&self) -> &str {
            self.inner.key()
        }
    }

    #[test]
    fn test_zoomed_recompute_reads_records_once() {
        let reads = Rc::new(Cell::new(0));
        let counted = |records: Vec<MemoryRecord>| -> Vec<CountingRecord> {
            records
                .into_iter()
                .map(|inner| CountingRecord { inner, reads: reads.clone() })
                .collect()
        };

        let mut view = ScatterView::with_records(settings(), counted(records()));
        let per_pass = reads.get();
        assert!(per_pass > 0);

        reads.set(0);
        view.zoom(ZoomTransform::new(2.0, -50.0, -25.0));
        assert_eq!(reads.get(), per_pass);
        assert!(view.layout().state.is_ready());

        reads.set(0);
        view.set_records(counted(records()));
        assert_eq!(reads.get(), per_pass);
        assert!(!view.zoom_transform().is_identity());
    }

    #[test]
    fn test_settings_change_resets_zoom() {
        let mut view = ScatterView::with_records(settings(), records());
        view.zoom(ZoomTransform::new(4.0, 0.0, 0.0));

        view.set_settings(settings().with_axes("property.y", "property.x"));
        assert!(view.zoom_transform().is_identity());

        // "c" still fails its numeric check on the swapped axis
        let x: AxisBounds = view.layout().bounds.unwrap().x;
        assert!((x.min + 0.5).abs() < 1e-9);
        assert!((x.max - 10.5).abs() < 1e-9);
        assert_eq!(view.layout().skipped_count, 1);
    }
}
