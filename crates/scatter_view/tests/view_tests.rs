//! Scatter view tests against loaded record sources

use proptest::prelude::*;
use scatter::{PlotState, Viewport};
use scatter_data::{CsvParser, DataRecord};
use scatter_view::{ScatterView, ViewSettings};

const TASKS: &str = "\
name,path,effort,value,status
Write docs,tasks/docs.md,2,8,todo
Refactor,tasks/refactor.md,bad,5,doing
Ship,tasks/ship.md,5,,done
Review,tasks/review.md,3,6,todo
Plan,tasks/plan.md,1,9,doing
";

fn records() -> Vec<DataRecord> {
    CsvParser::new().parse_string(TASKS, "tasks").unwrap().records
}

fn settings() -> ViewSettings {
    ViewSettings::default()
        .with_axes("property.effort", "property.value")
        .with_color_field("note.status")
}

#[test]
fn test_csv_records_in_view() {
    let view = ScatterView::with_records(settings(), records());
    let layout = view.layout();

    assert!(layout.state.is_ready());
    assert_eq!(layout.points.len(), 3);
    assert_eq!(layout.skipped_count, 2);
    assert_eq!(layout.categories, vec!["todo", "doing"]);

    let reasons: Vec<_> = layout.skip_reasons.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(reasons, vec!["Refactor", "Ship"]);
}

#[test]
fn test_hover_returns_record_path() {
    let view = ScatterView::with_records(settings(), records());
    let layout = view.layout();

    for rendered in &layout.points {
        let key = view.point_at(
            rendered.screen_x + layout.margins.left,
            rendered.screen_y + layout.margins.top,
        );
        assert_eq!(key, Some(rendered.point.record.key.as_str()));
    }
    assert!(layout.point_for_key("tasks/docs.md").is_some());
}

#[test]
fn test_missing_field_for_every_record() {
    let settings = settings().with_axes("property.effort", "property.priority");
    let view = ScatterView::with_records(settings, records());

    assert_eq!(view.layout().state, PlotState::AllSkipped { skipped: 5 });
    assert!(view.summary().contains("5 records skipped"));
}

proptest! {
    #[test]
    fn prop_points_stay_inside_any_viewport(width in 80.0f64..2000.0, height in 70.0f64..2000.0) {
        let mut view = ScatterView::with_records(settings(), records());
        view.resize(Viewport::new(width, height));
        let inner = view.layout().inner;

        for p in &view.layout().points {
            prop_assert!(p.screen_x >= 0.0 && p.screen_x <= inner.width);
            prop_assert!(p.screen_y >= 0.0 && p.screen_y <= inner.height);
        }
    }
}
