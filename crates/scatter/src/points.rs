//! Point building and batch processing
//!
//! Turns host records into plottable points. Records that cannot be
//! plotted are kept as [`SkippedRecord`]s with the first reason found,
//! so that a single bad record never stops the batch.

use std::collections::HashSet;

use crate::extract::{extract_category, extract_number, NumericExtraction};
use crate::model::*;
use crate::record::{PlotConfig, Record};

/// Skip reason when the X field is unset
pub const X_NOT_CONFIGURED: &str = "X axis property is not configured";
/// Skip reason when the Y field is unset
pub const Y_NOT_CONFIGURED: &str = "Y axis property is not configured";

/// Build a point from one record, or explain why it was skipped.
///
/// Checks run in a fixed order and stop at the first failure: X field set,
/// X value readable, Y field set, Y value readable. The category is read
/// last and never causes a skip.
pub fn build_point(record: &impl Record, index: usize, config: &PlotConfig) -> PointOutcome {
    let record_ref = RecordRef::new(index, record.key());
    let label = record.short_name().to_string();

    let skip = |reason: String| {
        PointOutcome::Skipped(SkippedRecord {
            record: record_ref.clone(),
            label: label.clone(),
            reason,
        })
    };

    let Some(x_field) = config.x_field.as_ref() else {
        return skip(X_NOT_CONFIGURED.to_string());
    };
    let x = match extract_number(record, x_field) {
        NumericExtraction::Success(x) => x,
        NumericExtraction::Failure(reason) => return skip(reason),
    };

    let Some(y_field) = config.y_field.as_ref() else {
        return skip(Y_NOT_CONFIGURED.to_string());
    };
    let y = match extract_number(record, y_field) {
        NumericExtraction::Success(y) => y,
        NumericExtraction::Failure(reason) => return skip(reason),
    };

    let category = extract_category(record, config.color_field.as_ref()).into_option();

    PointOutcome::Plotted(Point {
        x,
        y,
        category,
        label,
        record: record_ref,
    })
}

/// Run the point builder over every record, keeping input order.
pub fn process_records<R: Record>(records: &[R], config: &PlotConfig) -> BatchResult {
    let mut points = Vec::new();
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match build_point(record, index, config) {
            PointOutcome::Plotted(point) => points.push(point),
            PointOutcome::Skipped(skip) => {
                tracing::trace!(record = %skip.record.key, reason = %skip.reason, "record skipped");
                skipped.push(skip);
            }
        }
    }

    let categories = extract_categories(&points);

    tracing::debug!(
        records = records.len(),
        points = points.len(),
        skipped = skipped.len(),
        categories = categories.len(),
        "processed records"
    );

    BatchResult {
        points,
        skipped,
        categories,
    }
}

/// Distinct categories in first-seen order, absent categories excluded
pub fn extract_categories(points: &[Point]) -> Vec<String> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter_map(|p| p.category.as_deref())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemoryRecord;

    fn config() -> PlotConfig {
        PlotConfig::new("property.effort", "property.value").with_color("note.status")
    }

    fn point_with_category(category: Option<&str>) -> Point {
        Point {
            x: 0.0,
            y: 0.0,
            category: category.map(str::to_string),
            label: String::new(),
            record: RecordRef::new(0, ""),
        }
    }

    #[test]
    fn test_build_point_success() {
        let record = MemoryRecord::new("Task A")
            .with_key("tasks/a.md")
            .with("effort", 2)
            .with("value", "8")
            .with("status", "todo");

        let outcome = build_point(&record, 3, &config());
        let point = outcome.point().unwrap();

        assert_eq!(point.x, 2.0);
        assert_eq!(point.y, 8.0);
        assert_eq!(point.category.as_deref(), Some("todo"));
        assert_eq!(point.label, "Task A");
        assert_eq!(point.record, RecordRef::new(3, "tasks/a.md"));
    }

    #[test]
    fn test_build_point_missing_category_is_not_a_skip() {
        let record = MemoryRecord::new("a").with("effort", 1).with("value", 1);
        let outcome = build_point(&record, 0, &config());
        assert_eq!(outcome.point().unwrap().category, None);
    }

    #[test]
    fn test_build_point_reports_x_before_y() {
        let record = MemoryRecord::new("a").with("effort", "bad");
        let outcome = build_point(&record, 0, &config());
        assert_eq!(
            outcome.skip_reason(),
            Some("Property \"property.effort\" value \"bad\" is not numeric")
        );
    }

    #[test]
    fn test_build_point_unconfigured_axes() {
        let record = MemoryRecord::new("a").with("effort", 1).with("value", 1);

        let outcome = build_point(&record, 0, &PlotConfig::default());
        assert_eq!(outcome.skip_reason(), Some(X_NOT_CONFIGURED));

        let mut config = PlotConfig::default();
        config.x_field = Some("effort".into());
        let outcome = build_point(&record, 0, &config);
        assert_eq!(outcome.skip_reason(), Some(Y_NOT_CONFIGURED));
    }

    #[test]
    fn test_process_records_partitions_in_order() {
        let records = vec![
            MemoryRecord::new("a").with("effort", 1).with("value", 1),
            MemoryRecord::new("b"),
            MemoryRecord::new("c").with("effort", 3).with("value", 3),
            MemoryRecord::new("d").with("effort", 4),
        ];

        let result = process_records(&records, &config());

        let labels: Vec<_> = result.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
        let skipped: Vec<_> = result.skipped.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(skipped, vec!["b", "d"]);
        assert_eq!(result.skipped[1].record.index, 3);
        assert_eq!(result.record_count(), 4);
    }

    #[test]
    fn test_process_records_is_deterministic() {
        let records = vec![
            MemoryRecord::new("a").with("effort", 1).with("value", 1).with("status", "x"),
            MemoryRecord::new("b").with("effort", "?"),
            MemoryRecord::new("c").with("effort", 2).with("value", 5).with("status", "y"),
        ];

        assert_eq!(process_records(&records, &config()), process_records(&records, &config()));
    }

    #[test]
    fn test_extract_categories_first_seen_order() {
        let points: Vec<_> = [Some("C"), Some("A"), Some("B"), Some("A"), None, Some("C")]
            .into_iter()
            .map(point_with_category)
            .collect();

        assert_eq!(extract_categories(&points), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_extract_categories_empty() {
        assert!(extract_categories(&[]).is_empty());
        assert!(extract_categories(&[point_with_category(None)]).is_empty());
    }
}
