//! Daily-views report shaping for the dashboard chart.

use chrono::{Duration, NaiveDate};
use scriptos_core::ChartPoint;

/// Length of the reporting window, in days.
pub const ANALYTICS_WINDOW_DAYS: i64 = 28;

/// `(start, end)` dates of the report window ending on `today`.
#[must_use]
pub fn analytics_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(ANALYTICS_WINDOW_DAYS), today)
}

fn row_views(row: &[serde_json::Value]) -> f64 {
    row.get(1).and_then(serde_json::Value::as_f64).unwrap_or(0.0)
}

/// Converts `[date, views]` rows into chart points labelled by day of month.
/// Rows with no date are skipped.
#[must_use]
pub fn chart_points(rows: &[Vec<serde_json::Value>]) -> Vec<ChartPoint> {
    rows.iter()
        .filter_map(|row| {
            let date = row.first()?.as_str()?;
            let day = date.rsplit('-').next().unwrap_or(date);
            Some(ChartPoint {
                name: day.to_string(),
                val: row_views(row),
            })
        })
        .collect()
}

/// Percent change from the first half of the rows to the second half.
///
/// The midpoint is `len / 2` (the odd row falls in the second half). `None`
/// when there are no rows or the first half has zero views.
#[must_use]
pub fn growth_rate(rows: &[Vec<serde_json::Value>]) -> Option<i64> {
    if rows.is_empty() {
        return None;
    }
    let (first, second) = rows.split_at(rows.len() / 2);
    let first: f64 = first.iter().map(|r| row_views(r)).sum();
    let second: f64 = second.iter().map(|r| row_views(r)).sum();
    if first <= 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let pct = ((second - first) / first * 100.0).round() as i64;
    Some(pct)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows(views: &[u64]) -> Vec<Vec<serde_json::Value>> {
        views
            .iter()
            .enumerate()
            .map(|(i, v)| vec![json!(format!("2026-09-{:02}", i + 1)), json!(v)])
            .collect()
    }

    #[test]
    fn window_spans_twenty_eight_days() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");
        let (start, end) = analytics_window(today);
        assert_eq!(end, today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 9, 20).expect("date"));
    }

    #[test]
    fn chart_points_use_day_of_month() {
        let points = chart_points(&rows(&[10, 20]));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "01");
        assert!((points[1].val - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn chart_points_skip_dateless_rows() {
        let raw = vec![vec![json!(5)], vec![json!("2026-09-03"), json!(7)]];
        let points = chart_points(&raw);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "03");
    }

    #[test]
    fn growth_compares_halves() {
        assert_eq!(growth_rate(&rows(&[100, 100, 150, 150])), Some(50));
        assert_eq!(growth_rate(&rows(&[200, 200, 100, 100])), Some(-50));
    }

    #[test]
    fn odd_row_counts_put_extra_row_in_second_half() {
        // first = [100], second = [50, 100]
        assert_eq!(growth_rate(&rows(&[100, 50, 100])), Some(50));
    }

    #[test]
    fn growth_is_none_without_baseline() {
        assert_eq!(growth_rate(&[]), None);
        assert_eq!(growth_rate(&rows(&[0, 0, 10, 10])), None);
        assert_eq!(growth_rate(&rows(&[42])), None);
    }
}
