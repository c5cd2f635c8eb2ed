use crate::data::model::CellValue;
use crate::pipeline::{Statistic, StatsSummary};

/// Decimal places used when nothing else is configured.
pub const DEFAULT_PRECISION: usize = 2;

/// Text shown in the stats panel when no rows survive the filters.
pub const NO_DATA: &str = "No data available";

/// Render `x` with exactly `precision` decimal places.
///
/// `format_number(3.14159, 2) == "3.14"`, `format_number(5.0, 2) == "5.00"`.
/// NaN renders as `nan` and infinities as `inf` / `-inf`.
pub fn format_number(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{x:.precision$}")
}

/// Like [`format_number`], with `None` (an undefined statistic) shown as `nan`.
pub fn format_stat(x: Option<f64>, precision: usize) -> String {
    format_number(x.unwrap_or(f64::NAN), precision)
}

/// Secondary column reported under the value column when present.
pub const SCORE_COLUMN: &str = "score";

/// Panel label for a column: its name with the first letter upper-cased.
pub fn column_label(column: &str) -> String {
    let mut chars = column.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lines of the stats side panel.
///
/// The summary itself covers every numeric column; the panel reports
/// `value_column` (mean, median, std) and `score` (mean, median).
pub fn stats_lines(
    summary: Option<&StatsSummary>,
    value_column: &str,
    precision: usize,
) -> Vec<String> {
    let Some(summary) = summary else {
        return vec![NO_DATA.to_string()];
    };

    let mut lines = vec![format!("Total records: {}", summary.count)];

    let mut panels: Vec<(&str, &[Statistic])> = vec![(
        value_column,
        &[Statistic::Mean, Statistic::Median, Statistic::Std],
    )];
    if value_column != SCORE_COLUMN {
        panels.push((SCORE_COLUMN, &[Statistic::Mean, Statistic::Median]));
    }
    for (column, stats) in panels {
        if !summary.has_column(column) {
            continue;
        }
        let label = column_label(column);
        for &stat in stats {
            lines.push(format!(
                "{label} {stat}: {}",
                format_stat(summary.get(stat, column), precision)
            ));
        }
    }
    lines
}

/// Text of one table cell. Numbers in the value column get fixed precision;
/// everything else uses its default display. Nulls are blank.
pub fn cell_text(cell: &CellValue, is_value_column: bool, precision: usize) -> String {
    match cell {
        CellValue::Null => String::new(),
        _ if is_value_column => match cell.as_f64() {
            Some(v) => format_number(v, precision),
            None => cell.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_format_number() {
        assert_eq!(format_number(3.14159, 2), "3.14");
        assert_eq!(format_number(5.0, 2), "5.00");
        assert_eq!(format_number(-1.005, 1), "-1.0");
        assert_eq!(format_number(1.2910, 4), "1.2910");
        assert_eq!(format_number(f64::NAN, 2), "nan");
        assert_eq!(format_number(f64::NEG_INFINITY, 2), "-inf");
        assert_eq!(format_stat(None, 2), "nan");
    }

    fn summary(columns: &[&str], std: Option<f64>) -> StatsSummary {
        let stat = |v: Option<f64>| -> BTreeMap<String, Option<f64>> {
            columns.iter().map(|c| (c.to_string(), v)).collect()
        };
        StatsSummary {
            count: 3,
            mean: stat(Some(10.0)),
            median: stat(Some(9.5)),
            std: stat(std),
        }
    }

    #[test]
    fn test_stats_lines_no_data() {
        assert_eq!(stats_lines(None, "value", 2), vec![NO_DATA.to_string()]);
    }

    #[test]
    fn test_stats_lines_value_and_score() {
        let s = summary(&["id", "score", "value"], Some(1.0 / 3.0));
        assert_eq!(
            stats_lines(Some(&s), "value", 2),
            vec![
                "Total records: 3",
                "Value mean: 10.00",
                "Value median: 9.50",
                "Value std: 0.33",
                "Score mean: 10.00",
                "Score median: 9.50",
            ]
        );
    }

    #[test]
    fn test_stats_lines_skip_missing_columns_and_show_undefined() {
        let s = summary(&["value"], None);
        assert_eq!(
            stats_lines(Some(&s), "value", 1),
            vec![
                "Total records: 3",
                "Value mean: 10.0",
                "Value median: 9.5",
                "Value std: nan",
            ]
        );
    }

    #[test]
    fn test_stats_lines_follow_value_column() {
        let s = summary(&["reading", "score", "value"], Some(2.0));
        let lines = stats_lines(Some(&s), "reading", 2);
        assert_eq!(lines[1], "Reading mean: 10.00");
        assert_eq!(lines[3], "Reading std: 2.00");
        assert_eq!(lines[4], "Score mean: 10.00");
        assert!(!lines.iter().any(|l| l.starts_with("Value")));

        // Score as the value column is reported once, with std.
        let lines = stats_lines(Some(&s), "score", 2);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "Score std: 2.00");
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label("value"), "Value");
        assert_eq!(column_label("reading"), "Reading");
        assert_eq!(column_label(""), "");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&CellValue::Float(101.256), true, 2), "101.26");
        assert_eq!(cell_text(&CellValue::Integer(7), true, 2), "7.00");
        assert_eq!(cell_text(&CellValue::Float(1.5), false, 2), "1.5000");
        assert_eq!(cell_text(&CellValue::String("A".into()), true, 2), "A");
        assert_eq!(cell_text(&CellValue::Null, true, 2), "");
    }
}
