use std::collections::BTreeMap;
use std::fmt;

use crate::data::model::Dataset;

use super::filter::FilteredResult;

/// The descriptive statistics reported per numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Count,
    Mean,
    Median,
    Std,
}

impl Statistic {
    pub fn name(self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Std => "std",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-column statistic; `None` marks an undefined value (no data, or fewer
/// than two values for `std`).
pub type ColumnStat = BTreeMap<String, Option<f64>>;

/// Aggregates over the numeric columns of a [`FilteredResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    /// Number of filtered rows.
    pub count: usize,
    pub mean: ColumnStat,
    pub median: ColumnStat,
    /// Sample standard deviation (n - 1 denominator).
    pub std: ColumnStat,
}

impl StatsSummary {
    /// Summarise every numeric column of `dataset` over the filtered rows.
    ///
    /// Returns `None` when no rows survived the filters.
    pub fn compute(dataset: &Dataset, filtered: &FilteredResult) -> Option<Self> {
        if filtered.is_empty() {
            return None;
        }

        let mut summary = StatsSummary {
            count: filtered.len(),
            mean: ColumnStat::new(),
            median: ColumnStat::new(),
            std: ColumnStat::new(),
        };
        for column in dataset.numeric_columns() {
            let values = filtered.column_values(dataset, column);
            summary.mean.insert(column.clone(), mean(&values));
            summary.median.insert(column.clone(), median(&values));
            summary.std.insert(column.clone(), sample_std(&values));
        }
        Some(summary)
    }

    /// Whether `column` was summarised.
    pub fn has_column(&self, column: &str) -> bool {
        self.mean.contains_key(column)
    }

    /// Look up one statistic for one column.
    ///
    /// `Count` is the same for every column. Unknown columns and undefined
    /// values both yield `None`.
    pub fn get(&self, stat: Statistic, column: &str) -> Option<f64> {
        let table = match stat {
            Statistic::Count => return Some(self.count as f64),
            Statistic::Mean => &self.mean,
            Statistic::Median => &self.median,
            Statistic::Std => &self.std,
        };
        table.get(column).copied().flatten()
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Midpoint of the sorted values, averaging the two middle ones for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    Some(if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    })
}

/// Sample standard deviation; undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-4)
    }

    #[test]
    fn test_closed_form_values() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!(close(mean(&v), 2.5));
        assert!(close(median(&v), 2.5));
        assert!(close(sample_std(&v), 1.2910));
    }

    #[test]
    fn test_median_odd_and_unsorted() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0]), Some(2.5));
    }

    #[test]
    fn test_undefined_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[7.0]), None);
        assert_eq!(sample_std(&[7.0, 7.0]), Some(0.0));
    }

    fn table() -> Dataset {
        let rows = [(1, Some(10.0)), (2, None), (3, Some(20.0)), (4, Some(60.0))]
            .into_iter()
            .map(|(id, value)| {
                let mut r = Record::new();
                r.insert("id".into(), CellValue::Integer(id));
                r.insert("label".into(), CellValue::String(format!("r{id}")));
                r.insert(
                    "value".into(),
                    value.map(CellValue::Float).unwrap_or(CellValue::Null),
                );
                r
            })
            .collect();
        Dataset::from_rows(vec!["id".into(), "label".into(), "value".into()], rows)
    }

    #[test]
    fn test_summary_covers_every_numeric_column() {
        let ds = table();
        let filtered = FilteredResult::new(vec![0, 1, 2, 3]);
        let s = StatsSummary::compute(&ds, &filtered).unwrap();

        assert_eq!(s.count, 4);
        assert!(s.has_column("id"));
        assert!(s.has_column("value"));
        assert!(!s.has_column("label"));
        assert!(close(s.get(Statistic::Mean, "id"), 2.5));
        // Nulls are skipped: value stats are over [10, 20, 60].
        assert!(close(s.get(Statistic::Mean, "value"), 30.0));
        assert!(close(s.get(Statistic::Median, "value"), 20.0));
        assert_eq!(s.get(Statistic::Count, "anything"), Some(4.0));
    }

    #[test]
    fn test_single_row_has_undefined_std() {
        let ds = table();
        let s = StatsSummary::compute(&ds, &FilteredResult::new(vec![2])).unwrap();
        assert_eq!(s.count, 1);
        assert!(close(s.get(Statistic::Mean, "value"), 20.0));
        assert_eq!(s.std.get("value"), Some(&None));
    }

    #[test]
    fn test_all_null_column_is_undefined() {
        let ds = table();
        let s = StatsSummary::compute(&ds, &FilteredResult::new(vec![1])).unwrap();
        assert_eq!(s.mean.get("value"), Some(&None));
        assert_eq!(s.get(Statistic::Median, "value"), None);
    }

    #[test]
    fn test_empty_result_has_no_summary() {
        let ds = table();
        assert!(StatsSummary::compute(&ds, &FilteredResult::default()).is_none());
    }

    #[test]
    fn test_statistic_names() {
        let names: Vec<_> = [Statistic::Count, Statistic::Mean, Statistic::Median, Statistic::Std]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["count", "mean", "median", "std"]);
    }
}
