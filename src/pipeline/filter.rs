use std::fmt;

use crate::data::model::{CellValue, Dataset, Record};

/// Label the UI uses for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Category selector: everything, or rows whose category equals one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(label) => f.write_str(label),
        }
    }
}

/// User-controlled inputs for one pipeline run.
///
/// The fields are independent; the pipeline applies them in a fixed order
/// (row limit, then category, then value range).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    /// Keep at most this many leading rows. Larger than the dataset = all rows.
    pub row_limit: usize,
    pub category: CategoryFilter,
    /// Inclusive lower bound on the value column. `None` = unbounded.
    pub min_value: Option<f64>,
    /// Inclusive upper bound on the value column. `None` = unbounded.
    pub max_value: Option<f64>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            row_limit: usize::MAX,
            category: CategoryFilter::All,
            min_value: None,
            max_value: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered result
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] surviving all filter stages, as ascending row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredResult {
    indices: Vec<usize>,
}

impl FilteredResult {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The surviving rows, in original order.
    pub fn rows<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().filter_map(move |&i| dataset.row(i))
    }

    /// Numeric cells of `column` across the surviving rows. Nulls, non-numeric
    /// cells and NaN are skipped.
    pub fn column_values(&self, dataset: &Dataset, column: &str) -> Vec<f64> {
        self.rows(dataset)
            .filter_map(|row| row.get(column).and_then(CellValue::as_f64))
            .filter(|v| !v.is_nan())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Filter stages
// ---------------------------------------------------------------------------
//
// Every stage takes the indices produced by the previous one and returns a
// fresh vector; nothing is filtered in place.

/// Stage 1: the first `row_limit` rows, clamped to the dataset length.
pub fn head(dataset: &Dataset, row_limit: usize) -> Vec<usize> {
    (0..row_limit.min(dataset.len())).collect()
}

/// Stage 2: rows whose `column` cell equals the selected category.
pub fn by_category(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
    category: &CategoryFilter,
) -> Vec<usize> {
    let label = match category {
        CategoryFilter::All => return indices.to_vec(),
        CategoryFilter::Only(label) => label,
    };
    indices
        .iter()
        .copied()
        .filter(|&i| {
            dataset
                .row(i)
                .and_then(|row| row.get(column))
                .is_some_and(|cell| cell.matches_label(label))
        })
        .collect()
}

/// Stage 3: rows whose numeric `column` cell lies in `[min, max]`.
///
/// With no bounds at all this is the identity. With any bound, rows without a
/// numeric value in `column` are dropped.
pub fn by_range(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<usize> {
    if min.is_none() && max.is_none() {
        return indices.to_vec();
    }
    indices
        .iter()
        .copied()
        .filter(|&i| {
            let Some(v) = dataset
                .row(i)
                .and_then(|row| row.get(column))
                .and_then(CellValue::as_f64)
            else {
                return false;
            };
            min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[(&str, Option<f64>)]) -> Dataset {
        let rows = rows
            .iter()
            .map(|(cat, value)| {
                let mut r = Record::new();
                r.insert("category".into(), CellValue::String(cat.to_string()));
                r.insert(
                    "value".into(),
                    value.map(CellValue::Float).unwrap_or(CellValue::Null),
                );
                r
            })
            .collect();
        Dataset::from_rows(vec!["category".into(), "value".into()], rows)
    }

    #[test]
    fn test_category_filter_from_label() {
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("B"), CategoryFilter::Only("B".into()));
        // The sentinel is case-sensitive, like the UI label.
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::Only("all".into()));
        assert_eq!(CategoryFilter::Only("B".into()).to_string(), "B");
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn test_head_clamps() {
        let ds = dataset(&[("A", Some(1.0)), ("B", Some(2.0)), ("A", Some(3.0))]);
        assert_eq!(head(&ds, 2), vec![0, 1]);
        assert_eq!(head(&ds, 0), Vec::<usize>::new());
        assert_eq!(head(&ds, 99), vec![0, 1, 2]);
    }

    #[test]
    fn test_by_category() {
        let ds = dataset(&[("A", Some(1.0)), ("B", Some(2.0)), ("A", Some(3.0))]);
        let all = head(&ds, 3);
        assert_eq!(by_category(&ds, &all, "category", &CategoryFilter::All), all);
        assert_eq!(
            by_category(&ds, &all, "category", &"A".into()),
            vec![0, 2]
        );
        assert!(by_category(&ds, &all, "category", &"Z".into()).is_empty());
        assert!(by_category(&ds, &all, "no_such_column", &"A".into()).is_empty());
    }

    #[test]
    fn test_by_range_inclusive_and_one_sided() {
        let ds = dataset(&[("A", Some(1.0)), ("B", Some(2.0)), ("A", Some(3.0))]);
        let all = head(&ds, 3);
        assert_eq!(by_range(&ds, &all, "value", Some(1.0), Some(2.0)), vec![0, 1]);
        assert_eq!(by_range(&ds, &all, "value", Some(2.0), None), vec![1, 2]);
        assert_eq!(by_range(&ds, &all, "value", None, Some(1.0)), vec![0]);
        assert!(by_range(&ds, &all, "value", Some(50.0), Some(10.0)).is_empty());
    }

    #[test]
    fn test_by_range_drops_nulls_only_when_bounded() {
        let ds = dataset(&[("A", None), ("B", Some(2.0))]);
        let all = head(&ds, 2);
        assert_eq!(by_range(&ds, &all, "value", None, None), vec![0, 1]);
        assert_eq!(by_range(&ds, &all, "value", None, Some(10.0)), vec![1]);
    }

    #[test]
    fn test_filtered_result_column_values_skip_nulls() {
        let ds = dataset(&[("A", None), ("B", Some(2.0)), ("C", Some(f64::NAN))]);
        let result = FilteredResult::new(vec![0, 1, 2]);
        assert_eq!(result.column_values(&ds, "value"), vec![2.0]);
        assert_eq!(result.rows(&ds).count(), 3);
    }
}
