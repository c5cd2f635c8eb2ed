//! Filter/aggregate pipeline.
//!
//! ```text
//!   Dataset ──► head(row_limit) ──► by_category ──► by_range(min, max)
//!                                                        │
//!                                      ┌─────────────────┼──────────────────┐
//!                                      ▼                 ▼                  ▼
//!                               FilteredResult     StatsSummary     histogram values
//! ```
//!
//! [`Pipeline::compute`] is a pure function of the dataset and the
//! [`FilterParams`]; calling it twice with the same inputs gives equal results.

pub mod filter;
pub mod histogram;
pub mod stats;

pub use filter::{ALL_CATEGORIES, CategoryFilter, FilterParams, FilteredResult};
pub use histogram::{DEFAULT_BINS, Histogram};
pub use stats::{Statistic, StatsSummary};

use crate::data::model::Dataset;

/// Everything the presentation layer needs from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    pub filtered: FilteredResult,
    /// `None` when no rows survived ("no data").
    pub stats: Option<StatsSummary>,
    /// The value column of the filtered rows, for the histogram.
    pub histogram_values: Vec<f64>,
}

impl PipelineResult {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Names the two columns the filters act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    category_column: String,
    value_column: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new("category", "value")
    }
}

impl Pipeline {
    pub fn new(category_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            category_column: category_column.into(),
            value_column: value_column.into(),
        }
    }

    pub fn category_column(&self) -> &str {
        &self.category_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Run the three filter stages in order, then summarise.
    pub fn compute(&self, dataset: &Dataset, params: &FilterParams) -> PipelineResult {
        let limited = filter::head(dataset, params.row_limit);
        let in_category =
            filter::by_category(dataset, &limited, &self.category_column, &params.category);
        let in_range = filter::by_range(
            dataset,
            &in_category,
            &self.value_column,
            params.min_value,
            params.max_value,
        );

        let filtered = FilteredResult::new(in_range);
        let stats = StatsSummary::compute(dataset, &filtered);
        let histogram_values = filtered.column_values(dataset, &self.value_column);

        log::debug!(
            "pipeline: {params:?} -> {} / {} / {} rows",
            limited.len(),
            in_category.len(),
            filtered.len()
        );

        PipelineResult {
            filtered,
            stats,
            histogram_values,
        }
    }
}

/// [`Pipeline::compute`] with the default `category` / `value` columns.
pub fn compute(dataset: &Dataset, params: &FilterParams) -> PipelineResult {
    Pipeline::default().compute(dataset, params)
}
