use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::data::source::{DataSource, SampleSource};
use crate::format;
use crate::pipeline::{
    ALL_CATEGORIES, CategoryFilter, FilterParams, Histogram, Pipeline, PipelineResult,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The table, loaded once at startup.
    pub dataset: Dataset,

    /// Where `dataset` came from, for the top bar.
    pub source_label: String,

    pub config: DashboardConfig,

    pub pipeline: Pipeline,

    /// Current filter selections.
    pub params: FilterParams,

    /// Bound editors keep their last number while the bound is switched off.
    pub min_enabled: bool,
    pub min_draft: f64,
    pub max_enabled: bool,
    pub max_draft: f64,

    /// Choices of the category selector: "All" followed by every category.
    pub categories: Vec<String>,

    /// Result for `params` (cached).
    pub result: PipelineResult,

    /// Parameters `result` was computed for.
    computed_for: Option<FilterParams>,

    /// Derived presentation outputs of `result`.
    pub histogram: Option<Histogram>,
    pub stats_lines: Vec<String>,

    /// Colours of the categories.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state around an already-loaded dataset.
    pub fn new(dataset: Dataset, source_label: String, config: DashboardConfig) -> Self {
        let pipeline = config.pipeline();
        let distinct = dataset.distinct_values(pipeline.category_column());

        let categories = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(distinct.iter().map(|v| v.to_string()))
            .collect();
        let color_map = (!distinct.is_empty())
            .then(|| ColorMap::new(pipeline.category_column(), &distinct));

        if !dataset.is_numeric_column(pipeline.value_column()) {
            log::warn!(
                "Value column {:?} is missing or not numeric; min/max filters will drop every row",
                pipeline.value_column()
            );
        }

        let mut state = Self {
            dataset,
            source_label,
            params: config.initial_params(),
            min_enabled: false,
            min_draft: 0.0,
            max_enabled: false,
            max_draft: 0.0,
            pipeline,
            config,
            categories,
            result: PipelineResult::default(),
            computed_for: None,
            histogram: None,
            stats_lines: Vec::new(),
            color_map,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Load the configured data source. A source that fails to load is
    /// replaced by sample data and the error is kept as the status message.
    pub fn from_config(config: DashboardConfig) -> Self {
        let source = config.data_source();
        match source.load() {
            Ok(dataset) => Self::new(dataset, source.describe(), config),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", source.describe());
                let fallback = SampleSource {
                    rows: config.sample_rows,
                    seed: config.seed,
                };
                let dataset = fallback.generate();
                let mut state = Self::new(dataset, fallback.describe(), config);
                state.status_message = Some(format!("Error: {e:#}"));
                state
            }
        }
    }

    /// Recompute the pipeline if the parameters changed since the last run.
    ///
    /// Returns whether anything was recomputed.
    pub fn refilter(&mut self) -> bool {
        if self.computed_for.as_ref() == Some(&self.params) {
            return false;
        }

        self.result = self.pipeline.compute(&self.dataset, &self.params);
        self.histogram =
            Histogram::compute(&self.result.histogram_values, self.config.histogram_bins);
        self.stats_lines = format::stats_lines(
            self.result.stats.as_ref(),
            self.pipeline.value_column(),
            self.config.precision,
        );
        self.computed_for = Some(self.params.clone());
        true
    }

    pub fn set_row_limit(&mut self, row_limit: usize) {
        self.params.row_limit = row_limit;
        self.refilter();
    }

    pub fn set_category(&mut self, label: &str) {
        self.params.category = CategoryFilter::from(label);
        self.refilter();
    }

    /// Push the bound editors into the filter parameters.
    pub fn apply_bounds(&mut self) {
        self.params.min_value = self.min_enabled.then_some(self.min_draft);
        self.params.max_value = self.max_enabled.then_some(self.max_draft);
        self.refilter();
    }

    /// Put every filter back to its startup value.
    pub fn reset_filters(&mut self) {
        self.params = self.config.initial_params();
        self.min_enabled = false;
        self.max_enabled = false;
        self.refilter();
    }
}
