//! Dashboard configuration.
//!
//! Read once at startup from a TOML file. Every field has a default, so an
//! absent file or a partial file is fine:
//!
//! ```toml
//! sample_rows = 500
//! data_file = "measurements.parquet"
//! precision = 3
//! value_column = "reading"
//! ```
//!
//! Lookup order: the path in `PANDA_DASH_CONFIG`, then `panda-dash.toml` in
//! the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::source::{DataSource, FileSource, SampleSource};
use crate::format::DEFAULT_PRECISION;
use crate::pipeline::{CategoryFilter, DEFAULT_BINS, FilterParams, Pipeline};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PANDA_DASH_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "panda-dash.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows of synthetic data when no data file is used.
    pub sample_rows: usize,

    /// Seed of the synthetic data generator.
    pub seed: u64,

    /// Load this `.csv` / `.json` / `.parquet` file instead of sample data.
    pub data_file: Option<PathBuf>,

    /// Decimal places in the table's value column and the stats panel.
    pub precision: usize,

    /// Bins of the value histogram.
    pub histogram_bins: usize,

    pub row_slider_min: usize,
    pub row_slider_max: usize,
    /// Initial slider position.
    pub row_default: usize,

    /// Column the category selector filters on.
    pub category_column: String,

    /// Numeric column the min/max bounds and the histogram use.
    pub value_column: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sample_rows: 200,
            seed: 42,
            data_file: None,
            precision: DEFAULT_PRECISION,
            histogram_bins: DEFAULT_BINS,
            row_slider_min: 10,
            row_slider_max: 200,
            row_default: 100,
            category_column: "category".to_string(),
            value_column: "value".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Find and load the config for this process.
    ///
    /// A path given through [`CONFIG_ENV`] must exist; the default file is
    /// optional and its absence yields the defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            log::info!("Using config from ${CONFIG_ENV}: {path:?}");
            return Self::load(PathBuf::from(path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("Using config file {DEFAULT_CONFIG_FILE}");
            return Self::load(default_path);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.row_slider_min > self.row_slider_max {
            return Err(ConfigError::Invalid(format!(
                "row_slider_min ({}) is larger than row_slider_max ({})",
                self.row_slider_min, self.row_slider_max
            )));
        }
        if self.category_column.is_empty() || self.value_column.is_empty() {
            return Err(ConfigError::Invalid(
                "category_column and value_column must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The dataset source: the data file if one is set, sample data otherwise.
    pub fn data_source(&self) -> Box<dyn DataSource> {
        match &self.data_file {
            Some(path) => Box::new(FileSource { path: path.clone() }),
            None => Box::new(SampleSource {
                rows: self.sample_rows,
                seed: self.seed,
            }),
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(&self.category_column, &self.value_column)
    }

    /// Filters the dashboard opens with.
    pub fn initial_params(&self) -> FilterParams {
        FilterParams {
            row_limit: self
                .row_default
                .min(self.row_slider_max)
                .max(self.row_slider_min),
            category: CategoryFilter::All,
            min_value: None,
            max_value: None,
        }
    }
}
