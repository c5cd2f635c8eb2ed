use std::path::PathBuf;

use anyhow::Result;

use super::loader::load_file;
use super::model::Dataset;
use super::sample::generate_sample_data;

/// Where the dashboard's table comes from.
///
/// A source is asked for its dataset exactly once, at startup; the result is
/// handed to the application state and never touched again.
pub trait DataSource {
    /// Human-readable origin, shown in the top bar.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Dataset>;
}

/// Synthetic table from [`generate_sample_data`].
#[derive(Debug, Clone)]
pub struct SampleSource {
    pub rows: usize,
    pub seed: u64,
}

impl SampleSource {
    pub fn generate(&self) -> Dataset {
        generate_sample_data(self.rows, self.seed)
    }
}

impl DataSource for SampleSource {
    fn describe(&self) -> String {
        format!("sample data ({} rows, seed {})", self.rows, self.seed)
    }

    fn load(&self) -> Result<Dataset> {
        Ok(self.generate())
    }
}

/// A `.csv` / `.json` / `.parquet` file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset> {
        load_file(&self.path)
    }
}
