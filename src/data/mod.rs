//! Data layer: table types, sources, loading and writing.
//!
//! Architecture:
//! ```text
//!  generate_sample_data      .csv / .json / .parquet
//!            │                        │
//!            ▼                        ▼
//!      SampleSource              FileSource   (DataSource)
//!            └──────────┬─────────────┘
//!                       ▼
//!                ┌────────────┐
//!                │  Dataset    │  rows, column order, numeric columns
//!                └────────────┘
//!                       │
//!                       ▼
//!                  crate::pipeline
//! ```

pub mod loader;
pub mod model;
pub mod sample;
pub mod source;
pub mod writer;
