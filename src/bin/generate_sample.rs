//! Write the synthetic dashboard table to disk.
//!
//! ```text
//! generate_sample [OUTPUT] [ROWS] [SEED]
//! ```
//!
//! The format follows the extension of `OUTPUT` (`.parquet`, `.csv`,
//! `.json`); the default is `sample_data.parquet` with 200 rows, seed 42.

use std::path::PathBuf;

use anyhow::{Context, Result};
use panda_dash::data::sample::generate_sample_data;
use panda_dash::data::writer::write_file;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "sample_data.parquet".into()));
    let rows: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid row count {s:?}"))?,
        None => 200,
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => 42,
    };

    let dataset = generate_sample_data(rows, seed);
    write_file(&output, &dataset)?;

    println!(
        "Wrote {} rows ({}) to {}",
        dataset.len(),
        dataset.column_names().join(", "),
        output.display()
    );
    Ok(())
}
