use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Number, Value as JsonValue};

use super::model::{CellValue, Dataset};

/// Write a dataset to a file, picking the format from the extension.
///
/// The layouts are the ones [`super::loader::load_file`] reads back.
pub fn write_file(path: &Path, dataset: &Dataset) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => write_parquet(path, dataset),
        "json" => write_json(path, dataset),
        "csv" => write_csv(path, dataset),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer
        .write_record(dataset.column_names())
        .context("writing CSV header")?;

    for (row_no, row) in dataset.rows().iter().enumerate() {
        let fields = dataset
            .column_names()
            .iter()
            .map(|col| row.get(col).map(csv_field).unwrap_or_default());
        writer
            .write_record(fields)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Text form of a cell that `guess_cell_type` parses back to the same variant.
fn csv_field(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        // Debug keeps the fractional part ("1.0"), so whole floats stay floats.
        CellValue::Float(v) => format!("{v:?}"),
        other => other.to_string(),
    }
}

fn write_json(path: &Path, dataset: &Dataset) -> Result<()> {
    let records: Vec<JsonValue> = dataset
        .rows()
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = dataset
                .column_names()
                .iter()
                .map(|col| {
                    let value = row.get(col).map(cell_to_json).unwrap_or(JsonValue::Null);
                    (col.clone(), value)
                })
                .collect();
            JsonValue::Object(obj)
        })
        .collect();

    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &records)
        .context("serializing JSON")?;
    Ok(())
}

fn cell_to_json(cell: &CellValue) -> JsonValue {
    match cell {
        CellValue::String(s) => JsonValue::String(s.clone()),
        CellValue::Integer(i) => JsonValue::Number((*i).into()),
        // JSON has no NaN/inf; those become null.
        CellValue::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::Null => JsonValue::Null,
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Arrow type that can hold every non-null cell of a column.
fn column_type(dataset: &Dataset, column: &str) -> DataType {
    let cells: Vec<&CellValue> = dataset
        .unique_values(column)
        .map(|vals| vals.iter().filter(|v| **v != CellValue::Null).collect())
        .unwrap_or_default();

    if cells.is_empty() {
        DataType::Utf8
    } else if cells.iter().all(|v| matches!(v, CellValue::Integer(_))) {
        DataType::Int64
    } else if cells.iter().all(|v| v.is_numeric()) {
        DataType::Float64
    } else if cells.iter().all(|v| matches!(v, CellValue::Bool(_))) {
        DataType::Boolean
    } else {
        DataType::Utf8
    }
}

fn build_column(dataset: &Dataset, column: &str, data_type: &DataType) -> ArrayRef {
    let cells = dataset.rows().iter().map(|row| row.get(column));
    match data_type {
        DataType::Int64 => {
            let mut b = Int64Builder::new();
            for cell in cells {
                b.append_option(match cell {
                    Some(CellValue::Integer(i)) => Some(*i),
                    _ => None,
                });
            }
            Arc::new(b.finish())
        }
        DataType::Float64 => {
            let mut b = Float64Builder::new();
            for cell in cells {
                b.append_option(cell.and_then(CellValue::as_f64));
            }
            Arc::new(b.finish())
        }
        DataType::Boolean => {
            let mut b = BooleanBuilder::new();
            for cell in cells {
                b.append_option(match cell {
                    Some(CellValue::Bool(v)) => Some(*v),
                    _ => None,
                });
            }
            Arc::new(b.finish())
        }
        _ => {
            let mut b = StringBuilder::new();
            for cell in cells {
                match cell {
                    None | Some(CellValue::Null) => b.append_null(),
                    Some(v) => b.append_value(v.to_string()),
                }
            }
            Arc::new(b.finish())
        }
    }
}

fn write_parquet(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut fields = Vec::with_capacity(dataset.column_names().len());
    let mut columns = Vec::with_capacity(dataset.column_names().len());

    for col in dataset.column_names() {
        let data_type = column_type(dataset, col);
        columns.push(build_column(dataset, col, &data_type));
        fields.push(Field::new(col.as_str(), data_type, true));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::sample::generate_sample_data;

    fn reload_through(suffix: &str) -> (Dataset, Dataset) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("table{suffix}"));
        let original = generate_sample_data(25, 11);
        write_file(&path, &original).unwrap();
        let reloaded = load_file(&path).unwrap();
        (original, reloaded)
    }

    #[test]
    fn test_parquet_reload_matches() {
        let (original, reloaded) = reload_through(".parquet");
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_csv_reload_matches() {
        let (original, reloaded) = reload_through(".csv");
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_json_reload_matches() {
        let (original, reloaded) = reload_through(".json");
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_column_type_inference() {
        let ds = generate_sample_data(5, 1);
        assert_eq!(column_type(&ds, "id"), DataType::Int64);
        assert_eq!(column_type(&ds, "value"), DataType::Float64);
        assert_eq!(column_type(&ds, "category"), DataType::Utf8);
        assert_eq!(column_type(&ds, "missing"), DataType::Utf8);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ds = generate_sample_data(1, 1);
        assert!(write_file(&dir.path().join("out.txt"), &ds).is_err());
    }
}
