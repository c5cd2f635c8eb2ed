use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a flat tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one scalar column per field (strings, ints, floats, bools)
/// * `.json`    – `[{ "category": "A", "value": 1.5, ... }, ...]`
/// * `.csv`     – header row, one column per field, types guessed per column
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 0, "category": "A", "value": 101.3, "score": 55.2 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_order: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = Record::new();
        for (key, val) in obj {
            if !column_order.contains(key) {
                column_order.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        rows.push(row);
    }

    Ok(Dataset::from_rows(column_order, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one value per cell.
///
/// Empty cells become nulls. Each column is typed as a whole by
/// [`column_kind`], so a column stays text unless every cell fits.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            );
        }
        records.push(record);
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|c| column_kind(records.iter().filter_map(|r| r.get(c))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .zip(record.iter())
                .zip(&kinds)
                .map(|((col, value), &kind)| (col.clone(), typed_cell(value, kind)))
                .collect::<Record>()
        })
        .collect();

    Ok(Dataset::from_rows(headers, rows))
}

/// How every cell of a CSV column is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Numeric,
    Bool,
    Text,
}

/// Decide the type of a column from all of its cells.
///
/// Numeric needs at least one finite number and no zero-padded integers
/// ("007"); `nan`/`inf` spellings are accepted only next to real numbers.
pub(crate) fn column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut any_finite = false;
    let mut all_numeric = true;
    let mut all_bool = true;
    let mut any_cell = false;

    for s in cells.filter(|s| !s.is_empty()) {
        any_cell = true;
        match guess_cell_type(s) {
            CellValue::Integer(_) | CellValue::Float(_) => {
                any_finite = true;
                all_bool = false;
                if is_zero_padded(s) {
                    all_numeric = false;
                }
            }
            CellValue::Bool(_) => all_numeric = false,
            _ => {
                all_bool = false;
                if !is_non_finite(s) {
                    all_numeric = false;
                }
            }
        }
    }

    if !any_cell {
        ColumnKind::Text
    } else if all_numeric && any_finite {
        ColumnKind::Numeric
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn typed_cell(s: &str, kind: ColumnKind) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    match kind {
        ColumnKind::Numeric => match guess_cell_type(s) {
            CellValue::String(_) => s
                .parse::<f64>()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::String(s.to_string())),
            cell => cell,
        },
        ColumnKind::Bool => guess_cell_type(s),
        ColumnKind::Text => CellValue::String(s.to_string()),
    }
}

/// Type of a single cell on its own. Only finite numbers become floats.
pub(crate) fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return CellValue::Float(f);
        }
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

fn is_non_finite(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(|f| !f.is_finite())
}

/// "007", "-01": an integer part with a redundant leading zero.
fn is_zero_padded(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let bytes = digits.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Column types without a direct
/// [`CellValue`] counterpart are rendered to text.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_order: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let row: Record = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, col)| (field.name().clone(), extract_cell(col, row_idx)))
                .collect();
            rows.push(row);
        }
    }

    Ok(Dataset::from_rows(column_order, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => match array_value_to_string(col.as_ref(), row) {
            Ok(text) => CellValue::String(text),
            Err(e) => {
                log::warn!("Cannot render {:?} cell as text: {e}", col.data_type());
                CellValue::Null
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_guess_cell_type() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("12"), CellValue::Integer(12));
        assert_eq!(guess_cell_type("1.5"), CellValue::Float(1.5));
        assert_eq!(guess_cell_type("true"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("A"), CellValue::String("A".into()));
        assert_eq!(guess_cell_type("nan"), CellValue::String("nan".into()));
        assert_eq!(guess_cell_type("inf"), CellValue::String("inf".into()));
    }

    #[test]
    fn test_column_kind() {
        let kind = |cells: &[&str]| column_kind(cells.iter().copied());
        assert_eq!(kind(&["1", "2.5", ""]), ColumnKind::Numeric);
        assert_eq!(kind(&["1.5", "NaN", "-inf"]), ColumnKind::Numeric);
        assert_eq!(kind(&["nan", "inf"]), ColumnKind::Text);
        assert_eq!(kind(&["007", "12"]), ColumnKind::Text);
        assert_eq!(kind(&["0", "0.25", "-0.5"]), ColumnKind::Numeric);
        assert_eq!(kind(&["true", "false", ""]), ColumnKind::Bool);
        assert_eq!(kind(&["true", "1"]), ColumnKind::Text);
        assert_eq!(kind(&["", ""]), ColumnKind::Text);
    }

    #[test]
    fn test_load_csv_types_whole_columns() {
        let file = write_temp(
            ".csv",
            "category,code,value\nnan,007,1.5\ninf,12,NaN\nA,3,2\n",
        );
        let ds = load_file(file.path()).unwrap();
        let rows = ds.rows();

        assert_eq!(rows[0].get("category"), Some(&CellValue::String("nan".into())));
        assert_eq!(rows[1].get("category"), Some(&CellValue::String("inf".into())));
        assert_eq!(rows[0].get("code"), Some(&CellValue::String("007".into())));
        assert_eq!(rows[1].get("code"), Some(&CellValue::String("12".into())));
        assert_eq!(rows[1].get("value"), Some(&CellValue::Float(f64::NAN)));
        assert_eq!(rows[2].get("value"), Some(&CellValue::Integer(2)));
        assert_eq!(ds.numeric_columns(), &["value"]);
        assert_eq!(
            ds.distinct_values("category"),
            vec![
                CellValue::String("nan".into()),
                CellValue::String("inf".into()),
                CellValue::String("A".into()),
            ]
        );
    }

    #[test]
    fn test_load_csv_keeps_header_order_and_nulls() {
        let file = write_temp(".csv", "category,value,score\nA,1.5,3\nB,,4\n");
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.column_names(), &["category", "value", "score"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].get("value"), Some(&CellValue::Null));
        assert_eq!(ds.numeric_columns(), &["value", "score"]);
    }

    #[test]
    fn test_load_csv_rejects_ragged_rows() {
        let file = write_temp(".csv", "a,b\n1,2\n3\n");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_load_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"category": "A", "value": 2, "flag": true},
                {"category": "B", "value": 2.5, "flag": null}]"#,
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.column_names(), &["category", "value", "flag"]);
        assert_eq!(ds.rows()[0].get("value"), Some(&CellValue::Integer(2)));
        assert_eq!(ds.rows()[1].get("flag"), Some(&CellValue::Null));
        assert!(ds.is_numeric_column("value"));
    }

    #[test]
    fn test_load_json_rejects_non_array() {
        let file = write_temp(".json", r#"{"category": "A"}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
