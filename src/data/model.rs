use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common DataFrame dtypes.
/// Used as a key in `BTreeSet` downstream, so `CellValue` must be `Ord`.
/// Equality follows the ordering: `Float(NaN) == Float(NaN)`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Whether this cell equals a category label as typed in the UI.
    ///
    /// String cells compare verbatim; other cells compare by their display form.
    pub fn matches_label(&self, label: &str) -> bool {
        match self {
            CellValue::String(s) => s == label,
            CellValue::Null => false,
            other => other.to_string() == label,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single row: column_name → value.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Dataset – the complete, immutable table
// ---------------------------------------------------------------------------

/// The full table with pre-computed column indices.
///
/// Built once at startup and never mutated afterwards; the pipeline only ever
/// reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Record>,
    /// Column names in source order.
    column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    unique_values: BTreeMap<String, BTreeSet<CellValue>>,
    /// Columns whose non-null cells are all numeric.
    numeric_columns: Vec<String>,
}

impl Dataset {
    /// Build column indices from rows.
    ///
    /// `column_order` fixes the display order of columns; columns that appear
    /// in the rows but not in `column_order` are appended in sorted order.
    pub fn from_rows(column_order: Vec<String>, rows: Vec<Record>) -> Self {
        let mut column_names = column_order;
        let mut extra: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in row {
                if !column_names.contains(col) {
                    extra.insert(col.clone());
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        column_names.extend(extra);

        let numeric_columns = column_names
            .iter()
            .filter(|col| {
                unique_values.get(*col).is_some_and(|vals| {
                    vals.iter().any(CellValue::is_numeric)
                        && vals
                            .iter()
                            .all(|v| v.is_numeric() || *v == CellValue::Null)
                })
            })
            .cloned()
            .collect();

        Dataset {
            rows,
            column_names,
            unique_values,
            numeric_columns,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn is_numeric_column(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }

    pub fn unique_values(&self, column: &str) -> Option<&BTreeSet<CellValue>> {
        self.unique_values.get(column)
    }

    /// Distinct non-null values of a column, in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Vec<CellValue> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|v| **v != CellValue::Null)
            .filter(|v| seen.insert((*v).clone()))
            .cloned()
            .collect()
    }
}
