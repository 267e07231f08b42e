// quackrun-core/src/domain/result_set.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Engine-independent value of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Integer(i128),
    Real(f32),
    Double(f64),
    /// Exact decimal, kept in the engine's textual form.
    Decimal(String),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Blob(Vec<u8>),
    /// Engine-formatted text for everything else (lists, structs, maps, intervals).
    Other(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_)
                | CellValue::Real(_)
                | CellValue::Double(_)
                | CellValue::Decimal(_)
        )
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("NULL"),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            // Shortest representation that round-trips, i.e. full precision
            CellValue::Real(v) => write!(f, "{}", v),
            CellValue::Double(v) => write!(f, "{}", v),
            CellValue::Decimal(d) => f.write_str(d),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::Timestamp(ts) => write!(f, "{}", ts),
            CellValue::Blob(bytes) => {
                f.write_str("\\x")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
            CellValue::Other(s) => f.write_str(s),
        }
    }
}

/// Fully materialized output of one statement.
///
/// Column order is the engine's order and every row has exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First cell of the first row, for single-value queries like `COUNT(*)`.
    pub fn scalar(&self) -> Option<&CellValue> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Row `index` as (column name, value) pairs.
    pub fn record(&self, index: usize) -> Option<Vec<(&str, &CellValue)>> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}
