// quackrun-core/src/infrastructure/adapters/duckdb.rs

use duckdb::arrow::array::{Array, AsArray};
use duckdb::arrow::datatypes::{
    DataType, Date32Type, Decimal128Type, Float32Type, Float64Type, Int8Type, Int16Type,
    Int32Type, Int64Type, Time64MicrosecondType, Time64NanosecondType, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use duckdb::arrow::util::display::{ArrayFormatter, FormatOptions};
use duckdb::{AccessMode as DuckAccessMode, Config, Connection};
use std::path::Path;
use tracing::{debug, info};

use crate::domain::config::{AccessMode, RunnerConfig};
use crate::domain::result_set::{CellValue, ResultSet};
use crate::error::QuackError;
use crate::infrastructure::error::{ConnectionError, DatabaseError, InfrastructureError};
use crate::ports::connector::Connector;

const IN_MEMORY: &str = ":memory:";

pub struct DuckDBConnector {
    conn: Connection,
    path: String,
}

impl DuckDBConnector {
    /// Open an existing database file. A missing file is an error: DuckDB
    /// would otherwise create an empty database at that path.
    pub fn open(db_path: &Path, access_mode: AccessMode) -> Result<Self, ConnectionError> {
        let path = db_path.to_string_lossy().into_owned();

        if path == IN_MEMORY {
            let conn = Connection::open_in_memory()
                .map_err(|source| ConnectionError::Open { path: path.clone(), source })?;
            return Ok(Self { conn, path });
        }

        if !db_path.exists() {
            return Err(ConnectionError::NotFound(path));
        }

        let mut config = Config::default();
        if access_mode == AccessMode::ReadOnly {
            config = config
                .access_mode(DuckAccessMode::ReadOnly)
                .map_err(|source| ConnectionError::Open { path: path.clone(), source })?;
        }

        let conn = Connection::open_with_flags(db_path, config)
            .map_err(|source| ConnectionError::Open { path: path.clone(), source })?;

        info!(path = %path, mode = ?access_mode, "DuckDB connection opened");
        Ok(Self { conn, path })
    }

    pub fn from_config(config: &RunnerConfig) -> Result<Self, ConnectionError> {
        Self::open(&config.db_path, config.access_mode)
    }

    pub fn in_memory() -> Result<Self, ConnectionError> {
        Self::open(Path::new(IN_MEMORY), AccessMode::ReadWrite)
    }
}

fn db_err(e: duckdb::Error) -> QuackError {
    QuackError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

impl Connector for DuckDBConnector {
    // Rows are read from the Arrow batches rather than through `Row::get`:
    // duckdb's row accessor converts every DECIMAL to `rust_decimal`, which
    // cannot hold more than 28 digits.
    fn query(&self, sql: &str) -> Result<ResultSet, QuackError> {
        let mut stmt = self.conn.prepare(sql).map_err(db_err)?;
        let arrow = stmt.query_arrow([]).map_err(db_err)?;

        let columns: Vec<String> = arrow
            .get_schema()
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();

        let options = FormatOptions::default();
        let mut records = Vec::new();
        for batch in arrow {
            let arrays = batch.columns();
            let formatters: Vec<Option<ArrayFormatter<'_>>> = arrays
                .iter()
                .map(|a| ArrayFormatter::try_new(a.as_ref(), &options).ok())
                .collect();

            for row in 0..batch.num_rows() {
                let cells = arrays
                    .iter()
                    .zip(&formatters)
                    .map(|(array, fmt)| to_cell(array.as_ref(), fmt.as_ref(), row))
                    .collect();
                records.push(cells);
            }
        }

        debug!(rows = records.len(), columns = columns.len(), "Result materialized");
        Ok(ResultSet::new(columns, records))
    }

    fn close(self) -> Result<(), QuackError> {
        let path = self.path;
        match self.conn.close() {
            Ok(()) => {
                info!(path = %path, "DuckDB connection closed");
                Ok(())
            }
            // The handle comes back on failure; dropping it still releases it.
            Err((_conn, e)) => Err(db_err(e)),
        }
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

fn formatted(fmt: Option<&ArrayFormatter<'_>>, row: usize) -> String {
    fmt.map(|f| f.value(row).to_string())
        .unwrap_or_else(|| "<unsupported>".to_string())
}

fn to_cell(array: &dyn Array, fmt: Option<&ArrayFormatter<'_>>, row: usize) -> CellValue {
    if array.is_null(row) {
        return CellValue::Null;
    }

    let temporal = |value: Option<CellValue>| {
        value.unwrap_or_else(|| CellValue::Other(formatted(fmt, row)))
    };

    match array.data_type() {
        DataType::Boolean => CellValue::Boolean(array.as_boolean().value(row)),
        DataType::Int8 => CellValue::Integer(array.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(array.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(array.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(array.as_primitive::<Int64Type>().value(row).into()),
        DataType::UInt8 => CellValue::Integer(array.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => {
            CellValue::Integer(array.as_primitive::<UInt16Type>().value(row).into())
        }
        DataType::UInt32 => {
            CellValue::Integer(array.as_primitive::<UInt32Type>().value(row).into())
        }
        DataType::UInt64 => {
            CellValue::Integer(array.as_primitive::<UInt64Type>().value(row).into())
        }
        DataType::Float32 => CellValue::Real(array.as_primitive::<Float32Type>().value(row)),
        DataType::Float64 => CellValue::Double(array.as_primitive::<Float64Type>().value(row)),
        // HUGEINT arrives as DECIMAL(38, 0)
        DataType::Decimal128(_, 0) => {
            CellValue::Integer(array.as_primitive::<Decimal128Type>().value(row))
        }
        DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => {
            CellValue::Decimal(formatted(fmt, row))
        }
        DataType::Utf8 => CellValue::Text(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(array.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => CellValue::Text(array.as_string_view().value(row).to_string()),
        DataType::Binary => CellValue::Blob(array.as_binary::<i32>().value(row).to_vec()),
        DataType::LargeBinary => CellValue::Blob(array.as_binary::<i64>().value(row).to_vec()),
        DataType::Date32 => temporal(
            array
                .as_primitive::<Date32Type>()
                .value_as_date(row)
                .map(CellValue::Date),
        ),
        DataType::Timestamp(unit, _) => {
            let value = match unit {
                TimeUnit::Second => array
                    .as_primitive::<TimestampSecondType>()
                    .value_as_datetime(row),
                TimeUnit::Millisecond => array
                    .as_primitive::<TimestampMillisecondType>()
                    .value_as_datetime(row),
                TimeUnit::Microsecond => array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value_as_datetime(row),
                TimeUnit::Nanosecond => array
                    .as_primitive::<TimestampNanosecondType>()
                    .value_as_datetime(row),
            };
            temporal(value.map(CellValue::Timestamp))
        }
        DataType::Time64(TimeUnit::Microsecond) => temporal(
            array
                .as_primitive::<Time64MicrosecondType>()
                .value_as_time(row)
                .map(CellValue::Time),
        ),
        DataType::Time64(TimeUnit::Nanosecond) => temporal(
            array
                .as_primitive::<Time64NanosecondType>()
                .value_as_time(row)
                .map(CellValue::Time),
        ),
        // ENUM
        DataType::Dictionary(_, _) => CellValue::Text(formatted(fmt, row)),
        // Lists, structs, maps, intervals, unions
        _ => CellValue::Other(formatted(fmt, row)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_duckdb_flow() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;

        connector.query("CREATE TABLE users (id INTEGER, name VARCHAR)")?;
        connector.query("INSERT INTO users VALUES (1, 'alice'), (2, NULL)")?;

        let rs = connector.query("SELECT id, name FROM users ORDER BY id")?;
        assert_eq!(rs.columns, vec!["id", "name"]);
        assert_eq!(rs.row_count(), 2);
        assert_eq!(rs.rows[0][1], CellValue::Text("alice".into()));
        assert!(rs.rows[1][1].is_null());

        connector.close()?;
        Ok(())
    }

    #[test]
    fn test_duckdb_error() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let result = connector.query("SELECT * FROM non_existent_table");
        assert!(matches!(
            result,
            Err(QuackError::Infrastructure(InfrastructureError::Database(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_not_created() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.duckdb");

        let result = DuckDBConnector::open(&path, AccessMode::ReadWrite);
        assert!(matches!(result, Err(ConnectionError::NotFound(_))));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_read_only_rejects_writes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("ro.duckdb");
        {
            let conn = Connection::open(&path)?;
            conn.execute_batch("CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (1);")?;
        }

        let connector = DuckDBConnector::open(&path, AccessMode::ReadOnly)?;
        assert_eq!(
            connector.query("SELECT COUNT(*) FROM t")?.scalar(),
            Some(&CellValue::Integer(1))
        );
        assert!(connector.query("INSERT INTO t VALUES (2)").is_err());
        Ok(())
    }

    #[test]
    fn test_temporal_and_decimal_values() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let rs = connector.query(
            "SELECT DATE '2024-03-01' AS d, \
                    TIMESTAMP '2024-03-01 12:30:00' AS ts, \
                    TIME '08:15:00' AS t, \
                    CAST(12.50 AS DECIMAL(10, 2)) AS amount, \
                    [1, 2] AS xs",
        )?;
        let row = &rs.rows[0];
        assert_eq!(row[0].to_string(), "2024-03-01");
        assert_eq!(row[1].to_string(), "2024-03-01 12:30:00");
        assert_eq!(row[2].to_string(), "08:15:00");
        assert_eq!(row[3].to_string(), "12.50");
        assert_eq!(row[4].to_string(), "[1, 2]");
        Ok(())
    }

    #[test]
    fn test_decimal_wider_than_28_digits() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let rs = connector.query(
            "SELECT CAST('999999999999999999999999999999999.99' AS DECIMAL(38,2)) AS big",
        )?;
        assert_eq!(
            rs.rows[0][0],
            CellValue::Decimal("999999999999999999999999999999999.99".into())
        );

        // SUM over DECIMAL(18,2) widens to DECIMAL(38,2)
        connector.query("CREATE TABLE sales (amount DECIMAL(18,2))")?;
        connector.query("INSERT INTO sales VALUES (1234567890123456.78), (0.22), (NULL)")?;
        let total = connector.query("SELECT SUM(amount) AS total FROM sales")?;
        assert_eq!(total.scalar(), Some(&CellValue::Decimal("1234567890123457.00".into())));

        let null = connector.query("SELECT CAST(NULL AS DECIMAL(38,2)) AS n")?;
        assert!(null.rows[0][0].is_null());
        Ok(())
    }

    #[test]
    fn test_hugeint_is_an_integer() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let rs = connector.query("SELECT CAST('1000000000000000000000000000000' AS HUGEINT) AS h")?;
        assert_eq!(rs.scalar(), Some(&CellValue::Integer(10_i128.pow(30))));
        Ok(())
    }
}
