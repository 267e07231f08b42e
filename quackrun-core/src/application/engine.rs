// quackrun-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::result_set::ResultSet;
use crate::domain::statement::{StatementKind, classify};
use crate::error::QuackError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::Connector;

/// Execute one statement with instrumentation (logs + timing).
///
/// Engine I/O failures on an export statement are reported as export
/// errors so they can be told apart from rejected SQL.
#[instrument(skip(connector, query), fields(engine = connector.engine_name(), query.len = query.len()))]
pub fn execute_query(
    connector: &dyn Connector,
    query: &str,
) -> Result<(StatementKind, ResultSet), QuackError> {
    let kind = classify(query);
    let start = Instant::now();
    debug!(kind = ?kind, "⚡ Executing Query: {}", query);

    let result = connector.query(query);
    let duration = start.elapsed();

    match result {
        Ok(rs) => {
            debug!(rows = rs.row_count(), "✅ Query finished in {:.2?}", duration);
            Ok((kind, rs))
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(reclassify_export_failure(&kind, e))
        }
    }
}

fn reclassify_export_failure(kind: &StatementKind, err: QuackError) -> QuackError {
    let StatementKind::Export { target } = kind else {
        return err;
    };
    match err {
        QuackError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
            if e.to_string().contains("IO Error") =>
        {
            QuackError::Infrastructure(InfrastructureError::Export {
                target: target.clone().unwrap_or_else(|| "<unknown>".to_string()),
                message: e.to_string(),
            })
        }
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::infrastructure::adapters::duckdb::DuckDBConnector;
    use anyhow::Result;

    #[test]
    fn test_select_is_classified_and_materialized() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let (kind, rs) = execute_query(&connector, "SELECT 42 AS answer")?;
        assert_eq!(kind, StatementKind::Select);
        assert_eq!(rs.columns, vec!["answer"]);
        Ok(())
    }

    #[test]
    fn test_invalid_sql_is_a_query_error() -> Result<()> {
        let connector = DuckDBConnector::in_memory()?;
        let err = execute_query(&connector, "SELEC oops").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Query);
        Ok(())
    }

    #[test]
    fn test_unwritable_export_target_is_an_io_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("no_such_dir").join("out.csv");
        let connector = DuckDBConnector::in_memory()?;

        let sql = format!(
            "COPY (SELECT 1 AS x) TO '{}' (HEADER, DELIMITER ',')",
            target.display()
        );
        let err = execute_query(&connector, &sql).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!target.exists());
        Ok(())
    }

    #[test]
    fn test_copy_after_another_statement_is_an_export() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("t.csv");
        let connector = DuckDBConnector::in_memory()?;
        connector.query("CREATE TABLE t (id INTEGER)")?;

        let sql = format!(
            "INSERT INTO t VALUES (1), (2); COPY t TO '{}' (HEADER)",
            target.display()
        );
        let (kind, _) = execute_query(&connector, &sql)?;
        assert_eq!(kind.export_target(), Some(target.display().to_string().as_str()));
        assert_eq!(std::fs::read_to_string(&target)?.lines().count(), 3);
        Ok(())
    }

    #[test]
    fn test_unwritable_copy_after_another_statement_is_an_io_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("nodir").join("x.csv");
        let connector = DuckDBConnector::in_memory()?;
        connector.query("CREATE TABLE t (id INTEGER)")?;

        let sql = format!(
            "INSERT INTO t VALUES (1); COPY t TO '{}' (HEADER)",
            target.display()
        );
        let err = execute_query(&connector, &sql).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        Ok(())
    }
}
