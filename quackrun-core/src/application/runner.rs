// quackrun-core/src/application/runner.rs

use std::io::Write;
use tracing::{info, instrument, warn};

use crate::application::engine::execute_query;
use crate::domain::config::RunnerConfig;
use crate::domain::preset::{Preset, StepDisplay};
use crate::domain::result_set::ResultSet;
use crate::domain::statement::StatementKind;
use crate::error::QuackError;
use crate::infrastructure::adapters::duckdb::DuckDBConnector;
use crate::infrastructure::render::{render_scalar, render_table};
use crate::ports::connector::Connector;

/// What a single-statement run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub kind: StatementKind,
    pub result: ResultSet,
}

/// Scoped acquisition: open, run `f`, release.
///
/// The connector is closed explicitly whatever `f` returns. If `f` panics
/// the connector is dropped during unwinding, which releases it as well.
/// An error from `f` takes precedence over a close failure.
pub fn with_connection<C, T, O, F>(open: O, f: F) -> Result<T, QuackError>
where
    C: Connector,
    O: FnOnce() -> Result<C, QuackError>,
    F: FnOnce(&C) -> Result<T, QuackError>,
{
    let connector = open()?;
    let result = f(&connector);

    match (result, connector.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("Connection release failed after an error: {}", close_err);
            Err(e)
        }
    }
}

fn open_duckdb(config: &RunnerConfig) -> impl FnOnce() -> Result<DuckDBConnector, QuackError> + '_ {
    move || DuckDBConnector::from_config(config).map_err(QuackError::from)
}

/// Run one statement: the argument if given, otherwise the configured default.
///
/// The whole result is materialized before anything is written, so a failing
/// statement writes nothing to `out`.
#[instrument(skip(config, sql, out), fields(db = %config.db_path.display()))]
pub fn run_query(
    config: &RunnerConfig,
    sql: Option<&str>,
    out: &mut dyn Write,
) -> Result<QueryOutcome, QuackError> {
    let sql = config.resolve_query(sql)?;

    let (kind, result) = with_connection(open_duckdb(config), |conn: &DuckDBConnector| {
        execute_query(conn, &sql)
    })?;

    writeln!(out, "{}", render_table(&result))?;
    if let Some(target) = kind.export_target() {
        info!(target = %target, "Export written");
    }

    Ok(QueryOutcome { kind, result })
}

/// Run every step of a preset over a single connection, in order.
///
/// Each step is printed as soon as it has been materialized; a failing step
/// stops the preset.
#[instrument(skip(config, preset, out), fields(preset = %preset.name, db = %config.db_path.display()))]
pub fn run_preset(
    config: &RunnerConfig,
    preset: &Preset,
    out: &mut dyn Write,
) -> Result<Vec<QueryOutcome>, QuackError> {
    with_connection(open_duckdb(config), |conn: &DuckDBConnector| {
        let mut outcomes = Vec::with_capacity(preset.steps.len());

        for step in &preset.steps {
            let (kind, result) = execute_query(conn, &step.sql)?;

            for _ in 0..step.gap {
                writeln!(out)?;
            }
            if let Some(heading) = &step.heading {
                writeln!(out, "{}", heading)?;
            }
            match step.display {
                StepDisplay::Table => writeln!(out, "{}", render_table(&result))?,
                StepDisplay::Scalar => {
                    writeln!(out, "{}", render_scalar(step.label.as_deref(), &result))?
                }
            }
            outcomes.push(QueryOutcome { kind, result });
        }

        Ok(outcomes)
    })
}
