// quackrun/src/commands/export.rs
//
// USE CASE: Export query results to a delimited file.

use std::io;

use quackrun_core::QuackError;
use quackrun_core::application::run_query;
use quackrun_core::domain::RunnerConfig;
use quackrun_core::domain::preset::export_sql;

pub fn execute(
    config: &RunnerConfig,
    sql: Option<String>,
    output_given: bool,
) -> Result<(), QuackError> {
    if output_given && sql.is_some() {
        tracing::warn!(
            output = %config.output_path,
            "--output is ignored when SQL is given; the COPY statement names its own target"
        );
    }

    let config = config
        .clone()
        .with_default_query(export_sql(&config.output_path));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = run_query(&config, sql.as_deref(), &mut out)?;

    match outcome.kind.export_target() {
        Some(target) => eprintln!("✨ Exported to '{}'", target),
        None if !outcome.kind.is_export() => {
            tracing::warn!("Statement is not a COPY ... TO export, nothing was written")
        }
        None => {}
    }
    Ok(())
}
