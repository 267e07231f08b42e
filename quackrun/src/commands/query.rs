// quackrun/src/commands/query.rs
//
// USE CASE: Execute a SQL query (argument or default) and print the table.

use std::io;

use quackrun_core::QuackError;
use quackrun_core::application::run_query;
use quackrun_core::domain::RunnerConfig;

pub fn execute(config: &RunnerConfig, sql: Option<String>) -> Result<(), QuackError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_query(config, sql.as_deref(), &mut out)?;
    Ok(())
}
