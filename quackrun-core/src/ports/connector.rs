// quackrun-core/src/ports/connector.rs

// What the runner needs from a SQL engine, without knowing which engine it is.

use crate::domain::result_set::ResultSet;
use crate::error::QuackError;

pub trait Connector {
    /// Execute one statement and materialize every row it returns.
    fn query(&self, sql: &str) -> Result<ResultSet, QuackError>;

    /// Release the underlying handle. Dropping the connector releases it too;
    /// closing explicitly surfaces release failures.
    fn close(self) -> Result<(), QuackError>
    where
        Self: Sized;

    fn engine_name(&self) -> &str;
}
