// quackrun-core/src/domain/config.rs

use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::preset::{DEFAULT_EXPORT_PATH, DEFAULT_QUERY};

pub const DEFAULT_DB_PATH: &str = "dev.duckdb";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    #[default]
    ReadWrite,
    ReadOnly,
}

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub db_path: PathBuf,
    /// Used when no SQL is given on the command line.
    pub default_query: String,
    /// Target of the default export.
    pub output_path: String,
    pub access_mode: AccessMode,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            default_query: DEFAULT_QUERY.to_string(),
            output_path: DEFAULT_EXPORT_PATH.to_string(),
            access_mode: AccessMode::ReadWrite,
        }
    }
}

impl RunnerConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn with_default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = query.into();
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.access_mode = if read_only {
            AccessMode::ReadOnly
        } else {
            AccessMode::ReadWrite
        };
        self
    }

    /// The SQL to run: the argument when given, else the default query.
    pub fn resolve_query(&self, argument: Option<&str>) -> Result<String, DomainError> {
        let sql = argument.unwrap_or(&self.default_query);
        if sql.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(sql.to_string())
    }
}
