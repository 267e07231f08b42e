// quackrun-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ConnectionError {
    #[error("Database not found at '{0}'")]
    #[diagnostic(
        code(quackrun::infra::connection::not_found),
        help("Check --db-path. The runner never creates a database file.")
    )]
    NotFound(String),

    #[error("Cannot open database '{path}': {source}")]
    #[diagnostic(
        code(quackrun::infra::connection::open),
        help("The file may be locked by another process or unreadable.")
    )]
    Open {
        path: String,
        #[source]
        source: duckdb::Error,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(quackrun::infra::database::duckdb),
        help("The SQL engine rejected the statement.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- CONNECTION ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Connection(#[from] ConnectionError),

    // --- DATABASE (query execution) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- EXPORT TARGET ---
    #[error("Export to '{target}' failed: {message}")]
    #[diagnostic(
        code(quackrun::infra::export),
        help("Check that the output directory exists and is writable.")
    )]
    Export { target: String, message: String },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(quackrun::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(quackrun::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(quackrun::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(quackrun::infra::config_missing))]
    ConfigNotFound(String),
}

// Shortcut so `?` works directly on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}
