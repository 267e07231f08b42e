// quackrun-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{ConnectionError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum QuackError {
    // --- DOMAIN (unknown presets, empty SQL) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (DuckDB, IO, YAML) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

/// Broad failure class, one per documented process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Query,
    Connection,
    Io,
    Config,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Query => 1,
            ErrorKind::Connection => 2,
            ErrorKind::Io => 3,
            ErrorKind::Config => 4,
        }
    }
}

impl QuackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuackError::Domain(
                DomainError::UnknownPreset(_)
                | DomainError::DuplicatePreset(_)
                | DomainError::EmptyPreset(_),
            ) => ErrorKind::Config,
            QuackError::Domain(_) => ErrorKind::Query,
            QuackError::Infrastructure(infra) => match infra {
                InfrastructureError::Connection(_) => ErrorKind::Connection,
                InfrastructureError::Database(_) => ErrorKind::Query,
                InfrastructureError::Export { .. } | InfrastructureError::Io(_) => ErrorKind::Io,
                InfrastructureError::YamlError(_)
                | InfrastructureError::ConfigError(_)
                | InfrastructureError::ConfigNotFound(_) => ErrorKind::Config,
            },
            QuackError::InternalError(_) => ErrorKind::Query,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

impl From<std::io::Error> for QuackError {
    fn from(err: std::io::Error) -> Self {
        QuackError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<ConnectionError> for QuackError {
    fn from(err: ConnectionError) -> Self {
        QuackError::Infrastructure(InfrastructureError::Connection(err))
    }
}
