pub mod config;
pub mod error;
pub mod preset;
pub mod result_set;
pub mod statement;

// Convenience re-exports
pub use config::{AccessMode, RunnerConfig};
pub use error::DomainError;
pub use preset::{Preset, PresetCatalog, QueryStep, StepDisplay};
pub use result_set::{CellValue, ResultSet};
pub use statement::{StatementKind, classify};
