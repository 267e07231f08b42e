// quackrun-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Preset '{0}' not found")]
    #[diagnostic(
        code(quackrun::domain::unknown_preset),
        help("Run `quackrun presets` to list the available presets.")
    )]
    UnknownPreset(String),

    #[error("Query text is empty")]
    #[diagnostic(code(quackrun::domain::empty_query))]
    EmptyQuery,

    #[error("Preset '{0}' is already defined")]
    #[diagnostic(
        code(quackrun::domain::duplicate_preset),
        help("Built-in preset names cannot be reused in the configuration file.")
    )]
    DuplicatePreset(String),

    #[error("Preset '{0}' has no steps")]
    #[diagnostic(code(quackrun::domain::empty_preset))]
    EmptyPreset(String),
}
