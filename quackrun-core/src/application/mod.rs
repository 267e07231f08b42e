// quackrun-core/src/application/mod.rs

pub mod engine;
pub mod runner;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use quackrun_core::application::{run_query, run_preset}`.

pub use engine::execute_query;
pub use runner::{QueryOutcome, run_preset, run_query, with_connection};
