// quackrun-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports: the contract the runner needs from a SQL engine.
pub mod ports;

// 2. Domain: result sets, statement kinds, presets, runner configuration.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure: DuckDB adapter, table rendering, YAML config.
pub mod infrastructure;

// 4. Application: use cases (scoped run, presets).
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::QuackError;
