pub mod project;
pub mod settings;

pub use project::{ConfigFile, UserPreset, load_config};
pub use settings::{CliOverrides, Settings, resolve_settings};
