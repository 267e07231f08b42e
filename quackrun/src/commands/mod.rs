// quackrun/src/commands/mod.rs

pub mod export;
pub mod preset;
pub mod presets;
pub mod query;

use quackrun_core::QuackError;
use quackrun_core::infrastructure::config::{CliOverrides, Settings, load_config, resolve_settings};

use crate::cli::GlobalArgs;

/// Config file + environment + flags, resolved once per invocation.
pub fn load_settings(global: &GlobalArgs, output: Option<String>) -> Result<Settings, QuackError> {
    let cwd = std::env::current_dir()?;
    let file = load_config(&cwd, global.config.as_deref())?;
    let settings = resolve_settings(
        file,
        CliOverrides {
            db_path: global.db_path.clone(),
            output,
            read_only: global.read_only,
        },
    )?;
    Ok(settings)
}
