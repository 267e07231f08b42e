// quackrun-core/src/infrastructure/config/settings.rs

use std::path::PathBuf;
use tracing::info;

use crate::domain::config::RunnerConfig;
use crate::domain::preset::PresetCatalog;
use crate::error::QuackError;
use crate::infrastructure::config::project::ConfigFile;
use crate::infrastructure::error::InfrastructureError;

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<PathBuf>,
    pub output: Option<String>,
    pub read_only: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub runner: RunnerConfig,
    pub presets: PresetCatalog,
}

/// Layer the configuration: built-in defaults < config file < CLI/env.
pub fn resolve_settings(
    file: ConfigFile,
    overrides: CliOverrides,
) -> Result<Settings, QuackError> {
    let mut runner = RunnerConfig::default();

    if let Some(db_path) = overrides.db_path.or(file.database) {
        runner.db_path = db_path;
    }
    if let Some(output) = overrides.output.or(file.output) {
        if output.trim().is_empty() {
            return Err(InfrastructureError::ConfigError("output path cannot be empty".into()).into());
        }
        runner.output_path = output;
    }
    runner = runner.read_only(overrides.read_only || file.read_only);

    let mut presets = PresetCatalog::builtin(&runner.output_path);
    for (name, preset) in file.queries {
        presets.add_user(&name, &preset.description, preset.steps)?;
        info!(preset = %name, "User preset registered");
    }

    Ok(Settings { runner, presets })
}
