// quackrun-core/src/infrastructure/config/project.rs

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::preset::QueryStep;
use crate::infrastructure::error::InfrastructureError;

const CANDIDATES: [&str; 2] = ["quackrun.yaml", "quackrun.yml"];

/// Optional `quackrun.yaml`. Every field may be omitted.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    pub output: Option<String>,
    #[serde(rename = "read-only", default)]
    pub read_only: bool,
    #[serde(default)]
    pub queries: BTreeMap<String, UserPreset>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UserPreset {
    #[serde(default)]
    pub description: String,
    pub steps: Vec<QueryStep>,
}

/// Load the configuration file.
///
/// An explicit path must exist. Without one, the working directory is
/// searched and a missing file yields the defaults.
#[instrument(skip(dir))]
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<ConfigFile, InfrastructureError> {
    let path = match explicit {
        Some(p) if p.exists() => p.to_path_buf(),
        Some(p) => {
            return Err(InfrastructureError::ConfigNotFound(
                p.display().to_string(),
            ));
        }
        None => match find_config(dir) {
            Some(p) => p,
            None => {
                debug!("No configuration file found, using defaults");
                return Ok(ConfigFile::default());
            }
        },
    };

    info!(path = ?path, "Loading configuration");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    // An empty file is valid and means "all defaults".
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml::from_str(&content)?;
    Ok(config)
}

fn find_config(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}
