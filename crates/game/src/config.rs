use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Env var pointing at an optional JSON run config. Unset means defaults.
pub const CONFIG_ENV_VAR: &str = "SIDESCROLL_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Seed for the stage RNG; a fixed seed makes the whole run replayable.
    pub seed: u64,
    /// Hard stop for headless runs.
    pub max_ticks: u64,
    /// Let the camera follow the player backwards instead of ratcheting.
    pub back_scroll_allowed: bool,
    /// Emit a progress line every this many ticks; zero disables them.
    pub log_every_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: 60 * 60 * 5,
            back_scroll_allowed: false,
            log_every_ticks: 600,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}' at {json_path}: {source}")]
    Parse {
        path: String,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the run config from `CONFIG_ENV_VAR`, falling back to defaults
/// when the variable is unset.
pub fn load_from_env() -> Result<RunConfig, ConfigError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => load_from_file(Path::new(&path)),
        Err(_) => Ok(RunConfig::default()),
    }
}

pub fn load_from_file(path: &Path) -> Result<RunConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&raw, path)
}

fn parse(raw: &str, path: &Path) -> Result<RunConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, RunConfig>(&mut deserializer).map_err(|error| {
        let json_path = error.path().to_string();
        ConfigError::Parse {
            path: path.display().to_string(),
            json_path: if json_path.is_empty() || json_path == "." {
                "<root>".to_string()
            } else {
                json_path
            },
            source: error.into_inner(),
        }
    })
}
