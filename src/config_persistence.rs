use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{sanitize_config, Config};
use crate::error::ConfigError;

const CONFIG_DIR_NAME: &str = "brennan-skill";
const CONFIG_FILE_NAME: &str = "config.toml";

pub fn system_config_template_text() -> &'static str {
    include_str!("../config/config.system.toml")
}

/// Default config location under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Writes the system template to `path` when no config file exists yet.
pub fn ensure_config_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    let io_error = |source: std::io::Error| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    info!(
        "Config file not found. Creating default config. path={}",
        path.display()
    );
    std::fs::write(path, system_config_template_text()).map_err(io_error)
}

pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(sanitize_config(parsed))
}

/// Loads the config at `path`, creating it first if missing. Falls back to
/// defaults when the file cannot be created, read, or parsed.
pub fn load_config_file(path: &Path) -> Config {
    if let Err(err) = ensure_config_file(path) {
        warn!("{}. Using default config.", err);
        return Config::default();
    }
    match read_config_file(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{}. Using default config.", err);
            Config::default()
        }
    }
}
