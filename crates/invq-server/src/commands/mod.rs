pub mod config;
pub mod extract;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use invq_core::InvqConfig;

/// Platform config location, e.g. `~/.config/invq/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invq")
        .join("config.json")
}

/// The file named by `--config`, else the platform default.
pub fn config_file_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the file named by `--config`, else the default file if present,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvqConfig> {
    let path = config_file_path(config_path);
    if config_path.is_none() && !path.exists() {
        return Ok(InvqConfig::default());
    }

    InvqConfig::from_file(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
