//! Subcommand implementations.

pub mod analyze;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use finrep_core::FinrepConfig;
use tracing::debug;

/// `<config dir>/finrep/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finrep")
        .join("config.json")
}

/// Config file in effect: the `--config` argument or the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit `--config` file must exist; the default location falls back
/// to built-in defaults when absent.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FinrepConfig> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let path = default_config_path();
    if path.exists() {
        read_config(&path)
    } else {
        debug!("No config at {}, using defaults", path.display());
        Ok(FinrepConfig::default())
    }
}

fn read_config(path: &Path) -> anyhow::Result<FinrepConfig> {
    debug!("Loading config from {}", path.display());
    FinrepConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
}
