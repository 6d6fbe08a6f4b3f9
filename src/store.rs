//! Saved default-crosshair persistence
//!
//! The default crosshair lives as a structured-form JSON file under the
//! platform config directory. Loading always goes through the params
//! fallback resolution, so a file written by an older build with fewer
//! keys still loads cleanly.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CrosshairConfig;

/// Location of the saved default crosshair
pub fn config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(crate::constants::config::APP_DIR);
    path.push(crate::constants::config::DEFAULT_FILENAME);
    path
}

/// Write a crosshair to `path` as pretty-printed structured JSON
pub fn save_to(config: &CrosshairConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create config directory: {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(config)
        .context("Failed to serialize crosshair config to JSON")?;
    fs::write(path, contents)
        .context(format!("Failed to write config file to {}", path.display()))?;
    Ok(())
}

/// Read a crosshair from `path`; `Ok(None)` when no file exists
pub fn load_from(path: &Path) -> Result<Option<CrosshairConfig>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).context(format!("Failed to read config file {}", path.display()));
        }
    };
    let value: serde_json::Value = serde_json::from_str(&contents)
        .context(format!("Failed to parse config file {}", path.display()))?;
    let config = CrosshairConfig::from_structured(value)
        .context(format!("Invalid crosshair config in {}", path.display()))?;
    Ok(Some(config))
}

/// Save `config` as the default crosshair
pub fn save_default(config: &CrosshairConfig) -> Result<()> {
    let path = config_path();
    save_to(config, &path)?;
    info!(path = %path.display(), "Saved default crosshair");
    Ok(())
}

/// Load the saved default crosshair, if any
pub fn load_default() -> Result<Option<CrosshairConfig>> {
    load_from(&config_path())
}
