//! # Configuration Module
//!
//! Composer settings and where they live on disk.
//!
//! The scales are data, not code: switching the piece to another key means
//! editing a JSON file, not recompiling. Settings are looked up in the
//! platform config directory:
//! - Linux: `~/.config/tweetsong/config.json`
//! - macOS: `~/Library/Application Support/tweetsong/config.json`
//! - Windows: `%APPDATA%\tweetsong\config.json`
//!
//! A missing file means defaults. Every field is optional in the file.

use crate::composition::DEFAULT_TRACK_NAME;
use crate::scale::ScaleSet;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings that shape a composition without changing the algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Name written into the encoded file.
    pub track_name: String,
    /// One scale per metric channel.
    pub scales: ScaleSet,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            track_name: DEFAULT_TRACK_NAME.to_string(),
            scales: ScaleSet::default(),
        }
    }
}

impl ComposerConfig {
    /// Parse and validate a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON for this
    /// structure, or declares an empty scale.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config
            .scales
            .validate()
            .with_context(|| format!("Invalid scale in {}", path.display()))?;
        Ok(config)
    }
}

/// Returns the platform-appropriate config file path.
///
/// Does not create anything; the file is optional.
///
/// # Errors
///
/// Returns an error if the system config directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use tweetsong::config::get_config_path;
///
/// let path = get_config_path()?;
/// println!("Config location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config explicitly instead."
        )
    })?;

    Ok(config_dir.join("tweetsong").join("config.json"))
}

/// Resolve the configuration for this run.
///
/// An explicit path must exist. Without one, the default path is used when
/// present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ComposerConfig> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return ComposerConfig::from_file(path);
    }

    match get_config_path() {
        Ok(path) if path.is_file() => {
            info!("Loading config from {}", path.display());
            ComposerConfig::from_file(&path)
        }
        Ok(path) => {
            debug!("No config at {}, using defaults", path.display());
            Ok(ComposerConfig::default())
        }
        Err(e) => {
            debug!("{e}; using defaults");
            Ok(ComposerConfig::default())
        }
    }
}
