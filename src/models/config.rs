//! Scan configuration model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default video extension allow-list.
const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "m4v"];

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Case-insensitive video extension allow-list, without leading dots.
    pub video_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    /// Validate the extension allow-list.
    ///
    /// The list must be non-empty and every entry must be a non-empty
    /// alphanumeric token without a leading dot.
    pub fn validate(&self) -> Result<()> {
        if self.video_extensions.is_empty() {
            return Err(Error::InvalidExtensionConfig(
                "extension list is empty".to_string(),
            ));
        }
        for ext in &self.video_extensions {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(Error::InvalidExtensionConfig(format!(
                    "invalid extension entry: '{ext}'"
                )));
            }
        }
        Ok(())
    }

    /// Check if a path has a recognized video extension (case-insensitive).
    pub fn is_video_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .map(|e| self.video_extensions.iter().any(|v| v.eq_ignore_ascii_case(&e)))
            .unwrap_or(false)
    }
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dupe_detector")
}

/// Load scan configuration from the user config file, falling back to the
/// defaults when no file exists. A present but malformed file fails fast.
pub fn load_config() -> Result<ScanConfig> {
    let config_path = config_dir().join("config.toml");

    if !config_path.exists() {
        return Ok(ScanConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;
    let config: ScanConfig = toml::from_str(&content)
        .map_err(|e| Error::InvalidExtensionConfig(format!("{}: {e}", config_path.display())))?;
    config.validate()?;
    Ok(config)
}
