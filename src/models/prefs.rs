//! User preference record.
//!
//! A small JSON file owned by the CLI layer: last-used library paths and the
//! theme name. The scan engine never reads or writes this.

use crate::models::config::config_dir;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted user preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Last-used library root paths, sorted.
    pub library_paths: Vec<String>,
    /// UI theme name.
    pub theme: String,
    /// When the record was last written.
    pub updated: chrono::DateTime<chrono::Utc>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            library_paths: Vec::new(),
            theme: "dark".to_string(),
            updated: chrono::Utc::now(),
        }
    }
}

impl Preferences {
    /// Path of the preference file.
    pub fn file_path() -> PathBuf {
        config_dir().join("preferences.json")
    }

    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable. A corrupted record is never a fatal error.
    pub fn load() -> Self {
        Self::load_from(&Self::file_path())
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save preferences to the user config directory.
    pub fn save(&mut self) -> Result<()> {
        self.save_to(&Self::file_path())
    }

    pub(crate) fn save_to(&mut self, path: &Path) -> Result<()> {
        self.library_paths.sort();
        self.updated = chrono::Utc::now();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Remember a set of library roots as the last-used paths.
    pub fn remember_paths<I: IntoIterator<Item = PathBuf>>(&mut self, roots: I) {
        self.library_paths = roots
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let mut prefs = Preferences::default();
        prefs.remember_paths([PathBuf::from("/b/movies"), PathBuf::from("/a/movies")]);
        prefs.theme = "light".to_string();
        prefs.save_to(&path).unwrap();

        let loaded = Preferences::load_from(&path);
        assert_eq!(loaded.theme, "light");
        // Paths come back sorted
        assert_eq!(loaded.library_paths, vec!["/a/movies", "/b/movies"]);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let prefs = Preferences::load_from(Path::new("/nonexistent/prefs.json"));
        assert_eq!(prefs.theme, "dark");
        assert!(prefs.library_paths.is_empty());
    }

    #[test]
    fn test_corrupted_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.theme, "dark");
    }
}
