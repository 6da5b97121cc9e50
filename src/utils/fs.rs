//! File system utilities and the deletion collaborator.
//!
//! Deletion lives outside the scan engine on purpose: the engine's role ends
//! at recommending what to delete. Callers run the batch here, then re-scan
//! or drop entries locally; the result model is never mutated in place.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteStatus {
    Deleted,
    NotFound,
    Failed(String),
}

/// Per-path deletion result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub path: PathBuf,
    pub status: DeleteStatus,
}

/// Delete a batch of files, reporting success or failure per path.
///
/// Failures never abort the batch and are never swallowed: every requested
/// path gets an entry in the returned list.
pub fn delete_files<I, P>(paths: I) -> Vec<DeleteOutcome>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(|p| {
            let path = p.into();
            let status = if !path.is_file() {
                DeleteStatus::NotFound
            } else {
                match std::fs::remove_file(&path) {
                    Ok(()) => DeleteStatus::Deleted,
                    Err(e) => {
                        tracing::warn!("Failed to delete {}: {}", path.display(), e);
                        DeleteStatus::Failed(e.to_string())
                    }
                }
            };
            DeleteOutcome { path, status }
        })
        .collect()
}

/// Total size of the given files, skipping any that cannot be read.
pub fn total_size<'a, I: IntoIterator<Item = &'a Path>>(paths: I) -> u64 {
    paths
        .into_iter()
        .filter_map(|p| std::fs::metadata(p).ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}

/// Convert a size in bytes to a human-readable string.
pub fn format_file_size(size_bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let size = size_bytes as f64;
    if size < KB {
        format!("{size_bytes} B")
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else if size < GB {
        format!("{:.1} MB", size / MB)
    } else {
        format!("{:.2} GB", size / GB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_delete_files_reports_per_path() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("movie.mkv");
        std::fs::write(&existing, "fake video").unwrap();
        let missing = dir.path().join("gone.mkv");

        let outcomes = delete_files([existing.clone(), missing.clone()]);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].status, DeleteStatus::Deleted);
        assert!(!existing.exists());
        assert_eq!(outcomes[1].status, DeleteStatus::NotFound);
    }

    #[test]
    fn test_delete_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let outcomes = delete_files([dir.path().to_path_buf()]);
        assert_eq!(outcomes[0].status, DeleteStatus::NotFound);
    }

    #[test]
    fn test_total_size_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.mkv");
        std::fs::write(&a, vec![0u8; 1000]).unwrap();
        let missing = dir.path().join("missing.mkv");

        let total = total_size([a.as_path(), missing.as_path()]);
        assert_eq!(total, 1000);
    }
}
