//! Directory enumeration stage.
//!
//! The only filesystem-touching stage of the pipeline: walks one library root
//! and emits a plain file listing per movie folder. Grouping into domain
//! entities happens afterwards in [`crate::core::grouper`], which keeps that
//! stage testable on in-memory listings.

use crate::core::engine::ScanControl;
use crate::models::config::ScanConfig;
use crate::models::media::ScanWarning;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file discovered inside a movie folder.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Raw listing of one movie folder: a direct child directory of the root,
/// with every recognized video file found beneath it (nested included).
#[derive(Debug, Clone)]
pub struct FolderListing {
    pub path: PathBuf,
    pub name: String,
    pub files: Vec<FileEntry>,
}

/// Result of enumerating one library root.
#[derive(Debug, Default)]
pub struct Enumeration {
    /// Listings for all movie folders, sorted by path.
    pub folders: Vec<FolderListing>,
    /// Subtrees skipped due to read errors.
    pub warnings: Vec<ScanWarning>,
    /// Whether cancellation cut the walk short.
    pub cancelled: bool,
    /// Movie folders visited, including the offset carried across roots.
    pub folders_visited: usize,
}

/// Check that a root exists and is a directory, before any walking starts.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.display().to_string()));
    }
    Ok(())
}

/// Enumerate the movie folders of one library root.
///
/// Movie folder boundary: each direct child directory of the root. Files are
/// matched against the configured extension allow-list, case-insensitive.
/// Unreadable entries are recorded as warnings and never abort the walk.
/// Cancellation is observed at each directory boundary; the listing built so
/// far is returned with `cancelled` set.
pub fn enumerate_library(
    root: &Path,
    config: &ScanConfig,
    ctl: &ScanControl,
    visited_offset: usize,
) -> Result<Enumeration> {
    validate_root(root)?;

    let mut movie_dirs: Vec<PathBuf> = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            Error::PermissionDenied(root.display().to_string())
        }
        _ => Error::Io(e),
    })?;

    let mut result = Enumeration {
        folders_visited: visited_offset,
        ..Enumeration::default()
    };

    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_dir() {
                    movie_dirs.push(path);
                }
            }
            Err(e) => {
                result.warnings.push(ScanWarning {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // Sorted walk order keeps reports reproducible across runs.
    movie_dirs.sort();

    for dir in movie_dirs {
        if ctl.cancel.is_cancelled() {
            result.cancelled = true;
            break;
        }

        result.folders_visited += 1;
        ctl.report(&dir, result.folders_visited);

        if let Some(listing) = walk_movie_folder(&dir, config, ctl, &mut result) {
            result.folders.push(listing);
        }

        if result.cancelled {
            break;
        }
    }

    result.folders.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(result)
}

/// Collect recognized video files beneath one movie folder.
///
/// Returns `None` when the folder itself is unreadable and nothing was
/// collected: such a folder appears in the warnings, not in the inventory.
fn walk_movie_folder(
    dir: &Path,
    config: &ScanConfig,
    ctl: &ScanControl,
    result: &mut Enumeration,
) -> Option<FolderListing> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut files: Vec<FileEntry> = Vec::new();
    let mut root_unreadable = false;

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf());
                if path == dir {
                    root_unreadable = true;
                }
                tracing::warn!("Skipping unreadable entry {}: {}", path.display(), e);
                result.warnings.push(ScanWarning {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            if ctl.cancel.is_cancelled() {
                result.cancelled = true;
                break;
            }
            continue;
        }

        if !entry.file_type().is_file() || !config.is_video_file(entry.path()) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => files.push(FileEntry {
                path: entry.path().to_path_buf(),
                size: metadata.len(),
            }),
            Err(e) => {
                result.warnings.push(ScanWarning {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if root_unreadable && files.is_empty() {
        return None;
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    Some(FolderListing {
        path: dir.to_path_buf(),
        name,
        files,
    })
}
