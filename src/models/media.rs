//! Media-related data models.
//!
//! All entities are produced fresh on each scan invocation and rebuilt on the
//! next one; nothing here persists across scans.

use crate::core::quality::QualityScore;
use crate::core::title::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Video file information collected during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// File size in bytes.
    pub size: u64,
    /// Parent directory, kept for display only.
    pub parent_dir: PathBuf,
}

/// A scored video file inside a movie folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCandidate {
    pub file: VideoFile,
    /// Quality score derived from the filename and size.
    pub score: QualityScore,
    /// Whether the selector picked this file as the one to keep.
    pub recommended: bool,
}

/// A directory holding one movie title, directly under a library root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieFolder {
    /// Full path to the folder.
    pub path: PathBuf,
    /// Folder name (last path component).
    pub name: String,
    /// Library root this folder belongs to.
    pub library_root: PathBuf,
    /// Video files found inside, nested subfolders included, sorted by path.
    pub files: Vec<FileCandidate>,
    /// Combined size of all video files, in bytes.
    pub total_size: u64,
    /// Folder-level score derived from the folder name and total size.
    pub score: QualityScore,
}

impl MovieFolder {
    /// A folder is a duplicate candidate when it holds 2+ recognized videos.
    pub fn is_duplicate_candidate(&self) -> bool {
        self.files.len() >= 2
    }

    /// The recommended file, if the selector marked one.
    pub fn recommended_file(&self) -> Option<&FileCandidate> {
        self.files.iter().find(|f| f.recommended)
    }
}

/// A scored movie folder inside a cross-library duplicate group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderCandidate {
    pub folder: MovieFolder,
    /// Whether the selector picked this folder as the one to keep.
    pub recommended: bool,
}

/// A set of 2+ folders believed to represent the same movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Immutable grouping key: canonical "title (year)" in fuzzy mode, the
    /// normalized raw folder name in exact mode.
    pub key: String,
    /// Members, from any combination of library roots.
    pub members: Vec<FolderCandidate>,
}

/// A subtree skipped during traversal, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// The whole tree was traversed.
    Completed,
    /// Cancellation was observed mid-walk; results are partial.
    Cancelled,
}

/// Result of scanning a single library root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryScanReport {
    pub root: PathBuf,
    /// Inventory of every movie folder found, sorted by path.
    pub folders: Vec<MovieFolder>,
    /// Subtrees skipped due to read errors.
    pub warnings: Vec<ScanWarning>,
    pub status: ScanStatus,
    /// Movie folders visited during traversal.
    pub folders_visited: usize,
}

impl LibraryScanReport {
    /// Folders holding 2+ video files, the intra-library duplicate set.
    pub fn duplicate_folders(&self) -> impl Iterator<Item = &MovieFolder> {
        self.folders.iter().filter(|f| f.is_duplicate_candidate())
    }
}

/// Result of matching movie folders across several library roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossScanReport {
    pub roots: Vec<PathBuf>,
    pub mode: MatchMode,
    /// Duplicate groups, sorted by key.
    pub groups: Vec<DuplicateGroup>,
    pub warnings: Vec<ScanWarning>,
    pub status: ScanStatus,
    pub folders_visited: usize,
}
