//! Intra-library grouping stage.
//!
//! Pure stage: takes the raw folder listings produced by the scanner and
//! builds scored domain entities. No filesystem access happens here, so the
//! whole stage is testable on hand-built listings.

use crate::core::quality;
use crate::core::scanner::FolderListing;
use crate::core::selector;
use crate::models::media::{FileCandidate, MovieFolder, VideoFile};
use std::path::Path;

/// Turn raw folder listings into scored movie folders.
///
/// Each file is scored from its own name and size. The folder aggregate is
/// the better of the folder-name score (with combined video size) and the
/// best contained file's score, so quality tags carried by either level
/// count. Folders with 2+ files get their best file marked as recommended.
pub fn group_library(root: &Path, listings: Vec<FolderListing>) -> Vec<MovieFolder> {
    let mut folders: Vec<MovieFolder> = listings
        .into_iter()
        .map(|listing| group_folder(root, listing))
        .collect();
    folders.sort_by(|a, b| a.path.cmp(&b.path));
    folders
}

fn group_folder(root: &Path, listing: FolderListing) -> MovieFolder {
    let mut files: Vec<FileCandidate> = listing
        .files
        .into_iter()
        .map(|entry| {
            let filename = entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let parent_dir = entry
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| listing.path.clone());
            let score = quality::score(&filename, entry.size);
            FileCandidate {
                file: VideoFile {
                    path: entry.path,
                    filename,
                    size: entry.size,
                    parent_dir,
                },
                score,
                recommended: false,
            }
        })
        .collect();

    if let Some(best) = selector::select_best(&files) {
        files[best].recommended = true;
    }

    let total_size: u64 = files.iter().map(|f| f.file.size).sum();
    let score = files
        .iter()
        .map(|f| f.score.clone())
        .fold(quality::score(&listing.name, total_size), |best, s| {
            if s.total > best.total {
                s
            } else {
                best
            }
        });

    MovieFolder {
        path: listing.path,
        name: listing.name,
        library_root: root.to_path_buf(),
        files,
        total_size,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::FileEntry;
    use std::path::PathBuf;

    const MB: u64 = 1024 * 1024;

    fn listing(folder: &str, files: &[(&str, u64)]) -> FolderListing {
        let path = PathBuf::from(folder);
        FolderListing {
            name: path.file_name().unwrap().to_string_lossy().to_string(),
            files: files
                .iter()
                .map(|(name, size)| FileEntry {
                    path: path.join(name),
                    size: *size,
                })
                .collect(),
            path,
        }
    }

    #[test]
    fn test_single_file_folder_has_no_recommendation() {
        let root = PathBuf::from("/library");
        let folders = group_library(
            &root,
            vec![listing("/library/Movie (2023)", &[("movie.mkv", 500 * MB)])],
        );
        assert_eq!(folders.len(), 1);
        assert!(!folders[0].is_duplicate_candidate());
        assert!(folders[0].recommended_file().is_none());
    }

    #[test]
    fn test_better_file_is_recommended() {
        let root = PathBuf::from("/library");
        let folders = group_library(
            &root,
            vec![listing(
                "/library/Movie1 (2023)",
                &[
                    ("Movie1.2023.1080p.BluRay.x265.HEVC.mkv", 500 * MB),
                    ("Movie1.2023.720p.WEB-DL.x264.mkv", 200 * MB),
                ],
            )],
        );

        let folder = &folders[0];
        assert!(folder.is_duplicate_candidate());
        let best = folder.recommended_file().unwrap();
        assert_eq!(best.file.filename, "Movie1.2023.1080p.BluRay.x265.HEVC.mkv");
        // Exactly one member carries the marker
        assert_eq!(folder.files.iter().filter(|f| f.recommended).count(), 1);
    }

    #[test]
    fn test_folder_total_size_and_score() {
        let root = PathBuf::from("/library");
        let folders = group_library(
            &root,
            vec![listing(
                "/library/Movie (2023) 1080p",
                &[("a.mkv", 60 * MB), ("b.mkv", 60 * MB)],
            )],
        );
        let folder = &folders[0];
        assert_eq!(folder.total_size, 120 * MB);
        // Folder score saturates size factor and sees the 1080p tag
        assert_eq!(folder.score.size_factor, 100.0);
        assert_eq!(folder.score.resolution_factor, 75.0);
    }

    #[test]
    fn test_best_file_signal_lifts_folder_score() {
        let root = PathBuf::from("/library");
        let folders = group_library(
            &root,
            vec![listing(
                "/library/Matrix 2160p 4K",
                &[("Matrix.2160p.4K.HEVC.mkv", 200 * MB)],
            )],
        );
        let folder = &folders[0];
        // The folder name carries no codec tag, but its file does.
        assert_eq!(folder.score.codec_factor, 100.0);
        assert_eq!(folder.score.total, folder.files[0].score.total);
    }

    #[test]
    fn test_folders_sorted_by_path() {
        let root = PathBuf::from("/library");
        let folders = group_library(
            &root,
            vec![
                listing("/library/Zulu", &[("z.mkv", MB)]),
                listing("/library/Alpha", &[("a.mkv", MB)]),
            ],
        );
        assert_eq!(folders[0].name, "Alpha");
        assert_eq!(folders[1].name, "Zulu");
    }
}
