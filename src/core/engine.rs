//! Scan orchestration.
//!
//! Runs each scan as a single background task, reporting incremental progress
//! over a one-directional channel and honoring cooperative cancellation at
//! directory boundaries. Only one scan per engine runs at a time; a second
//! request while one is in flight is rejected.

use crate::core::title::MatchMode;
use crate::core::{grouper, matcher, scanner};
use crate::models::config::ScanConfig;
use crate::models::media::{
    CrossScanReport, LibraryScanReport, MovieFolder, ScanStatus, ScanWarning,
};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Progress event emitted while a scan walks the tree.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    Progress {
        /// Movie folder currently being walked.
        path: PathBuf,
        /// Movie folders visited so far across all roots.
        folders_visited: usize,
    },
}

/// Cooperative cancellation signal shared between caller and scan task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The scan stops at the next directory boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress sink and cancellation token handed down into the traversal.
#[derive(Debug)]
pub struct ScanControl {
    pub cancel: CancelToken,
    pub progress: Option<UnboundedSender<ScanEvent>>,
}

impl ScanControl {
    pub fn new(cancel: CancelToken, progress: Option<UnboundedSender<ScanEvent>>) -> Self {
        Self { cancel, progress }
    }

    /// A control with no progress sink and a token nobody cancels.
    pub fn detached() -> Self {
        Self::new(CancelToken::new(), None)
    }

    pub(crate) fn report(&self, path: &Path, folders_visited: usize) {
        if let Some(tx) = &self.progress {
            // The receiver may be gone; progress is best-effort.
            let _ = tx.send(ScanEvent::Progress {
                path: path.to_path_buf(),
                folders_visited,
            });
        }
    }
}

/// Releases the engine's busy flag when the scan task finishes.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Scan engine enforcing one scan in flight at a time.
///
/// Each scan owns its own result tree; no state is shared between scans
/// beyond the busy flag.
#[derive(Debug, Default)]
pub struct ScanEngine {
    busy: Arc<AtomicBool>,
}

impl ScanEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one library root for movie folders holding duplicate files.
    ///
    /// Fails fast when the root is missing or the extension config is
    /// invalid. Unreadable subtrees become warnings; cancellation mid-walk
    /// yields partial results with `ScanStatus::Cancelled`.
    pub async fn scan_single_library(
        &self,
        root: PathBuf,
        config: ScanConfig,
        progress: Option<UnboundedSender<ScanEvent>>,
        cancel: CancelToken,
    ) -> Result<LibraryScanReport> {
        let guard = self.acquire(&cancel)?;
        config.validate()?;

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let ctl = ScanControl::new(cancel, progress);
            let enumeration = scanner::enumerate_library(&root, &config, &ctl, 0)?;

            let folders = grouper::group_library(&root, enumeration.folders);
            let status = if enumeration.cancelled {
                ScanStatus::Cancelled
            } else {
                ScanStatus::Completed
            };

            tracing::info!(
                "Scanned {}: {} movie folders, {} duplicate candidates, {} warnings",
                root.display(),
                folders.len(),
                folders.iter().filter(|f| f.is_duplicate_candidate()).count(),
                enumeration.warnings.len()
            );

            Ok(LibraryScanReport {
                root,
                folders,
                warnings: enumeration.warnings,
                status,
                folders_visited: enumeration.folders_visited,
            })
        })
        .await
        .map_err(|e| Error::other(format!("Scan task failed: {e}")))?
    }

    /// Match movie folders across several library roots.
    ///
    /// Every top-level folder participates regardless of how many files it
    /// holds; a single-file folder in one library can still duplicate a
    /// multi-file folder in another.
    pub async fn scan_cross_library(
        &self,
        roots: Vec<PathBuf>,
        mode: MatchMode,
        config: ScanConfig,
        progress: Option<UnboundedSender<ScanEvent>>,
        cancel: CancelToken,
    ) -> Result<CrossScanReport> {
        let guard = self.acquire(&cancel)?;
        config.validate()?;

        // Validate every root up front so a bad path fails before any walk.
        for root in &roots {
            scanner::validate_root(root)?;
        }

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let ctl = ScanControl::new(cancel, progress);

            let mut all_folders: Vec<MovieFolder> = Vec::new();
            let mut warnings: Vec<ScanWarning> = Vec::new();
            let mut folders_visited = 0;
            let mut cancelled = false;

            for root in &roots {
                let enumeration =
                    scanner::enumerate_library(root, &config, &ctl, folders_visited)?;
                folders_visited = enumeration.folders_visited;
                warnings.extend(enumeration.warnings);
                all_folders.extend(grouper::group_library(root, enumeration.folders));
                if enumeration.cancelled {
                    cancelled = true;
                    break;
                }
            }

            let groups = matcher::match_folders(all_folders, mode);
            let status = if cancelled {
                ScanStatus::Cancelled
            } else {
                ScanStatus::Completed
            };

            tracing::info!(
                "Cross-library scan ({mode}) over {} roots: {} duplicate groups, {} warnings",
                roots.len(),
                groups.len(),
                warnings.len()
            );

            Ok(CrossScanReport {
                roots,
                mode,
                groups,
                warnings,
                status,
                folders_visited,
            })
        })
        .await
        .map_err(|e| Error::other(format!("Scan task failed: {e}")))?
    }

    fn acquire(&self, cancel: &CancelToken) -> Result<BusyGuard> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(Error::ScanInProgress);
        }
        Ok(BusyGuard(self.busy.clone()))
    }
}
