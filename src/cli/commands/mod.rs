//! Command implementations.

pub mod cross;
pub mod scan;
pub mod score;

use crate::core::engine::{CancelToken, ScanEngine, ScanEvent};
use crate::models::prefs::Preferences;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run a scan with a live spinner fed by progress events and Ctrl-C wired to
/// the cancellation token.
pub(crate) async fn run_with_progress<T, F, Fut>(scan: F) -> crate::Result<T>
where
    F: FnOnce(ScanEngine, mpsc::UnboundedSender<ScanEvent>, CancelToken) -> Fut,
    Fut: Future<Output = crate::Result<T>>,
{
    let engine = ScanEngine::new();
    let cancel = CancelToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let ctrl_c_cancel = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancellation requested");
            ctrl_c_cancel.cancel();
        }
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let progress_spinner = spinner.clone();
    let progress_task = tokio::spawn(async move {
        while let Some(ScanEvent::Progress {
            path,
            folders_visited,
        }) = rx.recv().await
        {
            progress_spinner.set_message(format!(
                "{folders_visited} folders | {}",
                path.display()
            ));
        }
    });

    let result = scan(engine, tx, cancel).await;

    ctrl_c.abort();
    let _ = progress_task.await;
    spinner.finish_and_clear();

    result
}

/// Remember the scanned roots in the preference record. Preference write
/// failures are logged, never fatal.
pub(crate) fn save_last_paths<I: IntoIterator<Item = PathBuf>>(roots: I) {
    let mut prefs = Preferences::load();
    prefs.remember_paths(roots);
    if let Err(e) = prefs.save() {
        tracing::warn!("Failed to save preferences: {}", e);
    }
}
