//! Background disk-usage computation.
//!
//! Recursive directory sizes are too slow for the draw path, so each
//! directory load kicks off one blocking task that walks the tree and
//! reports the total.  Results carry the generation they were started
//! for; stale generations (the user already navigated away) are ignored.

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;
use walkdir::WalkDir;

/// A finished disk-usage walk.
#[derive(Debug)]
pub struct DuUpdate {
    pub generation: u64,
    pub bytes: u64,
}

/// Walk `path` off the UI thread and send the summed file sizes.
pub fn spawn_disk_usage(path: PathBuf, generation: u64, tx: UnboundedSender<DuUpdate>) {
    tokio::task::spawn_blocking(move || {
        let bytes = WalkDir::new(&path)
            .into_iter()
            .flatten()
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .fold(0u64, |acc, meta| acc.saturating_add(meta.len()));

        tracing::debug!(path = %path.display(), bytes, generation, "disk usage ready");
        let _ = tx.send(DuUpdate { generation, bytes });
    });
}
