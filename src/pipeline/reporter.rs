//! Diagnostics sink for the scan: fire-and-forget progress and per-file error notices.

use log::{debug, warn};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::progress::{ProgressBar, finish_bar, update_progress_bar};

/// Receives scan diagnostics from workers. Implementations must not block or fail the scan.
pub trait ScanReporter: Send + Sync {
    /// Worker `worker` picked up `path`.
    fn processing(&self, worker: usize, path: &Path);
    /// `path` could not be opened, or reading stopped early.
    fn file_error(&self, path: &Path, err: &io::Error);
    /// Worker `worker` finished `path` (successfully or not).
    fn finished(&self, _worker: usize, _path: &Path) {}
}

/// Drops everything. For library callers that only want the outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentReporter;

impl ScanReporter for SilentReporter {
    fn processing(&self, _worker: usize, _path: &Path) {}
    fn file_error(&self, _path: &Path, _err: &io::Error) {}
}

/// Reporter used by the CLI: notices through `log`, optional files-scanned counter.
#[derive(Default)]
pub struct LogReporter {
    bar: Option<ProgressBar>,
    done: AtomicUsize,
    errors: AtomicUsize,
}

impl LogReporter {
    pub fn new(bar: Option<ProgressBar>) -> Self {
        Self {
            bar,
            ..Default::default()
        }
    }

    /// Files that hit an open/read error so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Finish the counter (if any) with the final file count.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            finish_bar(bar, self.done.load(Ordering::Relaxed));
        }
    }
}

impl ScanReporter for LogReporter {
    fn processing(&self, worker: usize, path: &Path) {
        debug!("[worker {}] processing {}", worker, path.display());
    }

    fn file_error(&self, path: &Path, err: &io::Error) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        warn!("{}: {}", path.display(), err);
    }

    fn finished(&self, _worker: usize, _path: &Path) {
        self.done.fetch_add(1, Ordering::Relaxed);
        if let Some(bar) = &self.bar {
            update_progress_bar(bar, 1);
        }
    }
}
