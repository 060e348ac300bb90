//! Logscanner: concurrent keyword search over a directory tree, reported as JSON.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use pipeline::{LogReporter, ScanReporter, SilentReporter};

use log::debug;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Result alias used by public logscanner API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Scan the request's start directory and return every match plus the traversal error, if any.
///
/// Per-file open/read failures go to `reporter` and never show up in [`ScanOutcome::error`].
///
/// ```ignore
/// let req = ScanRequest::new("/var/log", vec![".log".into()], vec!["error".into()], 4)?;
/// let outcome = logscanner::scan_dir(&req, Arc::new(SilentReporter));
/// ```
pub fn scan_dir(request: &ScanRequest, reporter: Arc<dyn ScanReporter>) -> ScanOutcome {
    scan_dir_cancellable(request, reporter, Arc::new(AtomicBool::new(false)))
}

/// Same as [`scan_dir`], but the walk stops early once `cancel` is set. Workers still drain
/// whatever was already queued, and the outcome carries a "scan cancelled" error.
pub fn scan_dir_cancellable(
    request: &ScanRequest,
    reporter: Arc<dyn ScanReporter>,
    cancel: Arc<AtomicBool>,
) -> ScanOutcome {
    debug!(
        "{} REQUEST:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        request
    );
    pipeline::collect_matches(request, reporter, cancel)
}
