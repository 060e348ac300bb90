//! Progress counter for files scanned (stderr).

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Uses try_lock so scan workers never wait on the bar; a skipped tick is caught up by the
/// final refresh.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Force a refresh of the bar (e.g. so counter shows "0 files" immediately).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.refresh();
    }
}

/// Set the final count and leave the cursor on a fresh line.
pub fn finish_bar(pb: &ProgressBar, total: usize) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.update_to(total);
        let _ = bar.refresh();
        eprintln!();
    }
}
