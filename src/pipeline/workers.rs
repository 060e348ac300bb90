use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::{KeywordMatcher, scan_file};
use crate::pipeline::reporter::ScanReporter;
use crate::pipeline::results::ResultSet;

/// Single scan worker: take paths from path_rx until the queue is closed and drained, scan each
/// file to completion and append its matches to `results`.
fn scan_worker_loop(
    id: usize,
    path_rx: Receiver<PathBuf>,
    matcher: Arc<KeywordMatcher>,
    results: Arc<ResultSet>,
    reporter: Arc<dyn ScanReporter>,
) {
    while let Ok(path) = path_rx.recv() {
        reporter.processing(id, &path);
        if let Err(e) = scan_file(&path, &matcher, |m| results.append(m)) {
            reporter.file_error(&path, &e);
        }
        reporter.finished(id, &path);
    }
}

/// Spawn `num_workers` scan workers sharing `path_rx`. Each path is consumed by exactly one worker.
pub fn spawn_scan_workers(
    path_rx: Receiver<PathBuf>,
    keywords: &[String],
    results: &Arc<ResultSet>,
    reporter: &Arc<dyn ScanReporter>,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    let matcher = Arc::new(KeywordMatcher::new(keywords));
    (0..num_workers)
        .map(|id| {
            let path_rx = path_rx.clone();
            let matcher = Arc::clone(&matcher);
            let results = Arc::clone(results);
            let reporter = Arc::clone(reporter);
            thread::spawn(move || scan_worker_loop(id, path_rx, matcher, results, reporter))
        })
        .collect()
}
