use anyhow::anyhow;
use log::debug;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use crate::pipeline::{self, ScanReporter};
use crate::utils::config::PATH_CHANNEL_CAP;
use crate::{ScanOutcome, ScanRequest};

/// Start the walk + scan pipeline. Returns handles; caller must join `walk_handle` and
/// `worker_handles` before reading `results`.
pub fn run_pipeline(
    request: &ScanRequest,
    reporter: Arc<dyn ScanReporter>,
    cancel: Arc<AtomicBool>,
) -> pipeline::PipelineHandles {
    let channels = pipeline::create_pipeline_channels(request, cancel, PATH_CHANNEL_CAP);

    let walk_handle = pipeline::spawn_walk_thread(channels.path_tx, channels.ctx);

    let worker_handles = pipeline::spawn_scan_workers(
        channels.path_rx,
        request.keywords(),
        &channels.results,
        &reporter,
        request.workers(),
    );

    pipeline::PipelineHandles {
        walk_handle,
        worker_handles,
        results: channels.results,
        first_error: channels.first_error,
    }
}

/// Main orchestrator: walk → path queue → scan workers → shared result set.
/// Returns once the walk has ended and every worker has drained the queue.
pub fn collect_matches(
    request: &ScanRequest,
    reporter: Arc<dyn ScanReporter>,
    cancel: Arc<AtomicBool>,
) -> ScanOutcome {
    let start = Instant::now();
    let pipeline::PipelineHandles {
        walk_handle,
        worker_handles,
        results,
        first_error,
    } = run_pipeline(request, reporter, cancel);

    // A panicked walk thread has already dropped its sender, so workers still exit.
    let walk_result = walk_handle.join();
    let mut panicked_workers = 0_usize;
    for h in worker_handles {
        if h.join().is_err() {
            panicked_workers += 1;
        }
    }

    let mut error = pipeline::take_traversal_error(&first_error);
    let files_scanned = match walk_result {
        Ok(n) => n,
        Err(_) => {
            error.get_or_insert_with(|| anyhow!("walk thread panicked"));
            0
        }
    };
    if panicked_workers > 0 {
        log::warn!("{} scan workers panicked", panicked_workers);
    }

    let matches = results.take();
    debug!(
        "scan: {} files, {} matches in {:?}",
        files_scanned,
        matches.len(),
        start.elapsed()
    );
    ScanOutcome {
        matches,
        files_scanned,
        error,
    }
}
