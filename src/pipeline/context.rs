//! Pipeline context: shared data passed into the walk thread and the channels between stages.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::ScanRequest;
use crate::pipeline::results::ResultSet;

/// Shared context for the walk. Built in `run_pipeline` and moved into the walk thread so the
/// walk loop has root, filters, and error/cancel state.
pub struct PipelineContext {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub follow_links: bool,
    /// Traversal error that stopped the walk. Set at most once.
    pub first_error: Arc<Mutex<Option<anyhow::Error>>>,
    pub cancel: Arc<AtomicBool>,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): join both sides, then read `results`.
pub struct PipelineHandles {
    /// Walk thread; returns the number of paths it queued.
    pub walk_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub results: Arc<ResultSet>,
    pub first_error: Arc<Mutex<Option<anyhow::Error>>>,
}

/// Path queue plus shared state. Walk thread gets `path_tx` and `ctx`; workers get `path_rx`.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub results: Arc<ResultSet>,
    pub first_error: Arc<Mutex<Option<anyhow::Error>>>,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(
    request: &ScanRequest,
    cancel: Arc<AtomicBool>,
    channel_cap: usize,
) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(channel_cap);
    let first_error: Arc<Mutex<Option<anyhow::Error>>> = Arc::new(Mutex::new(None));

    let ctx = PipelineContext {
        root: request.start_dir().to_path_buf(),
        extensions: request.extensions().to_vec(),
        follow_links: request.follow_links(),
        first_error: Arc::clone(&first_error),
        cancel,
    };

    PipelineChannels {
        path_tx,
        path_rx,
        results: Arc::new(ResultSet::new()),
        first_error,
        ctx,
    }
}
