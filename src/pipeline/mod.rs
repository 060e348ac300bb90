//! Pipeline components: walk, path queue, scan workers, shared results, diagnostics.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod reporter;
pub mod results;
pub mod walk;
pub mod workers;

pub use context::{PipelineChannels, PipelineContext, PipelineHandles, create_pipeline_channels};
pub use error_handler::take_traversal_error;
pub use orchestrator::{collect_matches, run_pipeline};
pub use reporter::{LogReporter, ScanReporter, SilentReporter};
pub use results::ResultSet;
pub use walk::{WalkOutcome, run_walk_loop, spawn_walk_thread, to_outcome_walkdir};
pub use workers::spawn_scan_workers;
