//! Walk loop: consumes walk results, sends qualifying file paths to path_tx, stops on first error.

use anyhow::anyhow;
use crossbeam_channel::Sender;
use log::debug;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

use crate::engine::has_allowed_extension;

use super::context::PipelineContext;

/// One result from a directory walk: a regular file to consider, a non-file entry, or an error.
pub enum WalkOutcome {
    File(PathBuf),
    Other,
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`]. With `follow_links`, links resolve to their
/// target's type; otherwise a symlink is never a regular file.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_file() => WalkOutcome::File(entry.into_path()),
        Ok(_) => WalkOutcome::Other,
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .into_iter()
            .map(to_outcome_walkdir),
    )
}

pub fn spawn_walk_thread(path_tx: Sender<PathBuf>, ctx: PipelineContext) -> JoinHandle<usize> {
    thread::spawn(move || {
        let iter = walkdir_iter(&ctx);
        run_walk_loop(path_tx, ctx, iter)
    })
}

/// Run the walk loop: consume `iter`, send files whose name passes the extension filter to
/// `path_tx`. The first error (or a cancel request) is stored in `ctx.first_error` and ends the
/// walk. `path_tx` is dropped on return, which closes the queue for the workers.
/// Returns the count of paths sent.
pub fn run_walk_loop<I>(path_tx: Sender<PathBuf>, ctx: PipelineContext, iter: I) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        if ctx.cancel.load(Ordering::Relaxed) {
            record_first_error(&ctx, anyhow!("scan cancelled"));
            break;
        }
        match outcome {
            WalkOutcome::File(path) => {
                let allowed = path
                    .file_name()
                    .map(|n| has_allowed_extension(&n.to_string_lossy(), &ctx.extensions))
                    .unwrap_or(false);
                if !allowed {
                    continue;
                }
                if path_tx.send(path).is_err() {
                    break;
                }
                count += 1;
            }
            WalkOutcome::Other => {}
            WalkOutcome::Err { msg, path } => {
                let err = match path {
                    Some(p) => anyhow!("walk {}: {}", p.display(), msg),
                    None => anyhow!("walk {}: {}", ctx.root.display(), msg),
                };
                record_first_error(&ctx, err);
                break;
            }
        }
    }
    debug!("walk: done, {} paths queued", count);
    drop(path_tx);
    count
}

fn record_first_error(ctx: &PipelineContext, err: anyhow::Error) {
    let mut slot = ctx
        .first_error
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    slot.get_or_insert(err);
}
