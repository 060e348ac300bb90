//! CLI command handler: resolve options, scan, emit JSON.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::arg_parser::Cli;
use crate::engine::output::emit;
use crate::engine::progress::{create_counter, refresh_bar};
use crate::pipeline::LogReporter;
use crate::utils::config::ScanDefaults;
use crate::utils::logscanner_toml::LogscannerToml;
use crate::utils::{apply_file_to_opts, load_logscanner_toml, setup_logging};
use crate::{Opts, scan_dir_cancellable};

/// Overwrite opts field from CLI when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $cli.$field.clone() {
            $opts.$field = v;
        }
    };
}

/// Build options: built-in defaults, then the config file (if any), then CLI flags.
pub fn resolve_opts(cli: &Cli, file: Option<&LogscannerToml>) -> Opts {
    let mut opts = Opts {
        start_dir: PathBuf::from(ScanDefaults::START_DIR),
        ext: ScanDefaults::EXTENSIONS.to_string(),
        workers: ScanDefaults::WORKERS,
        ..Default::default()
    };
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_cli_opt!(cli, opts, start_dir);
    apply_cli_opt!(cli, opts, ext);
    apply_cli_opt!(cli, opts, keyword);
    if let Some(ref p) = cli.output {
        opts.output = (!p.is_empty()).then(|| PathBuf::from(p));
    }
    apply_cli_opt!(cli, opts, workers);
    apply_cli_opt!(cli, opts, follow_links);
    apply_cli_opt!(cli, opts, verbose);
    apply_cli_opt!(cli, opts, progress);
    opts
}

/// Run a scan and emit the result. Matches gathered before a traversal error are still emitted;
/// the traversal error is returned afterwards so the process exits non-zero.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let file = match std::env::current_dir() {
        Ok(cwd) => load_logscanner_toml(&cwd),
        Err(_) => Ok(None),
    };
    let opts = resolve_opts(cli, file.as_ref().ok().and_then(Option::as_ref));
    setup_logging(opts.verbose);
    if let Err(e) = &file {
        warn!("ignoring config file: {:#}", e);
    }
    let request = opts.to_request()?;

    info!(
        "Searching files in '{}' with extensions {:?} and keywords {:?} ({} workers)",
        request.start_dir().display(),
        request.extensions(),
        request.keywords(),
        request.workers()
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        cancel_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    let bar = opts.progress.then(|| {
        let b = create_counter("Scanning");
        refresh_bar(&b);
        b
    });
    let reporter = Arc::new(LogReporter::new(bar));
    let outcome = scan_dir_cancellable(&request, reporter.clone(), cancel);
    reporter.finish();

    if reporter.error_count() > 0 {
        warn!(
            "{} files could not be read completely",
            reporter.error_count()
        );
    }
    debug!(
        "{} files scanned, {} matches",
        outcome.files_scanned,
        outcome.matches.len()
    );

    if let Some(path) = emit(&outcome.matches, opts.output.as_deref())? {
        info!("Results written to {}", path.display());
    }
    match outcome.error {
        Some(e) => Err(e.context("error scanning")),
        None => Ok(()),
    }
}
