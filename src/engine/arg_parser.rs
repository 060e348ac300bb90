use clap::Parser;
use std::path::PathBuf;

/// Concurrent keyword scanner: find lines containing any keyword in files with matching extensions.
///
/// Every value is optional here so `.logscanner.toml` can fill the gaps; built-in defaults apply last.
#[derive(Clone, Debug, Parser)]
#[command(name = "logscanner")]
#[command(about = "Scan a directory tree for keywords and print matches as JSON.")]
pub struct Cli {
    /// Starting directory of the search. Default: `/`.
    #[arg(long, short = 'd', visible_alias = "startDir", value_name = "DIR")]
    pub start_dir: Option<PathBuf>,

    /// Comma-separated extensions to search. Default: `.log,.csv`.
    #[arg(long, short = 'e', value_name = "EXTS")]
    pub ext: Option<String>,

    /// Comma-separated keywords to search for (case-insensitive). Required.
    #[arg(long, short = 'k', value_name = "KEYWORDS")]
    pub keyword: Option<String>,

    /// Path to save the result. `.json` is appended if missing. Default: stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<String>,

    /// Number of workers processing files. Default: 8.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Verbose output (per-worker progress notices).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Show a counter of files scanned on stderr.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,
}
