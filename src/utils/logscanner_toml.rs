//! Load `.logscanner.toml` from a directory (CLI only). Lib callers build a `ScanRequest` directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct LogscannerToml {
    #[serde(default)]
    settings: ScanSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScanSection {
    start_dir: Option<String>,
    ext: Option<String>,
    keyword: Option<String>,
    output: Option<String>,
    workers: Option<usize>,
    follow_links: Option<bool>,
    verbose: Option<bool>,
    progress: Option<bool>,
}

/// Load the config file from `dir`. `Ok(None)` when there is no file; `Err` when it exists but
/// cannot be read or parsed, so the caller can report it once logging is up.
pub fn load_logscanner_toml(dir: &Path) -> Result<Option<LogscannerToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_logscanner_toml(&s)
        .map(Some)
        .with_context(|| format!("parse {}", path.display()))
}

pub fn parse_logscanner_toml(s: &str) -> std::result::Result<LogscannerToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$field = v.into();
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &LogscannerToml, opts: &mut Opts) {
    let section = &file.settings;
    apply_file_opt!(section, opts, start_dir);
    apply_file_opt!(section, opts, ext);
    apply_file_opt!(section, opts, keyword);
    if let Some(ref p) = section.output {
        opts.output = (!p.is_empty()).then(|| PathBuf::from(p));
    }
    apply_file_opt!(section, opts, workers);
    apply_file_opt!(section, opts, follow_links);
    apply_file_opt!(section, opts, verbose);
    apply_file_opt!(section, opts, progress);
}
