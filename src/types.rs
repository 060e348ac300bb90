//! Public and internal types for the logscanner API and pipeline.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One matching line. Serialized as `{"file": ..., "line": ..., "text": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Path of the file as produced by the walk (rooted at the start directory).
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// Raw line content with the line terminator stripped.
    pub text: String,
}

/// What to scan and how. Built once, immutable for the duration of a scan.
///
/// Only [`ScanRequest::new`] builds one, so the non-empty invariants hold for every request.
#[derive(Clone, Debug)]
pub struct ScanRequest {
    start_dir: PathBuf,
    /// Allowed file name suffixes (case-sensitive), e.g. `.log`.
    extensions: Vec<String>,
    /// Keywords matched case-insensitively as substrings of each line.
    keywords: Vec<String>,
    /// Number of concurrent scan workers (at least 1).
    workers: usize,
    follow_links: bool,
}

impl ScanRequest {
    /// Validate and build a request. Fails when extensions or keywords are empty (or contain an
    /// empty entry) or `workers` is 0.
    pub fn new(
        start_dir: impl Into<PathBuf>,
        extensions: Vec<String>,
        keywords: Vec<String>,
        workers: usize,
    ) -> Result<Self> {
        if extensions.is_empty() || keywords.is_empty() {
            bail!("you must specify both extensions and keywords");
        }
        if extensions.iter().chain(&keywords).any(|s| s.is_empty()) {
            bail!("extensions and keywords must not contain empty entries");
        }
        if workers == 0 {
            bail!("worker count must be at least 1");
        }
        Ok(Self {
            start_dir: start_dir.into(),
            extensions,
            keywords,
            workers,
            follow_links: false,
        })
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Follow symbolic links during the walk.
    pub fn follow_links(&self) -> bool {
        self.follow_links
    }
}

/// Result of a scan: every match gathered plus the traversal error that ended the walk, if any.
///
/// Matches collected before a traversal error are still valid and are kept.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub matches: Vec<Match>,
    /// Number of files handed to workers.
    pub files_scanned: usize,
    pub error: Option<anyhow::Error>,
}

impl ScanOutcome {
    /// Plain `Result` view: `Err` when the walk failed, dropping partial matches.
    pub fn into_result(self) -> Result<Vec<Match>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.matches),
        }
    }
}

/// Full options (CLI + `.logscanner.toml`), before validation into a [`ScanRequest`].
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Root of the traversal.
    pub start_dir: PathBuf,
    /// Raw comma-separated extension list.
    pub ext: String,
    /// Raw comma-separated keyword list.
    pub keyword: String,
    /// Output file. When None, JSON goes to stdout.
    pub output: Option<PathBuf>,
    /// Worker pool size.
    pub workers: usize,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Debug-level logging (per-worker notices).
    pub verbose: bool,
    /// Show a files-scanned counter on stderr.
    pub progress: bool,
}

impl Opts {
    /// Normalize the raw lists and validate into a [`ScanRequest`].
    pub fn to_request(&self) -> Result<ScanRequest> {
        let extensions = crate::engine::normalize_list(&self.ext);
        let keywords = crate::engine::normalize_list(&self.keyword);
        Ok(ScanRequest::new(self.start_dir.clone(), extensions, keywords, self.workers)?
            .with_follow_links(self.follow_links))
    }
}
