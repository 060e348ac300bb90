//! Application configuration constants.
//! Defaults and tuning in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Optional config file looked up in the working directory (e.g. `.logscanner.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Defaults ----

/// Built-in values used when neither the CLI nor the config file sets an option.
pub struct ScanDefaults;

impl ScanDefaults {
    pub const START_DIR: &'static str = "/";
    pub const EXTENSIONS: &'static str = ".log,.csv";
    pub const WORKERS: usize = 8;
}

// ---- Pipeline ----

/// Path queue capacity. The walk blocks once this many paths are waiting on workers.
pub const PATH_CHANNEL_CAP: usize = 100;

/// Read buffer per open file in the scanner (bytes). 64 KB.
pub const SCAN_READ_BUFFER_SIZE: usize = 64 * 1024;

// ---- Output ----

/// Suffix forced onto the output path.
pub const OUTPUT_SUFFIX: &str = ".json";

/// Indent used by the pretty JSON writer.
pub const JSON_INDENT: &[u8] = b" ";
