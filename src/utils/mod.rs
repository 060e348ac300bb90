pub mod config;
pub mod logger;
pub mod logscanner_toml;

pub use config::*;
pub use logger::setup_logging;
pub use logscanner_toml::{apply_file_to_opts, load_logscanner_toml};
