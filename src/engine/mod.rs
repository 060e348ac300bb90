//! Engine module: matching, file scanning, output, and the CLI glue around them

pub mod arg_parser;
pub mod cli;
pub mod matcher;
pub mod output;
pub mod progress;
pub mod scanner;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, resolve_opts};
pub use matcher::{KeywordMatcher, contains_any_keyword, has_allowed_extension, normalize_list};
pub use output::{emit, resolve_output_path, to_json, write_output};
pub use scanner::{FileMatches, scan_file};
