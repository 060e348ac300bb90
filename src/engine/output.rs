//! JSON emission: serialize matches and write them to stdout or a file.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Match;
use crate::utils::config::{JSON_INDENT, OUTPUT_SUFFIX};

/// Serialize `matches` as a pretty-printed JSON array.
pub fn to_json(matches: &[Match]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    matches
        .serialize(&mut ser)
        .context("serialize matches to JSON")?;
    Ok(buf)
}

/// Append `.json` unless the path already ends with it.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.ends_with(OUTPUT_SUFFIX) {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{s}{OUTPUT_SUFFIX}"))
    }
}

/// Temp path next to `path` used for the atomic write.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.tmp"))
}

/// Write the whole buffer to `path` in one go: temp file first, then rename over the target.
/// Falls back to writing `path` directly when the temp file cannot be created.
pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    if fs::write(&temp_path, data).is_err() {
        let _ = fs::remove_file(&temp_path);
        return fs::write(path, data)
            .with_context(|| format!("write results to {}", path.display()));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| {
            format!(
                "atomic rename results to final path ({} -> {})",
                temp_path.display(),
                path.display()
            )
        });
    }
    Ok(())
}

/// Serialize and emit. `output: None` prints to stdout; otherwise writes to the resolved path,
/// which is returned.
pub fn emit(matches: &[Match], output: Option<&Path>) -> Result<Option<PathBuf>> {
    let mut data = to_json(matches)?;
    match output {
        Some(path) => {
            let path = resolve_output_path(path);
            write_output(&path, &data)?;
            Ok(Some(path))
        }
        None => {
            data.push(b'\n');
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data).context("write results to stdout")?;
            stdout.flush().context("flush stdout")?;
            Ok(None)
        }
    }
}
