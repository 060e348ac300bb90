//! Pipeline tests over real trees: walk, worker pool, per-file errors, traversal errors.

use anyhow::Result;
use logscanner::engine::{FileMatches, KeywordMatcher, scan_file};
use logscanner::pipeline::{
    WalkOutcome, create_pipeline_channels, run_walk_loop, spawn_scan_workers,
    take_traversal_error,
};
use logscanner::{Match, ScanReporter, ScanRequest, SilentReporter, scan_dir, scan_dir_cancellable};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tempfile::{TempDir, tempdir};

/// Records every notice so tests can inspect diagnostics.
#[derive(Default)]
struct CapturingReporter {
    processed: Mutex<Vec<(usize, PathBuf)>>,
    errors: Mutex<Vec<PathBuf>>,
}

impl ScanReporter for CapturingReporter {
    fn processing(&self, worker: usize, path: &Path) {
        self.processed
            .lock()
            .unwrap()
            .push((worker, path.to_path_buf()));
    }

    fn file_error(&self, path: &Path, _err: &io::Error) {
        self.errors.lock().unwrap().push(path.to_path_buf());
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn request(root: &Path, exts: &[&str], keywords: &[&str], workers: usize) -> ScanRequest {
    ScanRequest::new(root, strings(exts), strings(keywords), workers).unwrap()
}

fn file_str(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

fn as_set(matches: &[Match]) -> HashSet<Match> {
    matches.iter().cloned().collect()
}

/// Tree with matches spread over nested dirs and several extensions.
fn build_tree() -> Result<TempDir> {
    let dir = tempdir()?;
    let root = dir.path();
    fs::create_dir_all(root.join("app/nested/deeper"))?;
    fs::create_dir_all(root.join("db"))?;
    for i in 0..20 {
        let sub = if i % 2 == 0 { "app" } else { "app/nested/deeper" };
        let mut body = String::new();
        for j in 0..50 {
            if j % 7 == 0 {
                body.push_str(&format!("line {j} Error in file {i}\n"));
            } else {
                body.push_str(&format!("line {j} fine\n"));
            }
        }
        fs::write(root.join(sub).join(format!("f{i}.log")), body)?;
    }
    fs::write(root.join("db/export.csv"), "id,status\n1,ok\n2,error\n")?;
    fs::write(root.join("db/notes.txt"), "error but wrong extension\n")?;
    fs::write(root.join("db/UPPER.LOG"), "error in upper-case extension\n")?;
    Ok(dir)
}

#[test]
fn test_scenario_single_file_match() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("a.log");
    fs::write(&path, "hello\nERROR: disk full\nok\n")?;

    let outcome = scan_dir(
        &request(dir.path(), &[".log"], &["error"], 4),
        Arc::new(SilentReporter),
    );
    assert!(outcome.error.is_none());
    assert_eq!(outcome.files_scanned, 1);
    assert_eq!(
        outcome.matches,
        vec![Match {
            file: file_str(path),
            line: 2,
            text: "ERROR: disk full".to_string(),
        }]
    );
    Ok(())
}

#[test]
fn test_crlf_and_missing_trailing_newline() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("win.log");
    fs::write(&path, "first error\r\nsecond\r\nthird\r\nlast Error")?;

    let matcher = KeywordMatcher::new(&strings(&["error"]));
    let mut matches = Vec::new();
    let count = scan_file(&path, &matcher, |m| matches.push(m))?;
    assert_eq!(count, 2);
    let got: Vec<(usize, &str)> = matches.iter().map(|m| (m.line, m.text.as_str())).collect();
    assert_eq!(got, vec![(1, "first error"), (4, "last Error")]);
    Ok(())
}

#[test]
fn test_empty_file_has_no_matches() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.log");
    fs::write(&path, "")?;

    let matcher = KeywordMatcher::new(&strings(&["error"]));
    let mut iter = FileMatches::open(&path, &matcher)?;
    assert!(iter.next().is_none());
    assert_eq!(iter.lines_read(), 0);
    Ok(())
}

#[test]
fn test_line_numbers_count_non_matching_lines() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("n.log");
    fs::write(&path, "a\n\nb\nerror here\n\nERROR again\n")?;

    let matcher = KeywordMatcher::new(&strings(&["error"]));
    let iter = FileMatches::open(&path, &matcher)?;
    let lines: Vec<usize> = iter.map(|m| m.unwrap().line).collect();
    assert_eq!(lines, vec![4, 6]);
    Ok(())
}

#[test]
fn test_binary_content_scans_as_text() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("blob.log");
    fs::write(&path, b"\xff\xfe\x00error\x00\n\x01\x02\n")?;

    let matcher = KeywordMatcher::new(&strings(&["error"]));
    let mut matches = Vec::new();
    scan_file(&path, &matcher, |m| matches.push(m))?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 1);
    Ok(())
}

#[test]
fn test_missing_file_reports_open_error() {
    let matcher = KeywordMatcher::new(&strings(&["error"]));
    let mut matches = Vec::new();
    let err = scan_file(Path::new("/nonexistent-logscanner/x.log"), &matcher, |m| {
        matches.push(m)
    })
    .unwrap_err();
    assert!(matches.is_empty());
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_extension_filter_applies_to_files_only() -> Result<()> {
    let dir = build_tree()?;
    // A directory whose name carries an allowed extension is walked, not scanned.
    fs::create_dir_all(dir.path().join("dir.log"))?;
    fs::write(dir.path().join("dir.log/inner.log"), "error inside\n")?;

    let outcome = scan_dir(
        &request(dir.path(), &[".log", ".csv"], &["error"], 4),
        Arc::new(SilentReporter),
    );
    assert!(outcome.error.is_none());
    let files: HashSet<String> = outcome.matches.iter().map(|m| m.file.clone()).collect();
    assert!(files.contains(&file_str(dir.path().join("db/export.csv"))));
    assert!(files.contains(&file_str(dir.path().join("dir.log/inner.log"))));
    assert!(!files.contains(&file_str(dir.path().join("db/notes.txt"))));
    assert!(!files.contains(&file_str(dir.path().join("db/UPPER.LOG"))));
    // 20 logs + export.csv + inner.log
    assert_eq!(outcome.files_scanned, 22);
    Ok(())
}

#[test]
fn test_every_matching_line_found() -> Result<()> {
    let dir = build_tree()?;
    let outcome = scan_dir(
        &request(dir.path(), &[".log"], &["error"], 3),
        Arc::new(SilentReporter),
    );
    assert!(outcome.error.is_none());
    // 50 lines per file, j % 7 == 0 -> 8 matches per file.
    assert_eq!(outcome.matches.len(), 20 * 8);
    for m in &outcome.matches {
        assert_eq!((m.line - 1) % 7, 0, "unexpected line {} in {}", m.line, m.file);
        assert!(m.text.contains("Error"));
    }
    Ok(())
}

#[test]
fn test_worker_count_does_not_change_results() -> Result<()> {
    let dir = build_tree()?;
    let single = scan_dir(
        &request(dir.path(), &[".log", ".csv"], &["error"], 1),
        Arc::new(SilentReporter),
    );
    for workers in [2, 8, 32] {
        let many = scan_dir(
            &request(dir.path(), &[".log", ".csv"], &["error"], workers),
            Arc::new(SilentReporter),
        );
        assert!(many.error.is_none());
        assert_eq!(many.matches.len(), single.matches.len());
        assert_eq!(as_set(&many.matches), as_set(&single.matches));
    }
    Ok(())
}

#[test]
fn test_rescan_is_idempotent() -> Result<()> {
    let dir = build_tree()?;
    let req = request(dir.path(), &[".log"], &["error"], 4);
    let first = scan_dir(&req, Arc::new(SilentReporter));
    let second = scan_dir(&req, Arc::new(SilentReporter));
    assert_eq!(as_set(&first.matches), as_set(&second.matches));
    Ok(())
}

#[test]
fn test_matches_within_file_keep_line_order() -> Result<()> {
    let dir = build_tree()?;
    let outcome = scan_dir(
        &request(dir.path(), &[".log"], &["error"], 8),
        Arc::new(SilentReporter),
    );
    let mut last_line: std::collections::HashMap<&str, usize> = Default::default();
    for m in &outcome.matches {
        let prev = last_line.insert(m.file.as_str(), m.line);
        if let Some(prev) = prev {
            assert!(m.line > prev, "{}: {} after {}", m.file, m.line, prev);
        }
    }
    Ok(())
}

#[test]
fn test_each_path_processed_once() -> Result<()> {
    let dir = build_tree()?;
    let reporter = Arc::new(CapturingReporter::default());
    let outcome = scan_dir(
        &request(dir.path(), &[".log", ".csv"], &["error"], 6),
        reporter.clone(),
    );
    let processed = reporter.processed.lock().unwrap();
    let unique: HashSet<&PathBuf> = processed.iter().map(|(_, p)| p).collect();
    assert_eq!(processed.len(), outcome.files_scanned);
    assert_eq!(unique.len(), processed.len());
    assert!(processed.iter().all(|(w, _)| *w < 6));
    Ok(())
}

#[test]
fn test_missing_start_dir_is_traversal_error() {
    let outcome = scan_dir(
        &request(Path::new("/nonexistent-logscanner-root"), &[".log"], &["error"], 2),
        Arc::new(SilentReporter),
    );
    assert!(outcome.error.is_some());
    assert!(outcome.matches.is_empty());
    assert!(outcome.into_result().is_err());
}

#[test]
fn test_walk_error_keeps_matches_found_before_it() -> Result<()> {
    let dir = tempdir()?;
    let before = dir.path().join("a.log");
    let after = dir.path().join("b.log");
    fs::write(&before, "ok\nerror before the failure\n")?;
    fs::write(&after, "error after the failure\n")?;

    let req = request(dir.path(), &[".log"], &["error"], 2);
    let channels = create_pipeline_channels(&req, Arc::new(AtomicBool::new(false)), 4);
    let capturing = Arc::new(CapturingReporter::default());
    let reporter: Arc<dyn ScanReporter> = capturing.clone();
    let workers = spawn_scan_workers(
        channels.path_rx,
        req.keywords(),
        &channels.results,
        &reporter,
        req.workers(),
    );

    let walk = vec![
        WalkOutcome::File(before.clone()),
        WalkOutcome::Err {
            msg: "Permission denied (os error 13)".to_string(),
            path: Some(dir.path().join("locked")),
        },
        WalkOutcome::File(after.clone()),
    ];
    let queued = run_walk_loop(channels.path_tx, channels.ctx, walk.into_iter());
    for h in workers {
        h.join().unwrap();
    }

    assert_eq!(queued, 1);
    let err = take_traversal_error(&channels.first_error).expect("walk error should be recorded");
    assert!(err.to_string().contains("locked"));
    assert_eq!(
        channels.results.take(),
        vec![Match {
            file: file_str(before.clone()),
            line: 2,
            text: "error before the failure".to_string(),
        }]
    );
    let processed: Vec<PathBuf> = capturing
        .processed
        .lock()
        .unwrap()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(processed, vec![before]);
    Ok(())
}

#[test]
fn test_cancelled_scan_reports_error() -> Result<()> {
    let dir = build_tree()?;
    let outcome = scan_dir_cancellable(
        &request(dir.path(), &[".log"], &["error"], 2),
        Arc::new(SilentReporter),
        Arc::new(AtomicBool::new(true)),
    );
    assert_eq!(outcome.files_scanned, 0);
    assert!(outcome.matches.is_empty());
    let err = outcome.error.expect("cancel should surface as an error");
    assert!(err.to_string().contains("cancelled"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_not_fatal() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    fs::write(dir.path().join("ok.log"), "error one\n")?;
    let locked = dir.path().join("locked.log");
    fs::write(&locked, "error two\n")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::File::open(&locked).is_ok() {
        // Running with privileges that ignore file modes.
        return Ok(());
    }

    let reporter = Arc::new(CapturingReporter::default());
    let outcome = scan_dir(&request(dir.path(), &[".log"], &["error"], 2), reporter.clone());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].text, "error one");
    assert_eq!(*reporter.errors.lock().unwrap(), vec![locked]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdir_keeps_partial_results() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    fs::write(dir.path().join("top.log"), "error at top\n")?;
    let locked = dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::write(locked.join("hidden.log"), "error hidden\n")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let outcome = scan_dir(
        &request(dir.path(), &[".log"], &["error"], 1),
        Arc::new(SilentReporter),
    );
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    assert!(outcome.error.is_some());
    assert!(
        outcome
            .matches
            .iter()
            .all(|m| m.text != "error hidden")
    );
    Ok(())
}
