#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use hotelmaint::AppContext;
use hotelmaint::config::Config;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hm() -> Command {
    cargo_bin_cmd!("hotelmaint")
}

/// Create a unique test workbook path inside the system temp dir and remove any existing file
pub fn setup_test_workbook(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hotelmaint.workbook", name));
    let wb_path = path.to_string_lossy().to_string();
    fs::remove_file(&wb_path).ok();
    wb_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Configuration keeping every side file inside the temp dir.
pub fn test_config(name: &str) -> Config {
    let root = env::temp_dir().join(format!("{}_hotelmaint", name));
    fs::remove_dir_all(&root).ok();
    Config {
        workbook: root.join("book.workbook").to_string_lossy().to_string(),
        blob_dir: root.join("photos").to_string_lossy().to_string(),
        outbox: root.join("outbox.log").to_string_lossy().to_string(),
        ..Config::default()
    }
}

/// Context over an in-memory workbook.
pub fn memory_context(name: &str) -> AppContext {
    AppContext::in_memory(test_config(name)).expect("in-memory context")
}

/// Initialize a workbook through the CLI
pub fn init_workbook(wb_path: &str) {
    hm().args(["--workbook", wb_path, "--test", "init"])
        .assert()
        .success();
}
