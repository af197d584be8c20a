//! Shared helpers for the `floodcast` binary tests.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// `floodcast --plain --store <dir>/events.json`, run inside `dir`.
pub fn floodcast(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_floodcast"));
    cmd.current_dir(dir.path())
        .env_remove("FLOODCAST_STORE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--plain")
        .arg("--store")
        .arg(dir.path().join("events.json"));
    cmd
}

/// Run with `--format json` and parse stdout.
pub fn run_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = floodcast(dir)
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    if !output.status.success() {
        panic!(
            "floodcast {:?} failed\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

pub fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}
