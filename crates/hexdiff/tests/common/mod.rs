//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Temporary directory of input files plus a preconfigured `hexdiff` command.
///
/// The command runs with a color-capable `TERM` and with every `HEXDIFF_*`
/// variable cleared so results do not depend on the caller's environment.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `contents` to `name` inside the fixture and return its path.
    pub fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hexdiff"));
        cmd.current_dir(self.dir.path())
            .env("TERM", "xterm-256color")
            .env_remove("COLORTERM")
            .env_remove("NO_COLOR")
            .env_remove("HEXDIFF_HIGHLIGHT")
            .env_remove("HEXDIFF_COLOR")
            .env_remove("HEXDIFF_PALETTE")
            .env_remove("HEXDIFF_TARGET")
            .env_remove("HEXDIFF_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `args` and return the assertion.
    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert()
    }
}

/// Lines between the header and the summary.
pub fn data_lines(stdout: &str) -> Vec<String> {
    let lines: Vec<&str> = stdout.lines().collect();
    lines[1..lines.len().saturating_sub(1)]
        .iter()
        .map(|line| line.to_string())
        .collect()
}
