//! # TreePT CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests. Every command runs inside a
//! temporary workspace that:
//!
//! - contains a `.git` directory, so the project config search stops there
//! - acts as `HOME` and `XDG_CONFIG_HOME`, so no real user config is read
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A GitHub `git/trees?recursive=1` response for a small Next.js app.
pub const GITHUB_TREE: &str = r#"{
  "sha": "abc123",
  "tree": [
    {"path": "src", "type": "tree"},
    {"path": "src/pages", "type": "tree"},
    {"path": "src/pages/index.js", "type": "blob"},
    {"path": "src/api", "type": "tree"},
    {"path": "src/api/hello.js", "type": "blob"},
    {"path": "src/components", "type": "tree"},
    {"path": "src/components/Button.jsx", "type": "blob"},
    {"path": "src/utils.js", "type": "blob"},
    {"path": "package.json", "type": "blob"},
    {"path": "node_modules/react/index.js", "type": "blob"}
  ],
  "truncated": false
}"#;

/// A related-files list.
pub const RELATED_FILES: &str = r#"{"related_files": ["src/App.js", "src/components/ui/Card.tsx", "README.md"]}"#;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp workspace");
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative` inside the workspace, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative)).expect("Failed to read output")
    }

    /// `treept` running inside the workspace with an isolated home.
    pub fn cmd(&self) -> Command {
        let mut cmd = treept_cmd();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".xdg"))
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn treept_cmd() -> Command {
    Command::cargo_bin("treept").expect("Failed to find treept binary for testing")
}
