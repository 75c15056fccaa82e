//! # Coverage Test Fixtures
//!
//! Builds a throwaway expression test tree on disk: a dialect directory, an ini
//! directory and a setup tree, all under one temporary root.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct Fixture {
    root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["dialects", "ini", "setup", "out"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    pub fn dialect_dir(&self) -> PathBuf {
        self.root.path().join("dialects")
    }

    pub fn ini_dir(&self) -> PathBuf {
        self.root.path().join("ini")
    }

    pub fn setup_dir(&self) -> PathBuf {
        self.root.path().join("setup")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `<name>Dialect.cpp` and returns its path.
    pub fn dialect(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dialect_dir().join(format!("{name}Dialect.cpp"));
        fs::write(&path, source).unwrap();
        path
    }

    /// Writes `<dialect>.ini` with the given exclusion list.
    pub fn exclusions(&self, dialect: &str, list: &str) {
        let body = format!("[Dialect]\nExpressionExclusions_Standard = {list}\n");
        fs::write(self.ini_dir().join(format!("{dialect}.ini")), body).unwrap();
    }

    /// Writes `setup/<group>/setup.<name>.txt`.
    pub fn setup(&self, group: &str, name: &str, lines: &[&str]) {
        let dir = self.setup_dir().join(group);
        fs::create_dir_all(&dir).unwrap();
        let mut body = lines.join("\n");
        body.push('\n');
        fs::write(dir.join(format!("setup.{name}.txt")), body).unwrap();
    }

    pub fn read_output(&self, file: &str) -> String {
        fs::read_to_string(self.output_dir().join(file)).unwrap()
    }
}
