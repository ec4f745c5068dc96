#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use csv_mapper::{ImportRecord, TableSink};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}

/// Sink relying on the trait's default `insert_if_absent`, with an optional
/// failure after a fixed number of inserts.
#[derive(Debug, Default)]
pub struct FlakySink {
    pub inserted: Vec<(String, ImportRecord)>,
    pub fail_after: Option<usize>,
}

impl FlakySink {
    pub fn failing_after(count: usize) -> Self {
        Self {
            inserted: Vec::new(),
            fail_after: Some(count),
        }
    }
}

impl TableSink for FlakySink {
    fn fingerprints(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .inserted
            .iter()
            .filter(|(name, _)| name == table)
            .map(|(_, record)| record.fingerprint().to_string())
            .collect())
    }

    fn insert(&mut self, table: &str, record: &ImportRecord) -> Result<()> {
        if self.fail_after == Some(self.inserted.len()) {
            return Err(anyhow!("connection reset"));
        }
        self.inserted.push((table.to_string(), record.clone()));
        Ok(())
    }
}
