//! Directory-backed table sink.
//!
//! Each table lives in `<root>/<table>.jsonl`, one JSON object per record with
//! the schema identifiers in column order followed by `hash`. A batch is
//! serialized up front and appended with a single write, so a failed
//! serialization never leaves a partial batch on disk.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde_json::{Map, Value as JsonValue};

use crate::{
    fingerprint::Fingerprint,
    sink::{FINGERPRINT_FIELD, ImportRecord, InsertOutcome, TableSink},
};

const TABLE_EXTENSION: &str = "jsonl";

#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    root: PathBuf,
}

impl JsonLinesStore {
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("Creating store directory {root:?}"))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        if table.is_empty()
            || table == "."
            || table == ".."
            || table.contains(['/', '\\'])
        {
            return Err(anyhow!("'{table}' is not a usable table name"));
        }
        Ok(self.root.join(format!("{table}.{TABLE_EXTENSION}")))
    }

    fn append(&self, table: &str, payload: &[u8]) -> Result<()> {
        let path = self.table_path(table)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Opening table file {path:?}"))?;
        file.write_all(payload)
            .with_context(|| format!("Appending to table file {path:?}"))?;
        file.flush()?;
        Ok(())
    }
}

fn encode_records(records: &[ImportRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buffer, record).context("Serializing import record")?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

impl TableSink for JsonLinesStore {
    fn fingerprints(&self, table: &str) -> Result<Vec<String>> {
        let path = self.table_path(table)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("Opening table file {path:?}"));
            }
        };
        let mut hashes = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Reading line {} of {path:?}", idx + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            // A map keeps the last of duplicate keys, so a data column named
            // `hash` is shadowed by the fingerprint written after it.
            let stored: Map<String, JsonValue> = serde_json::from_str(&line)
                .with_context(|| format!("Parsing line {} of {path:?}", idx + 1))?;
            if let Some(hash) = stored.get(FINGERPRINT_FIELD).and_then(JsonValue::as_str) {
                hashes.push(hash.to_string());
            }
        }
        Ok(hashes)
    }

    fn insert(&mut self, table: &str, record: &ImportRecord) -> Result<()> {
        let payload = encode_records(std::slice::from_ref(record))?;
        self.append(table, &payload)
    }

    fn insert_if_absent(
        &mut self,
        table: &str,
        fingerprint: &Fingerprint,
        records: &[ImportRecord],
    ) -> Result<InsertOutcome> {
        if self.contains_fingerprint(table, fingerprint)? {
            return Ok(InsertOutcome::Duplicate);
        }
        let payload = encode_records(records)?;
        debug!(
            "Appending {} record(s) ({} bytes) to table '{table}'",
            records.len(),
            payload.len()
        );
        self.append(table, &payload)?;
        Ok(InsertOutcome::Inserted(records.len()))
    }
}
