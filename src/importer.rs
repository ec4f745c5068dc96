//! Import orchestration.
//!
//! [`CsvImport`] runs the whole parsing pipeline at construction time
//! (tokenize, normalize the header, map and type every data row, fingerprint
//! the typed rows) and then exposes a one-shot [`CsvImport::execute`] against a
//! [`TableSink`].
//!
//! ## States
//!
//! An import starts `Pending`. A successful `execute` moves it to `Executed`,
//! after which every further call fails with
//! [`ImportError::AlreadyExecuted`]. Failed calls leave it `Pending`.
//!
//! ## Idempotency
//!
//! Every record carries the import's [`Fingerprint`]. The batch is handed to
//! [`TableSink::insert_if_absent`], and a sink that already holds the
//! fingerprint rejects the whole batch with [`ImportError::DuplicateImport`].

use std::path::Path;

use log::{debug, info, warn};

use crate::{
    config::ImportConfig,
    error::{ImportError, Result},
    fingerprint::Fingerprint,
    io_utils,
    rows::{TypedRow, map_rows},
    schema::{Schema, normalize_identifier},
    sink::{ImportRecord, InsertOutcome, TableSink},
    tokenizer::tokenize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Pending,
    Executed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub table: String,
    pub rows: usize,
    pub fingerprint: Fingerprint,
}

#[derive(Debug)]
pub struct CsvImport {
    table_name: String,
    schema: Schema,
    rows: Vec<TypedRow>,
    fingerprint: Fingerprint,
    state: ImportState,
}

impl CsvImport {
    /// Reads and parses `path`. The extension must be `.csv`; it is checked
    /// before the file is opened.
    pub fn load(path: &Path, config: ImportConfig) -> Result<Self> {
        check_source(path, &config)?;
        let content = io_utils::read_source(path)?;
        Self::parse(path, &content, &config)
    }

    /// Parses already-read `content`; `path` is only used for naming and
    /// for the extension check.
    pub fn from_content(path: &Path, content: &str, config: ImportConfig) -> Result<Self> {
        check_source(path, &config)?;
        Self::parse(path, content, &config)
    }

    fn parse(path: &Path, content: &str, config: &ImportConfig) -> Result<Self> {
        let table_name = table_name_from_path(path, &config.separator)?;

        let raw = tokenize(content, &config.delimiter)?;
        debug!(
            "Tokenized {:?}: {} delimited line(s) with delimiter '{}'",
            path,
            raw.len(),
            crate::printable_delimiter(&config.delimiter)
        );
        let schema = Schema::from_raw_table(&raw, &config.delimiter)?;
        debug!("Schema for {:?}: {}", path, schema);
        let rows = map_rows(&schema, &raw)?;
        let fingerprint = Fingerprint::of_rows(&rows);

        info!(
            "Loaded {} row(s) across {} column(s) from {:?} (table '{}', fingerprint {})",
            rows.len(),
            schema.len(),
            path,
            table_name,
            fingerprint
        );
        Ok(Self {
            table_name,
            schema,
            rows,
            fingerprint,
            state: ImportState::Pending,
        })
    }

    /// Table name derived from the source file name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[TypedRow] {
        &self.rows
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    pub fn is_executed(&self) -> bool {
        self.state == ImportState::Executed
    }

    pub fn records(&self) -> Vec<ImportRecord> {
        self.rows
            .iter()
            .map(|row| ImportRecord::new(&self.schema, row, &self.fingerprint))
            .collect()
    }

    /// Writes every row to `table` (or the derived table name) exactly once.
    pub fn execute<S>(&mut self, sink: &mut S, table: Option<&str>) -> Result<ImportSummary>
    where
        S: TableSink + ?Sized,
    {
        let table = table.unwrap_or(self.table_name.as_str()).to_string();
        if self.is_executed() {
            return Err(ImportError::AlreadyExecuted { table });
        }

        let records = self.records();
        let outcome = sink
            .insert_if_absent(&table, &self.fingerprint, &records)
            .map_err(|source| ImportError::Sink {
                table: table.clone(),
                source,
            })?;

        match outcome {
            InsertOutcome::Duplicate => {
                warn!(
                    "Table '{}' already holds fingerprint {}; nothing written",
                    table, self.fingerprint
                );
                Err(ImportError::DuplicateImport {
                    table,
                    fingerprint: self.fingerprint.to_string(),
                })
            }
            InsertOutcome::Inserted(count) => {
                self.state = ImportState::Executed;
                info!("Inserted {count} record(s) into table '{table}'");
                Ok(ImportSummary {
                    table,
                    rows: count,
                    fingerprint: self.fingerprint.clone(),
                })
            }
        }
    }
}

fn check_source(path: &Path, config: &ImportConfig) -> Result<()> {
    io_utils::ensure_csv_path(path)?;
    config.validate()
}

/// Derives a table name from the file name of `path`.
///
/// The extension is dropped, the stem is split on `separator` and the last
/// non-blank segment is normalized like a header cell:
/// `exports/2024-01@Sales Q1.csv` becomes `sales_q1`.
pub fn table_name_from_path(path: &Path, separator: &str) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let segment = stem
        .split(separator)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .last();
    match segment {
        Some(segment) => Ok(normalize_identifier(segment)),
        None => Err(ImportError::TableName {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_uses_last_separator_segment() {
        let name = table_name_from_path(Path::new("exports/2024-01@Sales Q1.csv"), "@").unwrap();
        assert_eq!(name, "sales_q1");
        let plain = table_name_from_path(Path::new("People.csv"), "@").unwrap();
        assert_eq!(plain, "people");
        let trailing = table_name_from_path(Path::new("orders@.csv"), "@").unwrap();
        assert_eq!(trailing, "orders");
    }

    #[test]
    fn table_name_rejects_blank_stems() {
        assert!(matches!(
            table_name_from_path(Path::new("dir/@.csv"), "@"),
            Err(ImportError::TableName { .. })
        ));
        assert!(matches!(
            table_name_from_path(Path::new("dir/ @  .csv"), "@"),
            Err(ImportError::TableName { .. })
        ));
    }
}
