//! Destination abstraction for staged records.
//!
//! A [`TableSink`] stores [`ImportRecord`]s by table name and can enumerate the
//! fingerprints it already holds. The importer only ever calls
//! [`TableSink::insert_if_absent`], so a sink that implements it as a single
//! unit of work makes duplicate detection and insertion atomic. The provided
//! default composes [`TableSink::fingerprints`] and [`TableSink::insert`] and
//! offers no such guarantee.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{data::Value, fingerprint::Fingerprint, rows::TypedRow, schema::Schema};

/// Key under which the fingerprint is stored alongside the row's fields.
pub const FINGERPRINT_FIELD: &str = "hash";

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    fields: Vec<(String, Option<Value>)>,
    fingerprint: Fingerprint,
}

impl ImportRecord {
    pub fn new(schema: &Schema, row: &TypedRow, fingerprint: &Fingerprint) -> Self {
        let fields = schema
            .columns()
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();
        Self {
            fields,
            fingerprint: fingerprint.clone(),
        }
    }

    pub fn fields(&self) -> &[(String, Option<Value>)] {
        &self.fields
    }

    /// First value stored under `name`; the outer `None` means no such column.
    pub fn get(&self, name: &str) -> Option<Option<&Value>> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_ref())
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

impl Serialize for ImportRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.serialize_entry(FINGERPRINT_FIELD, &self.fingerprint)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(usize),
    Duplicate,
}

pub trait TableSink {
    /// Fingerprints attached to the records already in `table`.
    fn fingerprints(&self, table: &str) -> Result<Vec<String>>;

    fn insert(&mut self, table: &str, record: &ImportRecord) -> Result<()>;

    fn contains_fingerprint(&self, table: &str, fingerprint: &Fingerprint) -> Result<bool> {
        Ok(self
            .fingerprints(table)?
            .iter()
            .any(|existing| existing == fingerprint.as_str()))
    }

    /// Writes `records` unless `fingerprint` is already present in `table`.
    fn insert_if_absent(
        &mut self,
        table: &str,
        fingerprint: &Fingerprint,
        records: &[ImportRecord],
    ) -> Result<InsertOutcome> {
        if self.contains_fingerprint(table, fingerprint)? {
            return Ok(InsertOutcome::Duplicate);
        }
        for record in records {
            self.insert(table, record)?;
        }
        Ok(InsertOutcome::Inserted(records.len()))
    }
}

/// Table sink held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tables: BTreeMap<String, Vec<ImportRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, table: &str) -> &[ImportRecord] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl TableSink for MemorySink {
    fn fingerprints(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .records(table)
            .iter()
            .map(|record| record.fingerprint().to_string())
            .collect())
    }

    fn insert(&mut self, table: &str, record: &ImportRecord) -> Result<()> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn insert_if_absent(
        &mut self,
        table: &str,
        fingerprint: &Fingerprint,
        records: &[ImportRecord],
    ) -> Result<InsertOutcome> {
        let stored = self.tables.entry(table.to_string()).or_default();
        if stored.iter().any(|record| record.fingerprint() == fingerprint) {
            return Ok(InsertOutcome::Duplicate);
        }
        stored.extend_from_slice(records);
        Ok(InsertOutcome::Inserted(records.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, age: i64) -> ImportRecord {
        let schema = Schema::from_header(&["name".to_string(), "age".to_string()]);
        let row = vec![Some(Value::from(name)), Some(Value::Integer(age))];
        let fingerprint = Fingerprint::of_rows(std::slice::from_ref(&row));
        ImportRecord::new(&schema, &row, &fingerprint)
    }

    #[test]
    fn record_serializes_columns_in_order_then_hash() {
        let record = record("Alice", 30);
        let json = serde_json::to_string(&record).unwrap();
        let expected = format!(
            r#"{{"name":"Alice","age":30,"hash":"{}"}}"#,
            record.fingerprint()
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn record_get_distinguishes_missing_column_from_null() {
        let schema = Schema::from_header(&["a".to_string(), "b".to_string()]);
        let row = vec![Some(Value::Integer(1)), None];
        let record = ImportRecord::new(&schema, &row, &Fingerprint::of_rows(&[]));
        assert_eq!(record.get("a"), Some(Some(&Value::Integer(1))));
        assert_eq!(record.get("b"), Some(None));
        assert_eq!(record.get("c"), None);
    }
}
