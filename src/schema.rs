//! Header normalization.
//!
//! A [`Schema`] is the ordered list of canonical identifiers taken from the
//! first retained line of a [`RawTable`]. Identifiers are positional mapping
//! keys only; duplicates are allowed and later columns never shadow earlier
//! ones because records keep column order.

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ImportError, Result},
    tokenizer::RawTable,
};

static SEPARATOR_RUN: OnceLock<Regex> = OnceLock::new();

fn separator_run() -> &'static Regex {
    SEPARATOR_RUN.get_or_init(|| Regex::new(r"[-\s]+").expect("static pattern compiles"))
}

/// Collapses hyphen/whitespace runs to `_` and lower-cases the result.
pub fn normalize_identifier(raw: &str) -> String {
    separator_run().replace_all(raw, "_").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Builds the schema from row 0 of `table`.
    ///
    /// A missing header, or a header that produced a single token, means the
    /// delimiter never split the line and is reported as a schema error.
    pub fn from_raw_table(table: &RawTable, delimiter: &str) -> Result<Self> {
        match table.header() {
            Some(header) if header.len() > 1 => Ok(Self::from_header(header)),
            _ => Err(ImportError::Schema {
                delimiter: delimiter.to_string(),
            }),
        }
    }

    pub fn from_header(header: &[String]) -> Self {
        let columns = header.iter().map(|cell| normalize_identifier(cell)).collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.columns.join(", "))
    }
}
