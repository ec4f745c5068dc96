//! Content fingerprint used as the duplicate-import key.
//!
//! The digest is SHA-256 over a canonical text rendering of the typed rows,
//! so it depends on values and their types but not on incidental formatting
//! of the source (quotes, padding around tokens, line endings).
//!
//! Canonical form, one line per row, cells separated by `\t`:
//!
//! | cell            | rendering              |
//! |-----------------|------------------------|
//! | Null            | `n`                    |
//! | Integer         | `i:<decimal>`          |
//! | Float           | `f:<round-trip repr>`  |
//! | String          | `s:<byte len>:<text>`  |
//!
//! The length prefix keeps strings containing tabs or newlines unambiguous.

use std::fmt::{self, Write as _};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{data::Value, rows::TypedRow};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_rows(rows: &[TypedRow]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical_text(rows).as_bytes());
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        Fingerprint(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn canonical_text(rows: &[TypedRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row.iter().map(|cell| canonical_cell(cell.as_ref())).join("\t");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn canonical_cell(cell: Option<&Value>) -> String {
    match cell {
        None => "n".to_string(),
        Some(Value::Integer(i)) => format!("i:{i}"),
        Some(Value::Float(f)) => format!("f:{f:?}"),
        Some(Value::String(s)) => format!("s:{}:{s}", s.len()),
    }
}
