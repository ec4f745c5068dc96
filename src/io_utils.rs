//! Source file access.
//!
//! Only `.csv` files are accepted. Content is decoded as UTF-8 through
//! `encoding_rs`, which also drops a leading byte-order mark so it cannot leak
//! into the first header identifier.

use std::{fs, io, path::Path};

use encoding_rs::UTF_8;

use crate::error::{ImportError, Result};

pub const CSV_EXTENSION: &str = "csv";

pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

pub fn ensure_csv_path(path: &Path) -> Result<()> {
    if is_csv_path(path) {
        Ok(())
    } else {
        Err(ImportError::InvalidFileType {
            path: path.to_path_buf(),
        })
    }
}

/// Reads and decodes `path`. The extension is not checked here.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_utf8(&bytes).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn decode_utf8(bytes: &[u8]) -> io::Result<String> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "input is not valid UTF-8",
        ))
    } else {
        Ok(text.into_owned())
    }
}
