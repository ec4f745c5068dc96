//! Line tokenizer for delimited text.
//!
//! The tokenizer is deliberately not a CSV parser. It applies two heuristics:
//!
//! - **Line retention**: a line is kept only when the delimiter occurs with at
//!   least one character on each side of it. Blank lines, comment-like lines
//!   and lines that are nothing but a delimiter are dropped silently.
//! - **Spaced delimiters are text**: a delimiter with a space directly before
//!   or after it is not a field boundary. `a , b` is one field, `a,b` is two.
//!
//! Double quotes are removed from every token and never group fields, so a
//! quoted value holding the delimiter still splits.

use crate::error::{ImportError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// The first retained line, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every retained line after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn tokenize(content: &str, delimiter: &str) -> Result<RawTable> {
    if delimiter.is_empty() {
        return Err(ImportError::Config("delimiter cannot be empty".to_string()));
    }
    let rows = content
        .lines()
        .filter(|line| is_delimited_line(line, delimiter))
        .map(|line| split_line(line, delimiter))
        .collect();
    Ok(RawTable { rows })
}

/// True when `delimiter` occurs somewhere in `line` with text on both sides.
pub fn is_delimited_line(line: &str, delimiter: &str) -> bool {
    let (Some(first), Some(last)) = (line.chars().next(), line.chars().next_back()) else {
        return false;
    };
    let inner_start = first.len_utf8();
    let inner_end = line.len() - last.len_utf8();
    inner_start <= inner_end && line[inner_start..inner_end].contains(delimiter)
}

/// Splits one line into cleaned tokens. Trailing fields that are empty
/// before cleaning are dropped, so `1,2,` yields two tokens; a trailing
/// field holding only quotes or a tab is kept and cleans to an empty token.
pub fn split_line(line: &str, delimiter: &str) -> Vec<String> {
    split_fields(line, delimiter)
        .into_iter()
        .map(clean_token)
        .collect()
}

fn split_fields<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut fields = Vec::new();
    let mut field_start = 0;
    let mut cursor = 0;
    while let Some(offset) = line[cursor..].find(delimiter) {
        let start = cursor + offset;
        let end = start + delimiter.len();
        if is_field_boundary(line, start, end) {
            fields.push(&line[field_start..start]);
            field_start = end;
            cursor = end;
        } else {
            // Resume one character later so overlapping candidates are still seen.
            cursor = start + line[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    fields.push(&line[field_start..]);
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn is_field_boundary(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    before != Some(' ') && after != Some(' ')
}

fn clean_token(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}
