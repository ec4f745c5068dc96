//! Row mapping.
//!
//! Provides [`map_row()`] which coerces one raw data row and checks its width
//! against the [`Schema`], and [`map_rows()`] which does so for a whole
//! [`RawTable`].
//!
//! A row may be short by at most [`MAX_PADDED_FIELDS`] trailing value(s), which
//! are filled with Null. Any other width mismatch is read as a delimiter that
//! leaked into a data value and is rejected.

use crate::{
    data::{Value, coerce_value},
    error::{ImportError, Result},
    schema::Schema,
    tokenizer::RawTable,
};

pub type TypedRow = Vec<Option<Value>>;

pub const MAX_PADDED_FIELDS: usize = 1;

/// `row_number` is 1-based over data rows and only used for error messages.
pub fn map_row(schema: &Schema, raw: &[String], row_number: usize) -> Result<TypedRow> {
    let mut values: TypedRow = raw.iter().map(|cell| coerce_value(cell)).collect();
    if values.len() < schema.len() {
        let padding = MAX_PADDED_FIELDS.min(schema.len() - values.len());
        values.extend(std::iter::repeat_n(None, padding));
    }
    if values.len() != schema.len() {
        return Err(ImportError::Shape {
            row: row_number,
            expected: schema.len(),
            actual: raw.len(),
        });
    }
    Ok(values)
}

pub fn map_rows(schema: &Schema, table: &RawTable) -> Result<Vec<TypedRow>> {
    table
        .data_rows()
        .iter()
        .enumerate()
        .map(|(idx, raw)| map_row(schema, raw, idx + 1))
        .collect()
}
