//! Plain-text rendering of typed rows for the `preview` command.
//!
//! Numeric cells are right-aligned, strings left-aligned, and Null cells are
//! shown as `NULL`. Control characters inside strings are replaced with spaces
//! so every row stays on one line.

use std::fmt::Write as _;

use crate::{data::Value, rows::TypedRow, schema::Schema};

pub const NULL_DISPLAY: &str = "NULL";

struct Cell {
    text: String,
    right_align: bool,
}

fn to_cell(value: Option<&Value>) -> Cell {
    match value {
        None => Cell {
            text: NULL_DISPLAY.to_string(),
            right_align: false,
        },
        Some(Value::String(s)) => Cell {
            text: s.replace(['\n', '\r', '\t'], " "),
            right_align: false,
        },
        Some(number) => Cell {
            text: number.as_display(),
            right_align: true,
        },
    }
}

pub fn render_rows(schema: &Schema, rows: &[TypedRow]) -> String {
    let mut widths: Vec<usize> = schema
        .columns()
        .iter()
        .map(|c| c.chars().count().max(1))
        .collect();
    let body: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| row.iter().map(|value| to_cell(value.as_ref())).collect())
        .collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let mut output = String::new();
    let header: Vec<Cell> = schema
        .columns()
        .iter()
        .map(|c| Cell {
            text: c.clone(),
            right_align: false,
        })
        .collect();
    let _ = writeln!(output, "{}", format_line(&header, &widths));
    let rule: Vec<Cell> = widths
        .iter()
        .map(|w| Cell {
            text: "-".repeat(*w),
            right_align: false,
        })
        .collect();
    let _ = writeln!(output, "{}", format_line(&rule, &widths));
    for row in &body {
        let _ = writeln!(output, "{}", format_line(row, &widths));
    }
    output
}

fn format_line(cells: &[Cell], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            if cell.right_align {
                format!("{:>width$}", cell.text, width = *width)
            } else {
                format!("{:<width$}", cell.text, width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line
}
