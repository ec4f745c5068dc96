use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A coerced cell. Null cells are represented as `None` in an
/// `Option<Value>` rather than as a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

static INTEGER_LITERAL: OnceLock<Regex> = OnceLock::new();
static FLOAT_LITERAL: OnceLock<Regex> = OnceLock::new();

fn integer_literal() -> &'static Regex {
    INTEGER_LITERAL.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("static pattern compiles"))
}

fn float_literal() -> &'static Regex {
    FLOAT_LITERAL
        .get_or_init(|| Regex::new(r"^[+-]?[0-9]+\.[0-9]+$").expect("static pattern compiles"))
}

pub fn is_integer_literal(value: &str) -> bool {
    integer_literal().is_match(value)
}

pub fn is_float_literal(value: &str) -> bool {
    float_literal().is_match(value)
}

/// Classifies a raw cell.
///
/// Blank cells become `None`. Integer literals that overflow `i64` and float
/// literals that overflow `f64` keep their text so no digits are lost.
pub fn coerce_value(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = if is_integer_literal(raw) {
        raw.parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::String(raw.to_string()))
    } else if is_float_literal(raw) {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map_or_else(|| Value::String(raw.to_string()), Value::Float)
    } else {
        Value::String(raw.to_string())
    };
    Some(parsed)
}
