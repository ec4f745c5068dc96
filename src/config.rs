//! Import options.
//!
//! An [`ImportConfig`] is passed explicitly to every import; there is no
//! process-wide mutable default. Resolution order, highest first: a per-call
//! override, a value read from a YAML config file, the built-in default.

use std::{fs, path::Path};

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

pub const DEFAULT_SEPARATOR: &str = "@";
pub const DEFAULT_DELIMITER: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Splits the file name when deriving a table name.
    pub separator: String,
    /// Splits each line into fields.
    pub delimiter: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl ImportConfig {
    pub fn load(path: &Path) -> AnyResult<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config: ImportConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing config file {path:?}"))?;
        Ok(config)
    }

    /// Applies per-call values; `None` keeps the current value.
    pub fn with_overrides(mut self, separator: Option<&str>, delimiter: Option<&str>) -> Self {
        if let Some(separator) = separator {
            self.separator = separator.to_string();
        }
        if let Some(delimiter) = delimiter {
            self.delimiter = delimiter.to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(ImportError::Config("delimiter cannot be empty".to_string()));
        }
        if self.separator.is_empty() {
            return Err(ImportError::Config("separator cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: ImportConfig = serde_yaml::from_str("delimiter: \";\"\n").unwrap();
        assert_eq!(config.delimiter, ";");
        assert_eq!(config.separator, DEFAULT_SEPARATOR);
    }

    #[test]
    fn per_call_override_wins_unless_absent() {
        let base = ImportConfig {
            separator: "#".to_string(),
            delimiter: "|".to_string(),
        };
        let resolved = base.clone().with_overrides(None, Some(";"));
        assert_eq!(resolved.separator, "#");
        assert_eq!(resolved.delimiter, ";");
        assert_eq!(base.clone().with_overrides(None, None), base);
    }

    #[test]
    fn validate_rejects_empty_values() {
        let config = ImportConfig::default().with_overrides(None, Some(""));
        assert!(matches!(config.validate(), Err(ImportError::Config(_))));
    }
}
