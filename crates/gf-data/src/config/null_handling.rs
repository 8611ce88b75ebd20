//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Null value configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

/// Cells that count as missing in a default pandas `read_csv`
const DEFAULT_NULL_PATTERNS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_NULL_PATTERNS.iter().map(|p| p.to_string()).collect(),
            trim_whitespace: true,
            case_sensitive: true,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Return the cell content, or `None` when it counts as null
    pub fn value<'a>(&self, raw: &'a str) -> Option<&'a str> {
        if self.is_null(raw) {
            None
        } else if self.trim_whitespace {
            Some(raw.trim())
        } else {
            Some(raw)
        }
    }
}
