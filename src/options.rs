//! Normalization options and configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling the optional normalization stages.
///
/// The record is supplied once per invocation and never mutated while a
/// pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Lowercase the whole text as the last stage
    pub lowercase: bool,

    /// Fold to 7-bit ASCII (destroys Devanagari and every other non-Latin script)
    #[serde(alias = "ascii_only")]
    pub ascii_only: bool,

    /// Maximum number of consecutive blank lines kept
    #[serde(alias = "max_blank_lines")]
    pub max_blank_lines: usize,
}

impl NormalizeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bilingual-safe options: keeps case and non-ASCII script.
    pub fn bilingual() -> Self {
        Self::default()
    }

    /// ASCII-only, lowercased output for consumers that cannot handle Unicode.
    pub fn ascii_lowercase() -> Self {
        Self {
            lowercase: true,
            ascii_only: true,
            max_blank_lines: 1,
        }
    }

    /// Enable or disable lowercasing.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Enable or disable ASCII folding.
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Set the maximum number of consecutive blank lines.
    pub fn with_max_blank_lines(mut self, max: usize) -> Self {
        self.max_blank_lines = max;
        self
    }

    /// Parse options from a JSON object. Missing keys take their defaults.
    ///
    /// # Example
    /// ```
    /// use unocr::NormalizeOptions;
    ///
    /// let options = NormalizeOptions::from_json(r#"{"lowercase": true, "maxBlankLines": 2}"#)?;
    /// assert!(options.lowercase);
    /// assert!(!options.ascii_only);
    /// assert_eq!(options.max_blank_lines, 2);
    /// # Ok::<(), unocr::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            lowercase: false,
            ascii_only: false,
            max_blank_lines: 1,
        }
    }
}
