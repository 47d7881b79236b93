//! Pattern tables for boilerplate detection and OCR error correction.
//!
//! Tables are plain configuration data: a [`PatternConfig`] holds the
//! pattern strings (built-in defaults, or loaded from JSON), and a
//! [`PatternTable`] is its compiled form. A table is compiled once and
//! then shared read-only, usually behind an `Arc`, by every invocation.

use crate::error::{Error, Result};
use crate::stages::replace_counted;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on passes for rules that repeat until stable.
const MAX_REPEAT_PASSES: usize = 16;

/// Built-in recurring header/footer patterns.
///
/// Each entry must match a whole trimmed line, case-insensitively.
const HEADER_FOOTER_PATTERNS: &[&str] = &[
    r"page\s+\d+\s*(?:of\s*\d+)?", // Page 3 of 10
    r"page\s*\d+",                 // Page3
    r"confidential.*",
    r"disclaimer.*",
    r"copyright\s+.*",
    r"all rights reserved.*",
];

/// A single OCR correction: regex, replacement template and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRule {
    /// Regex to match
    pub pattern: String,

    /// Replacement template (`$1` / `${name}` expand capture groups)
    pub replacement: String,

    /// Match case-insensitively
    #[serde(default)]
    pub case_insensitive: bool,

    /// Re-apply until the text stops changing (for rules whose matches share context)
    #[serde(default)]
    pub repeat_until_stable: bool,
}

impl CorrectionRule {
    /// Create a case-sensitive rule.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            case_insensitive: false,
            repeat_until_stable: false,
        }
    }

    /// Match case-insensitively.
    pub fn ignore_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Re-apply until stable.
    pub fn repeated(mut self) -> Self {
        self.repeat_until_stable = true;
        self
    }
}

/// Built-in table of common recognizer confusions, applied in order.
fn builtin_corrections() -> Vec<CorrectionRule> {
    vec![
        CorrectionRule::new(r"\bTendor\b", "Tender").ignore_case(),
        // rn/m confusion
        CorrectionRule::new(r"\bGovemment\b", "Government").ignore_case(),
        CorrectionRule::new(r"\bDepartrnent\b", "Department").ignore_case(),
        // E8M, E8 M, E & M
        CorrectionRule::new(r"\bE(?:[ \t]*&|8)[ \t]*M\b", "E&M").ignore_case(),
        // 1O0 -> 100; neighbouring matches share a digit, hence the repeat
        CorrectionRule::new(r"(\d)O(\d)", "${1}0${2}").repeated(),
        CorrectionRule::new(r"\b0f\b", "of"),
        CorrectionRule::new(r"\bthc\b", "the").ignore_case(),
    ]
}

/// Uncompiled pattern tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Full-line, case-insensitive boilerplate patterns
    pub header_footer: Vec<String>,

    /// Ordered OCR correction rules
    pub corrections: Vec<CorrectionRule>,
}

impl PatternConfig {
    /// Create the built-in configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with no patterns at all.
    pub fn empty() -> Self {
        Self {
            header_footer: Vec::new(),
            corrections: Vec::new(),
        }
    }

    /// Add a boilerplate pattern.
    pub fn with_header_footer(mut self, pattern: impl Into<String>) -> Self {
        self.header_footer.push(pattern.into());
        self
    }

    /// Append a correction rule (applied after the existing ones).
    pub fn with_correction(mut self, rule: CorrectionRule) -> Self {
        self.corrections.push(rule);
        self
    }

    /// Parse a configuration from JSON. Missing keys keep the built-in tables.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            header_footer: HEADER_FOOTER_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            corrections: builtin_corrections(),
        }
    }
}

/// A compiled correction rule.
#[derive(Debug, Clone)]
pub struct CompiledCorrection {
    regex: Regex,
    replacement: String,
    repeat_until_stable: bool,
}

impl CompiledCorrection {
    fn compile(rule: &CorrectionRule) -> Result<Self> {
        let regex = RegexBuilder::new(&rule.pattern)
            .case_insensitive(rule.case_insensitive)
            .build()?;
        Ok(Self {
            regex,
            replacement: rule.replacement.clone(),
            repeat_until_stable: rule.repeat_until_stable,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Apply the rule, returning the new text and the number of changed matches.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let passes = if self.repeat_until_stable {
            MAX_REPEAT_PASSES
        } else {
            1
        };

        let mut current = text.to_string();
        let mut total = 0;
        for _ in 0..passes {
            let (next, count) = replace_counted(&self.regex, &current, |caps| {
                let mut dst = String::new();
                caps.expand(&self.replacement, &mut dst);
                dst
            });
            current = next;
            total += count;
            if count == 0 {
                break;
            }
        }
        (current, total)
    }
}

/// Compiled, read-only pattern tables.
#[derive(Debug, Clone)]
pub struct PatternTable {
    header_footer: Vec<Regex>,
    corrections: Vec<CompiledCorrection>,
}

impl PatternTable {
    /// Compile the built-in tables.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&PatternConfig::default())
    }

    /// Compile a configuration.
    ///
    /// Boilerplate patterns are anchored to the whole line and matched
    /// case-insensitively.
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        let header_footer = config
            .header_footer
            .iter()
            .map(|pattern| {
                if pattern.trim().is_empty() {
                    return Err(Error::Config("empty header/footer pattern".to_string()));
                }
                Ok(RegexBuilder::new(&format!("^(?:{})$", pattern))
                    .case_insensitive(true)
                    .build()?)
            })
            .collect::<Result<Vec<_>>>()?;

        let corrections = config
            .corrections
            .iter()
            .map(CompiledCorrection::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            header_footer,
            corrections,
        })
    }

    /// Whether a line is recurring boilerplate. Blank lines never are.
    pub fn is_boilerplate(&self, line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty() && self.header_footer.iter().any(|re| re.is_match(trimmed))
    }

    /// Correction rules in application order.
    pub fn corrections(&self) -> &[CompiledCorrection] {
        &self.corrections
    }

    /// Number of boilerplate patterns.
    pub fn header_footer_len(&self) -> usize {
        self.header_footer.len()
    }
}
