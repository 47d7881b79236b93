//! Line endings, intra-line spacing and blank-line bounds.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use regex::Regex;

/// Line separators folded into `\n`. `\r\n` is handled first.
const LINE_BREAKS: &[char] = &['\r', '\u{0085}', '\u{2028}', '\u{2029}'];

/// Canonicalizes whitespace:
///
/// 1. every line-ending variant becomes `\n`
/// 2. runs of 2+ spaces/tabs collapse to one space, lines are trimmed
/// 3. more than `max_blank_lines` consecutive blank lines are dropped
/// 4. the whole text is trimmed
#[derive(Debug, Clone)]
pub struct WhitespaceNormalizer {
    name: &'static str,
    max_blank_lines: usize,
    space_run: Regex,
}

impl WhitespaceNormalizer {
    /// Stage name.
    pub const NAME: &'static str = "whitespace";

    /// Name used when the normalizer runs as the closing tidy pass.
    pub const FINAL_TIDY: &'static str = "final_tidy";

    /// Create the stage.
    pub fn new(max_blank_lines: usize) -> Result<Self> {
        Self::named(Self::NAME, max_blank_lines)
    }

    /// Create the closing tidy pass the orchestrator runs after all stages.
    pub fn final_tidy(max_blank_lines: usize) -> Result<Self> {
        Self::named(Self::FINAL_TIDY, max_blank_lines)
    }

    fn named(name: &'static str, max_blank_lines: usize) -> Result<Self> {
        Ok(Self {
            name,
            max_blank_lines,
            space_run: Regex::new(r"[ \t]{2,}")?,
        })
    }

    /// Normalize, returning the text and the number of edits
    /// (converted line endings, rewritten lines and dropped blank lines).
    pub fn normalize(&self, text: &str) -> (String, usize) {
        let mut edits = 0;

        let mut unified = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if LINE_BREAKS.contains(&c) {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                unified.push('\n');
                edits += 1;
            } else {
                unified.push(c);
            }
        }

        let mut kept: Vec<String> = Vec::new();
        let mut blanks = 0;
        for line in unified.split('\n') {
            let cleaned = self.space_run.replace_all(line, " ");
            let cleaned = cleaned.trim();
            if cleaned != line {
                edits += 1;
            }

            if cleaned.is_empty() {
                blanks += 1;
                if blanks > self.max_blank_lines {
                    edits += 1;
                    continue;
                }
            } else {
                blanks = 0;
            }
            kept.push(cleaned.to_string());
        }

        let joined = kept.join("\n");
        let result = joined.trim();
        if result.len() != joined.len() {
            edits += 1;
        }

        (result.to_string(), edits)
    }

    /// Maximum number of consecutive blank lines kept.
    pub fn max_blank_lines(&self) -> usize {
        self.max_blank_lines
    }
}

impl Stage for WhitespaceNormalizer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (result, edits) = self.normalize(&text);
        if result == text {
            return Ok(text);
        }
        let label = if self.name == Self::FINAL_TIDY {
            "Tidied whitespace after normalization"
        } else {
            "Normalized whitespace and blank lines"
        };
        diagnostics.record(self.name, label, edits.max(1));
        Ok(result)
    }
}

/// Longest run of consecutive empty lines in `text`. Empty text has none.
pub fn longest_blank_run(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    let mut longest = 0;
    let mut current = 0;
    for line in text.split('\n') {
        if line.is_empty() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
