//! Common OCR misrecognition fixes.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::patterns::PatternTable;
use std::sync::Arc;

/// Applies the correction table in order, each rule to the result of the
/// previous ones.
#[derive(Debug, Clone)]
pub struct OcrErrorCorrector {
    patterns: Arc<PatternTable>,
}

impl OcrErrorCorrector {
    /// Stage name.
    pub const NAME: &'static str = "ocr_corrections";

    /// Create the stage over a shared pattern table.
    pub fn new(patterns: Arc<PatternTable>) -> Self {
        Self { patterns }
    }

    /// Apply all corrections, returning the text and the number of fixes.
    pub fn correct(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut total = 0;
        for rule in self.patterns.corrections() {
            let (next, count) = rule.apply(&current);
            if count > 0 {
                log::debug!("Correction {} matched {} times", rule.pattern(), count);
                current = next;
                total += count;
            }
        }
        (current, total)
    }
}

impl Stage for OcrErrorCorrector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (result, total) = self.correct(&text);
        if total == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Applied common OCR corrections", total);
        Ok(result)
    }
}
