//! Optional ASCII folding.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use unicode_normalization::UnicodeNormalization;

/// Decomposes the text (NFKD) and drops every code point outside 7-bit ASCII.
///
/// Destructive: Devanagari and every other non-Latin script is removed.
/// Only enabled through [`crate::NormalizeOptions::ascii_only`].
#[derive(Debug, Clone, Default)]
pub struct AsciiFolder;

impl AsciiFolder {
    /// Stage name.
    pub const NAME: &'static str = "ascii_fold";

    /// Create the stage.
    pub fn new() -> Self {
        Self
    }

    /// Fold text, returning it with the number of dropped code points.
    pub fn fold(&self, text: &str) -> (String, usize) {
        let mut dropped = 0;
        let folded: String = text
            .nfkd()
            .filter(|c| {
                let keep = c.is_ascii();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();
        (folded, dropped)
    }
}

impl Stage for AsciiFolder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        if text.is_ascii() {
            return Ok(text);
        }
        let (folded, dropped) = self.fold(&text);
        diagnostics.record(Self::NAME, "Folded to ASCII (non-ASCII removed)", dropped.max(1));
        Ok(folded)
    }
}
