//! Recurring header/footer removal.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::patterns::PatternTable;
use std::sync::Arc;

/// Drops whole lines that match a boilerplate pattern (page numbers,
/// disclaimers, copyright notices).
///
/// Expects whitespace-normalized input. Matching lines are removed, not
/// blanked, and recorded in [`Diagnostics::removed_lines`].
#[derive(Debug, Clone)]
pub struct SectionFilter {
    patterns: Arc<PatternTable>,
}

impl SectionFilter {
    /// Stage name.
    pub const NAME: &'static str = "section_filter";

    /// Create the stage over a shared pattern table.
    pub fn new(patterns: Arc<PatternTable>) -> Self {
        Self { patterns }
    }
}

impl Stage for SectionFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let mut kept = Vec::new();
        let mut removed = 0;

        for line in text.split('\n') {
            if self.patterns.is_boilerplate(line) {
                diagnostics.remove_line(line.trim());
                removed += 1;
                continue;
            }
            kept.push(line);
        }

        if removed == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Removed header/footer lines", removed);
        Ok(kept.join("\n"))
    }
}
