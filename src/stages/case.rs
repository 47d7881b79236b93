//! Optional lowercasing.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Lowercases the entire text. No locale-specific rules.
#[derive(Debug, Clone, Default)]
pub struct CaseNormalizer;

impl CaseNormalizer {
    /// Stage name.
    pub const NAME: &'static str = "lowercase";

    /// Create the stage.
    pub fn new() -> Self {
        Self
    }
}

impl Stage for CaseNormalizer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let changed = text
            .chars()
            .filter(|&c| !c.to_lowercase().eq(std::iter::once(c)))
            .count();
        if changed == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Lowercased text", changed);
        Ok(text.to_lowercase())
    }
}
