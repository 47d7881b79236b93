//! Rejoin words split by a hyphen at a line break.

use super::{replace_counted, Stage};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use regex::Regex;

/// Merges `inter-\nnational` into `international`.
///
/// Must run before [`super::LineReconstructor`], otherwise the second
/// fragment would be joined back with a space.
#[derive(Debug, Clone)]
pub struct HyphenMerger {
    split_word: Regex,
}

impl HyphenMerger {
    /// Stage name.
    pub const NAME: &'static str = "hyphen_merge";

    /// Create the stage.
    pub fn new() -> Result<Self> {
        Ok(Self {
            split_word: Regex::new(r"(\w+)-[ \t]*\n[ \t]*(\w+)")?,
        })
    }

    /// Merge split words in one left-to-right sweep, returning the text and
    /// the number of merges.
    ///
    /// Matches do not overlap, so in a chain such as `a-\nb-\nc` only the
    /// first split is merged.
    pub fn merge(&self, text: &str) -> (String, usize) {
        replace_counted(&self.split_word, text, |caps| {
            format!("{}{}", &caps[1], &caps[2])
        })
    }
}

impl Stage for HyphenMerger {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (result, count) = self.merge(&text);
        if count == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Merged hyphenated line-breaks", count);
        Ok(result)
    }
}
