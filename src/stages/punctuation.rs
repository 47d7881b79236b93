//! Typographic punctuation and invisible spacing to plain ASCII.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Character replacement table. No entry overlaps another.
const PUNCTUATION_MAP: &[(char, &str)] = &[
    ('\u{2018}', "'"),  // ‘
    ('\u{2019}', "'"),  // ’
    ('\u{201C}', "\""), // “
    ('\u{201D}', "\""), // ”
    ('\u{2013}', "-"),  // – en dash
    ('\u{2014}', "-"),  // — em dash
    ('\u{2212}', "-"),  // − minus sign
    ('\u{2022}', "-"),  // • bullet
    ('\u{00B7}', "-"),  // · middle dot
    ('\u{00A0}', " "),  // no-break space
    ('\u{200B}', ""),   // zero-width space
    ('\u{FEFF}', ""),   // BOM
];

fn replacement(c: char) -> Option<&'static str> {
    PUNCTUATION_MAP
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Maps curly quotes, dashes, bullets and special spaces to ASCII.
#[derive(Debug, Clone, Default)]
pub struct PunctuationNormalizer;

impl PunctuationNormalizer {
    /// Stage name.
    pub const NAME: &'static str = "unicode_punctuation";

    /// Create the stage.
    pub fn new() -> Self {
        Self
    }

    /// Replace mapped characters, returning the text and the substitution count.
    pub fn normalize(&self, text: &str) -> (String, usize) {
        let mut result = String::with_capacity(text.len());
        let mut count = 0;

        for c in text.chars() {
            match replacement(c) {
                Some(to) => {
                    result.push_str(to);
                    count += 1;
                }
                None => result.push(c),
            }
        }

        (result, count)
    }
}

impl Stage for PunctuationNormalizer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        if !text.chars().any(|c| replacement(c).is_some()) {
            return Ok(text);
        }
        let (result, count) = self.normalize(&text);
        diagnostics.record(Self::NAME, "Standardized Unicode punctuation/spacing", count);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_and_dashes() {
        let (text, count) =
            PunctuationNormalizer::new().normalize("\u{201C}Bid\u{201D} \u{2018}A\u{2019} 10\u{2013}12 \u{2014} \u{2212}5");
        assert_eq!(text, "\"Bid\" 'A' 10-12 - -5");
        assert_eq!(count, 7);
    }

    #[test]
    fn test_invisible_characters() {
        let (text, count) =
            PunctuationNormalizer::new().normalize("\u{FEFF}Ten\u{200B}der\u{00A0}notice");
        assert_eq!(text, "Tender notice");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_bullets() {
        let (text, _) = PunctuationNormalizer::new().normalize("\u{2022} item\n\u{00B7} item");
        assert_eq!(text, "- item\n- item");
    }

    #[test]
    fn test_devanagari_untouched() {
        let mut diag = Diagnostics::new();
        let input = "निविदा सूचना। Tender".to_string();
        let output = PunctuationNormalizer::new()
            .apply(input.clone(), &mut diag)
            .unwrap();
        assert_eq!(output, input);
        assert!(diag.is_unchanged());
    }
}
