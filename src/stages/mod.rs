//! Normalization stages.
//!
//! Each stage is a pure text transformation. The orchestrator hands the
//! text to a stage by value and receives it back, so exactly one stage
//! owns the buffer at any time.
//!
//! Stages, in pipeline order:
//!
//! 1. [`PunctuationNormalizer`] - typographic punctuation to ASCII
//! 2. [`WhitespaceNormalizer`] - line endings, space runs, blank lines
//! 3. [`SectionFilter`] - recurring header/footer lines
//! 4. [`HyphenMerger`] - words split by a hyphen at a line break
//! 5. [`LineReconstructor`] - soft-wrapped lines into logical lines
//! 6. [`DateStandardizer`] - `dd/mm/yyyy` to `yyyy-mm-dd`
//! 7. [`CurrencyStandardizer`] - `Rs. 1,200` to `INR 1200`, percent spacing
//! 8. [`OcrErrorCorrector`] - known recognizer confusions
//! 9. [`AsciiFolder`] - optional, destructive
//! 10. [`CaseNormalizer`] - optional

mod ascii;
mod case;
mod corrections;
mod currency;
mod dates;
mod hyphenation;
mod lines;
mod punctuation;
mod sections;
mod whitespace;

pub use ascii::AsciiFolder;
pub use case::CaseNormalizer;
pub use corrections::OcrErrorCorrector;
pub use currency::CurrencyStandardizer;
pub use dates::DateStandardizer;
pub use hyphenation::HyphenMerger;
pub use lines::LineReconstructor;
pub use punctuation::PunctuationNormalizer;
pub use sections::SectionFilter;
pub use whitespace::{longest_blank_run, WhitespaceNormalizer};

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use regex::{Captures, Regex};

/// A single text transformation in the normalization pipeline.
///
/// Implementations hold only read-only configuration, so one instance can
/// serve concurrent invocations.
pub trait Stage: Send + Sync {
    /// Stable stage name, used as the diagnostics key.
    fn name(&self) -> &'static str;

    /// Transform `text`, recording what changed in `diagnostics`.
    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String>;
}

/// Replace every match of `re`, counting only matches whose rewrite differs.
pub(crate) fn replace_counted<F>(re: &Regex, text: &str, mut rewrite: F) -> (String, usize)
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut count = 0;
    let replaced = re.replace_all(text, |caps: &Captures<'_>| {
        let replacement = rewrite(caps);
        if replacement != caps[0] {
            count += 1;
        }
        replacement
    });
    (replaced.into_owned(), count)
}
