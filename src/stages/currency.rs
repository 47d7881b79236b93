//! Currency amounts and percent spacing.

use super::{replace_counted, Stage};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use regex::Regex;

/// Rewrites `₹`, `Rs.`, `Rs` and `INR` amounts to `INR <amount>` and
/// removes whitespace before `%`.
///
/// Thousands separators are dropped, the decimal part is kept. Word
/// markers need a word boundary in front, so `Hours 5` is left alone.
#[derive(Debug, Clone)]
pub struct CurrencyStandardizer {
    amount: Regex,
    percent: Regex,
}

impl CurrencyStandardizer {
    /// Stage name.
    pub const NAME: &'static str = "currency";

    /// Diagnostics key for the percent-spacing rewrite.
    pub const PERCENT: &'static str = "percent_spacing";

    /// Create the stage.
    pub fn new() -> Result<Self> {
        Ok(Self {
            amount: Regex::new(r"(?i)(?:₹|\b(?:Rs\.?|INR))\s*([0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?)")?,
            percent: Regex::new(r"\s+%")?,
        })
    }

    /// Standardize currency amounts, returning the text and the rewrite count.
    pub fn standardize_amounts(&self, text: &str) -> (String, usize) {
        replace_counted(&self.amount, text, |caps| {
            format!("INR {}", caps[1].replace(',', ""))
        })
    }

    /// Remove whitespace before percent signs, returning the text and the rewrite count.
    pub fn tighten_percent(&self, text: &str) -> (String, usize) {
        replace_counted(&self.percent, text, |_| "%".to_string())
    }
}

impl Stage for CurrencyStandardizer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (text, amounts) = self.standardize_amounts(&text);
        diagnostics.record(Self::NAME, "Standardized currency", amounts);

        let (text, percents) = self.tighten_percent(&text);
        diagnostics.record(Self::PERCENT, "Normalized percent spacing", percents);

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> CurrencyStandardizer {
        CurrencyStandardizer::new().unwrap()
    }

    #[test]
    fn test_rupee_markers() {
        let (text, count) =
            stage().standardize_amounts("Cost: Rs. 12,500.50, fee ₹500, EMD rs 1,00,000 and INR5");
        assert_eq!(
            text,
            "Cost: INR 12500.50, fee INR 500, EMD INR 100000 and INR 5"
        );
        assert_eq!(count, 4);
    }

    #[test]
    fn test_canonical_amount_not_counted() {
        let (text, count) = stage().standardize_amounts("Value INR 12500.50");
        assert_eq!(text, "Value INR 12500.50");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_trailing_comma_kept() {
        let (text, _) = stage().standardize_amounts("Rs. 500, payable");
        assert_eq!(text, "INR 500, payable");
    }

    #[test]
    fn test_marker_inside_word_ignored() {
        let (text, count) = stage().standardize_amounts("Working Hours 5 and Mrs 3");
        assert_eq!(text, "Working Hours 5 and Mrs 3");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_percent_spacing() {
        let (text, count) = stage().tighten_percent("Tax: 18 % and GST 5\t%");
        assert_eq!(text, "Tax: 18% and GST 5%");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_stage_records_both_counts() {
        let mut diag = Diagnostics::new();
        let out = stage()
            .apply("Rs. 1,000 at 2 %".to_string(), &mut diag)
            .unwrap();
        assert_eq!(out, "INR 1000 at 2%");
        assert_eq!(diag.count(CurrencyStandardizer::NAME), 1);
        assert_eq!(diag.count(CurrencyStandardizer::PERCENT), 1);
    }
}
