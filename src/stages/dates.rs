//! Day-first numeric dates to ISO 8601.

use super::{replace_counted, Stage};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use regex::{Captures, Regex};

/// Rewrites `dd/mm/yyyy` and `dd-mm-yyyy` to `yyyy-mm-dd`.
///
/// Only day-first dates with a 19xx/20xx year are recognized; there is no
/// month-first disambiguation. Digits are ASCII only, so dates written in
/// Devanagari numerals are left as they are.
#[derive(Debug, Clone)]
pub struct DateStandardizer {
    day_first: Regex,
}

impl DateStandardizer {
    /// Stage name.
    pub const NAME: &'static str = "dates";

    /// Create the stage.
    pub fn new() -> Result<Self> {
        Ok(Self {
            day_first: Regex::new(r"\b([0-3]?[0-9])[-/]([0-1]?[0-9])[-/]((?:19|20)[0-9]{2})\b")?,
        })
    }

    /// Standardize dates, returning the text and the number of rewrites.
    pub fn standardize(&self, text: &str) -> Result<(String, usize)> {
        let mut failure = None;
        let (result, count) = replace_counted(&self.day_first, text, |caps| {
            if caps.get(0).is_some_and(|m| follows_iso_year(text, m.start())) {
                return caps[0].to_string();
            }
            match iso_date(caps) {
                Ok(iso) => iso,
                Err(e) => {
                    failure.get_or_insert(e);
                    caps[0].to_string()
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok((result, count)),
        }
    }
}

/// Whether `start` sits right after the `yyyy-` of an ISO date, as in the
/// `04-01-2024` inside `2023-04-01-2024-03-31`.
fn follows_iso_year(text: &str, start: usize) -> bool {
    let before = &text.as_bytes()[..start];
    let n = before.len();
    if n < 5 || before[n - 1] != b'-' {
        return false;
    }
    if !before[n - 5..n - 1].iter().all(u8::is_ascii_digit) {
        return false;
    }
    n == 5 || !matches!(before[n - 6], b'0'..=b'9' | b'-' | b'/')
}

fn iso_date(caps: &Captures<'_>) -> Result<String> {
    let field = |idx: usize| -> Result<u32> {
        caps[idx]
            .parse::<u32>()
            .map_err(|e| Error::stage(DateStandardizer::NAME, format!("'{}': {}", &caps[0], e)))
    };
    let day = field(1)?;
    let month = field(2)?;
    Ok(format!("{}-{:02}-{:02}", &caps[3], month, day))
}

impl Stage for DateStandardizer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (result, count) = self.standardize(&text)?;
        if count == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Standardized dates", count);
        Ok(result)
    }
}
