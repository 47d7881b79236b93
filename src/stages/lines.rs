//! Soft-wrap line reconstruction.

use super::Stage;
use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Characters that end a sentence; a line ending in one is never joined.
const TERMINALS: &[char] = &['.', '!', '?', ')'];

/// Joins soft-wrapped lines into logical lines.
///
/// A pending line absorbs the next line unless it ends with `.`, `!`, `?`
/// or `)`. Otherwise it absorbs it when the next line starts lowercase or
/// the pending line ends alphanumeric. An empty pending line never absorbs.
///
/// This is a heuristic: enumerated items without a closing period are
/// joined to their successor, and that is the expected behaviour.
#[derive(Debug, Clone, Default)]
pub struct LineReconstructor;

impl LineReconstructor {
    /// Stage name.
    pub const NAME: &'static str = "line_reconstruction";

    /// Create the stage.
    pub fn new() -> Self {
        Self
    }

    /// Whether `next` continues the pending line `prev`.
    pub fn should_join(prev: &str, next: &str) -> bool {
        if prev.is_empty() {
            return false;
        }
        let prev = prev.trim_end();
        let next = next.trim_start();

        if prev.ends_with(TERMINALS) {
            return false;
        }
        if next.chars().next().is_some_and(char::is_lowercase) {
            return true;
        }
        prev.chars().last().is_some_and(char::is_alphanumeric)
    }

    /// Reconstruct lines, returning the text and the number of joins.
    pub fn reconstruct(&self, text: &str) -> (String, usize) {
        let mut out: Vec<String> = Vec::new();
        let mut pending: Option<String> = None;
        let mut joined = 0;

        for line in text.split('\n') {
            match pending.as_mut() {
                None => pending = Some(line.to_string()),
                Some(buf) if Self::should_join(buf, line) => {
                    if !buf.ends_with(' ') {
                        buf.push(' ');
                    }
                    buf.push_str(line.trim_start());
                    joined += 1;
                }
                Some(buf) => {
                    out.push(std::mem::replace(buf, line.to_string()));
                }
            }
        }
        out.extend(pending);

        (out.join("\n"), joined)
    }
}

impl Stage for LineReconstructor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, text: String, diagnostics: &mut Diagnostics) -> Result<String> {
        let (result, joined) = self.reconstruct(&text);
        if joined == 0 {
            return Ok(text);
        }
        diagnostics.record(Self::NAME, "Reconstructed soft-wrapped lines", joined);
        Ok(result)
    }
}
