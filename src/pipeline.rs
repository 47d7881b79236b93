//! Pipeline orchestration.
//!
//! A [`Normalizer`] owns the configured stage list and runs it over each
//! input. Every invocation gets its own [`Diagnostics`]; the stages and
//! the pattern table are shared read-only, so one normalizer can serve
//! many threads at once.
//!
//! A run never fails past this boundary. A stage error or panic aborts
//! the remaining stages and the caller gets the original input back as
//! [`Normalized::Degraded`].

use crate::detect::detect_text;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::options::NormalizeOptions;
use crate::patterns::PatternTable;
use crate::stages::{
    AsciiFolder, CaseNormalizer, CurrencyStandardizer, DateStandardizer, HyphenMerger,
    LineReconstructor, OcrErrorCorrector, PunctuationNormalizer, SectionFilter, Stage,
    WhitespaceNormalizer,
};
use rayon::prelude::*;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of one normalization run.
#[derive(Debug)]
pub enum Normalized<T> {
    /// Every stage completed.
    Ok {
        /// Canonical text
        text: T,
        /// What changed
        diagnostics: Diagnostics,
    },

    /// The input was rejected or a stage failed; the original is returned untouched.
    Degraded {
        /// The input exactly as supplied
        original: T,
        /// Why the run was abandoned
        reason: Error,
        /// Failure note (no partial stage counts)
        diagnostics: Diagnostics,
    },
}

impl<T> Normalized<T> {
    /// The usable output: canonical text, or the original input when degraded.
    pub fn text(&self) -> &T {
        match self {
            Normalized::Ok { text, .. } => text,
            Normalized::Degraded { original, .. } => original,
        }
    }

    /// Diagnostics for this run.
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Normalized::Ok { diagnostics, .. } | Normalized::Degraded { diagnostics, .. } => {
                diagnostics
            }
        }
    }

    /// Whether the run was abandoned.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Normalized::Degraded { .. })
    }

    /// Failure reason, if degraded.
    pub fn reason(&self) -> Option<&Error> {
        match self {
            Normalized::Ok { .. } => None,
            Normalized::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Split into the usable output and its diagnostics.
    pub fn into_parts(self) -> (T, Diagnostics) {
        match self {
            Normalized::Ok { text, diagnostics } => (text, diagnostics),
            Normalized::Degraded {
                original,
                diagnostics,
                ..
            } => (original, diagnostics),
        }
    }

    fn map<U>(self, ok: impl FnOnce(T) -> U, original: U) -> Normalized<U> {
        match self {
            Normalized::Ok { text, diagnostics } => Normalized::Ok {
                text: ok(text),
                diagnostics,
            },
            Normalized::Degraded {
                reason,
                diagnostics,
                ..
            } => Normalized::Degraded {
                original,
                reason,
                diagnostics,
            },
        }
    }
}

/// The normalization pipeline.
///
/// # Example
/// ```
/// use unocr::{NormalizeOptions, Normalizer};
///
/// let normalizer = Normalizer::new(NormalizeOptions::default())?;
/// let result = normalizer.normalize("Deadline: 05/03/2024.\nPage 3 of 10\nTax: 18 %.");
/// assert_eq!(result.text(), "Deadline: 2024-03-05.\nTax: 18%.");
/// assert_eq!(result.diagnostics().removed_lines, vec!["Page 3 of 10"]);
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Normalizer {
    options: NormalizeOptions,
    patterns: Arc<PatternTable>,
    stages: Vec<Box<dyn Stage>>,
}

impl Normalizer {
    /// Create a normalizer with the built-in pattern tables.
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        Self::with_patterns(options, Arc::new(PatternTable::builtin()?))
    }

    /// Create a normalizer sharing an already compiled pattern table.
    pub fn with_patterns(options: NormalizeOptions, patterns: Arc<PatternTable>) -> Result<Self> {
        let mut stages: Vec<Box<dyn Stage>> = vec![
            Box::new(PunctuationNormalizer::new()),
            Box::new(WhitespaceNormalizer::new(options.max_blank_lines)?),
            Box::new(SectionFilter::new(Arc::clone(&patterns))),
            Box::new(HyphenMerger::new()?),
            Box::new(LineReconstructor::new()),
            Box::new(DateStandardizer::new()?),
            Box::new(CurrencyStandardizer::new()?),
            Box::new(OcrErrorCorrector::new(Arc::clone(&patterns))),
        ];
        if options.ascii_only {
            stages.push(Box::new(AsciiFolder::new()));
        }
        if options.lowercase {
            stages.push(Box::new(CaseNormalizer::new()));
        }
        stages.push(Box::new(WhitespaceNormalizer::final_tidy(
            options.max_blank_lines,
        )?));

        Ok(Self {
            options,
            patterns,
            stages,
        })
    }

    /// Options this normalizer was built with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Shared pattern table.
    pub fn patterns(&self) -> &Arc<PatternTable> {
        &self.patterns
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Normalize text.
    pub fn normalize(&self, raw: &str) -> Normalized<String> {
        run_stages(&self.stages, raw)
    }

    /// Normalize raw bytes, rejecting anything that is not UTF-8 text.
    ///
    /// Rejected input is returned byte-for-byte as `Degraded`.
    pub fn normalize_bytes(&self, raw: &[u8]) -> Normalized<Vec<u8>> {
        match detect_text(raw) {
            Ok(text) => self.normalize(text).map(String::into_bytes, raw.to_vec()),
            Err(e) => reject(raw.to_vec(), e),
        }
    }

    /// Normalize a JSON value. Only strings are text; anything else is
    /// returned unchanged as `Degraded`.
    pub fn normalize_value(&self, raw: Value) -> Normalized<Value> {
        match raw {
            Value::String(text) => {
                let result = self.normalize(&text);
                result.map(Value::String, Value::String(text))
            }
            other => {
                let kind = value_kind(&other);
                reject(other, Error::InputType(format!("expected a string, got {}", kind)))
            }
        }
    }

    /// Normalize independent inputs in parallel, in input order.
    pub fn normalize_batch<S>(&self, inputs: &[S]) -> Vec<Normalized<String>>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .collect()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("options", &self.options)
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Upper bound on passes over the stage list.
const MAX_PASSES: usize = 8;

/// Run `stages` over `raw` until a pass leaves the text unchanged, falling
/// back to `raw` on any failure.
///
/// A single pass is not always stable: joining lines can form a header line
/// the filter has already run past, and lowercasing or folding changes what
/// the line join sees. Repeating the pass makes the result a fixed point, so
/// normalizing the output again changes nothing.
pub(crate) fn run_stages(stages: &[Box<dyn Stage>], raw: &str) -> Normalized<String> {
    let mut diagnostics = Diagnostics::new();
    let mut text = raw.to_string();

    for pass in 1..=MAX_PASSES {
        let before = text.clone();
        text = match run_pass(stages, text, &mut diagnostics) {
            Ok(next) => next,
            Err(reason) => return degrade(raw, reason, diagnostics),
        };
        if text == before {
            return Normalized::Ok { text, diagnostics };
        }
        log::debug!("Pass {} changed the text", pass);
    }

    log::warn!("Text still changing after {} passes", MAX_PASSES);
    Normalized::Ok { text, diagnostics }
}

fn run_pass(
    stages: &[Box<dyn Stage>],
    mut text: String,
    diagnostics: &mut Diagnostics,
) -> Result<String> {
    for stage in stages {
        let name = stage.name();
        log::debug!("Running stage {} ({} bytes)", name, text.len());

        let input = text;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| stage.apply(input, diagnostics)));

        text = match outcome {
            Ok(Ok(next)) => next,
            Ok(Err(e @ Error::StageFailure { .. })) => return Err(e),
            Ok(Err(other)) => return Err(Error::stage(name, other.to_string())),
            Err(payload) => return Err(Error::stage(name, panic_message(payload.as_ref()))),
        };
    }
    Ok(text)
}

fn degrade(raw: &str, reason: Error, mut diagnostics: Diagnostics) -> Normalized<String> {
    log::error!("Normalization aborted, returning original input: {}", reason);

    diagnostics.stage_counts.clear();
    diagnostics.removed_lines.clear();
    diagnostics.notes.push(format!("{}; returned original input", reason));

    Normalized::Degraded {
        original: raw.to_string(),
        reason,
        diagnostics,
    }
}

fn reject<T>(original: T, reason: Error) -> Normalized<T> {
    log::warn!("Rejected input: {}", reason);

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .notes
        .push(format!("{}; returned input unchanged", reason));

    Normalized::Degraded {
        original,
        reason,
        diagnostics,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
