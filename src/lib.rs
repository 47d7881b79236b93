//! # unocr
//!
//! Deterministic normalization of recognized (OCR) text.
//!
//! Raw recognizer output is full of noise: typographic punctuation,
//! ragged spacing, page headers, words split across lines, mixed date and
//! currency notations and characteristic misreadings. This library turns
//! it into canonical text that downstream cleanup and extraction services
//! can rely on, while leaving Devanagari text untouched.
//!
//! ## Quick Start
//!
//! ```
//! use unocr::{normalize, NormalizeOptions};
//!
//! let raw = "The Tendor was issued by the Govemment.\nPage 3 of 10\nCost: Rs. 12,500.50";
//! let result = normalize(raw, &NormalizeOptions::default());
//!
//! assert_eq!(
//!     result.text(),
//!     "The Tender was issued by the Government.\nCost: INR 12500.50"
//! );
//! assert_eq!(result.diagnostics().removed_lines, vec!["Page 3 of 10"]);
//! ```
//!
//! ## Features
//!
//! - **Fixed stage order**: punctuation, whitespace, header/footer removal,
//!   hyphen merging, line reconstruction, dates, currency, OCR corrections
//! - **Bilingual safe**: Devanagari survives unless ASCII folding is requested
//! - **Fail-safe**: a failing stage returns the original input, never a partial result
//! - **Configurable tables**: boilerplate and correction patterns load from JSON
//! - **Parallel batches**: independent inputs are normalized with Rayon

pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod patterns;
pub mod pipeline;
pub mod service;
pub mod stages;

// Re-export commonly used types
pub use detect::{binary_signature, detect_text, is_text_bytes};
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use options::NormalizeOptions;
pub use patterns::{CorrectionRule, PatternConfig, PatternTable};
pub use pipeline::{Normalized, Normalizer};
pub use service::{
    CleanupRequest, CleanupRequirements, CleanupResponse, CleanupService, DocumentType,
    FieldExtractor, TenderFields, TenderItem,
};
pub use stages::Stage;

/// Normalize text with the built-in pattern tables.
///
/// Never fails: if the pipeline cannot be built or a stage fails, the
/// input is returned unchanged as [`Normalized::Degraded`].
///
/// Each call builds a fresh [`Normalizer`], compiling the pattern table
/// and every stage regex. To normalize many texts, build one `Normalizer`
/// and reuse it.
///
/// # Example
///
/// ```
/// use unocr::{normalize, NormalizeOptions};
///
/// let options = NormalizeOptions::new().with_lowercase(true);
/// let result = normalize("Deadline: 05/03/2024", &options);
/// assert_eq!(result.text(), "deadline: 2024-03-05");
/// ```
pub fn normalize(raw: &str, options: &NormalizeOptions) -> Normalized<String> {
    match Normalizer::new(options.clone()) {
        Ok(normalizer) => normalizer.normalize(raw),
        Err(e) => {
            log::error!("Failed to build normalizer: {}", e);
            let mut diagnostics = Diagnostics::new();
            diagnostics
                .notes
                .push(format!("{}; returned original input", e));
            Normalized::Degraded {
                original: raw.to_string(),
                reason: e,
                diagnostics,
            }
        }
    }
}

/// Normalize text with default options.
pub fn normalize_default(raw: &str) -> Normalized<String> {
    normalize(raw, &NormalizeOptions::default())
}
