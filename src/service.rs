//! Boundary types for the downstream text services.
//!
//! Canonical text is usually handed on to a generative cleanup service
//! and a structured field extractor. Neither is part of this crate: the
//! types here only fix the request/response shapes so wrappers can plug
//! a service in, and parse whatever comes back without failing.

use crate::error::Result;
use crate::options::NormalizeOptions;
use crate::pipeline::Normalized;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Instructions sent with every cleanup request.
pub const CLEANUP_INSTRUCTIONS: &str = "Clean recognized text with minimal hallucination. \
Preserve meaning and wording; fix spacing, broken words, punctuation and common \
recognition errors (0/O, rn/m, E&M, quotes, dashes). Merge soft-wrapped lines and \
hyphenated words across line breaks. Remove recurring headers/footers only if \
confidently identified. Keep Hindi (Devanagari) text as-is; do not romanize. \
Return a JSON object with keys 'cleaned_text', 'notes', 'removed_lines' and 'stats'.";

/// Instructions sent with every extraction request.
pub const EXTRACTION_INSTRUCTIONS: &str = "Extract the fields of the schema from the text. \
Only use facts present in the text; do not invent values. If unsure, return null \
for that field. Return JSON only.";

/// Token standardizations a cleanup service is asked to apply.
pub const STANDARDIZATIONS: &[&str] = &[
    "Dates to ISO yyyy-mm-dd where unambiguous",
    "Currency to 'INR <amount>'",
    "Percent spacing normalized (e.g., '50%')",
];

/// What the cleanup service must preserve or standardize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRequirements {
    /// Keep the original letter case
    pub preserve_case: bool,

    /// Keep Devanagari text untouched
    pub keep_hindi: bool,

    /// Apply [`STANDARDIZATIONS`]
    pub standardize_tokens: bool,

    /// Standardizations requested
    pub standardizations: Vec<String>,
}

impl CleanupRequirements {
    /// Requirements matching the options the text was normalized with.
    pub fn from_options(options: &NormalizeOptions) -> Self {
        Self {
            preserve_case: !options.lowercase,
            keep_hindi: !options.ascii_only,
            standardize_tokens: true,
            standardizations: STANDARDIZATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for CleanupRequirements {
    fn default() -> Self {
        Self::from_options(&NormalizeOptions::default())
    }
}

/// A request to the cleanup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRequest {
    /// Text to clean
    pub text: String,

    /// Cleanup requirements
    pub requirements: CleanupRequirements,
}

impl CleanupRequest {
    /// Build a request for `text` normalized with `options`.
    pub fn new(text: impl Into<String>, options: &NormalizeOptions) -> Self {
        Self {
            text: text.into(),
            requirements: CleanupRequirements::from_options(options),
        }
    }

    /// Build a request from a pipeline result (degraded results send the original).
    pub fn from_normalized(result: &Normalized<String>, options: &NormalizeOptions) -> Self {
        Self::new(result.text().as_str(), options)
    }

    /// Serialize the request payload.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What the cleanup service returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanupResponse {
    /// Cleaned text
    pub cleaned_text: String,

    /// What was fixed
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<String>,

    /// Lines removed as headers/footers
    #[serde(default, deserialize_with = "null_as_default")]
    pub removed_lines: Vec<String>,

    /// Free-form counters
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: BTreeMap<String, Value>,
}

impl CleanupResponse {
    /// Parse a service reply. A reply that is not a JSON object with
    /// `cleaned_text` becomes the cleaned text itself.
    pub fn parse_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Cleanup response is not valid JSON, using raw text: {}", e);
                Self {
                    cleaned_text: raw.to_string(),
                    notes: vec!["Parsing failed, returning raw response".to_string()],
                    ..Self::default()
                }
            }
        }
    }
}

impl From<&Normalized<String>> for CleanupResponse {
    fn from(result: &Normalized<String>) -> Self {
        let diagnostics = result.diagnostics();
        Self {
            cleaned_text: result.text().clone(),
            notes: diagnostics.notes.clone(),
            removed_lines: diagnostics.removed_lines.clone(),
            stats: diagnostics
                .stage_counts
                .iter()
                .map(|(stage, count)| (stage.clone(), Value::from(*count)))
                .collect(),
        }
    }
}

/// Kind of document the extractor recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// A tender notice
    Tender,
    /// Anything else
    #[default]
    #[serde(other)]
    Unknown,
}

/// A procured line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenderItem {
    /// What is being procured
    pub description: Option<String>,
    /// Number of units
    pub quantity: Option<f64>,
    /// Unit of measure, e.g. `pieces`
    pub unit: Option<String>,
    /// Technical specification text
    pub specs: Option<String>,
}

/// Structured fields of a tender notice. Fields the extractor could not
/// find are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenderFields {
    /// Recognized document kind
    pub document_type: DocumentType,
    /// Tender title or subject line
    pub title: Option<String>,
    /// Procuring organization
    pub buyer: Option<String>,
    /// Reference number as printed on the notice
    pub tender_id: Option<String>,
    /// `yyyy-mm-dd`
    pub publication_date: Option<String>,
    /// `yyyy-mm-dd`
    pub submission_deadline: Option<String>,
    /// Estimated contract value in rupees
    pub estimated_value_inr: Option<f64>,
    /// Currency code of the stated value
    pub currency: Option<String>,
    /// Contact person, phone or email
    pub contact: Option<String>,
    /// Postal address of the buyer or submission office
    pub address: Option<String>,
    /// Procured line items; `null` reads as empty
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<TenderItem>,
    /// Anything else the extractor wants to flag
    pub notes: Option<String>,
    /// Extractor confidence in `0.0..=1.0`
    pub confidence: Option<f64>,
}

impl TenderFields {
    /// Result used when nothing could be extracted.
    pub fn unknown() -> Self {
        Self {
            document_type: DocumentType::Unknown,
            confidence: Some(0.0),
            ..Self::default()
        }
    }

    /// JSON schema the extractor is asked to fill.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "document_type": {"type": "string", "enum": ["tender", "unknown"]},
                "title": {"type": "string"},
                "buyer": {"type": "string"},
                "tender_id": {"type": "string"},
                "publication_date": {"type": "string", "description": "yyyy-mm-dd if present"},
                "submission_deadline": {"type": "string", "description": "yyyy-mm-dd if present"},
                "estimated_value_inr": {"type": "number"},
                "currency": {"type": "string", "default": "INR"},
                "contact": {"type": "string"},
                "address": {"type": "string"},
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "description": {"type": "string"},
                            "quantity": {"type": "number"},
                            "unit": {"type": "string"},
                            "specs": {"type": "string"}
                        }
                    }
                },
                "notes": {"type": "string"},
                "confidence": {"type": "number"}
            },
            "required": ["document_type"]
        })
    }

    /// Extraction payload for `text`: instructions, schema and text.
    pub fn request(text: &str) -> Value {
        json!({
            "instruction": EXTRACTION_INSTRUCTIONS,
            "schema": Self::schema(),
            "text": text,
        })
    }

    /// Parse an extractor reply, falling back to [`TenderFields::unknown`].
    pub fn parse_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(fields) => fields,
            Err(e) => {
                log::warn!("Failed to parse structured fields: {}", e);
                Self::unknown()
            }
        }
    }
}

/// A generative cleanup service.
pub trait CleanupService: Send + Sync {
    /// Clean `request.text`.
    fn clean(&self, request: &CleanupRequest) -> Result<CleanupResponse>;
}

/// A structured field extractor.
pub trait FieldExtractor: Send + Sync {
    /// Extract tender fields from canonical text.
    fn extract(&self, text: &str) -> Result<TenderFields>;
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_follow_options() {
        let req = CleanupRequirements::from_options(&NormalizeOptions::ascii_lowercase());
        assert!(!req.preserve_case);
        assert!(!req.keep_hindi);
        assert!(req.standardize_tokens);
        assert_eq!(req.standardizations.len(), 3);

        let req = CleanupRequirements::default();
        assert!(req.preserve_case);
        assert!(req.keep_hindi);
    }

    #[test]
    fn test_cleanup_response_nulls() {
        let response = CleanupResponse::parse_lenient(
            r#"{"cleaned_text": "ok", "notes": null, "stats": {"fixes": 2}}"#,
        );
        assert_eq!(response.cleaned_text, "ok");
        assert!(response.notes.is_empty());
        assert!(response.removed_lines.is_empty());
        assert_eq!(response.stats.get("fixes"), Some(&Value::from(2)));
    }

    #[test]
    fn test_cleanup_response_without_text_falls_back() {
        let raw = r#"{"notes": ["nothing"]}"#;
        let response = CleanupResponse::parse_lenient(raw);
        assert_eq!(response.cleaned_text, raw);
        assert_eq!(response.notes.len(), 1);
    }

    #[test]
    fn test_unknown_document_type_string() {
        let fields = TenderFields::parse_lenient(r#"{"document_type": "invoice"}"#);
        assert_eq!(fields.document_type, DocumentType::Unknown);
        assert_eq!(fields.confidence, None);
    }

    #[test]
    fn test_schema_requires_document_type() {
        let schema = TenderFields::schema();
        assert_eq!(schema["required"], json!(["document_type"]));
        assert_eq!(
            schema["properties"]["document_type"]["enum"],
            json!(["tender", "unknown"])
        );
    }

    #[test]
    fn test_request_payload() {
        let request = TenderFields::request("Tender No. 5");
        assert_eq!(request["text"], "Tender No. 5");
        assert_eq!(request["instruction"], EXTRACTION_INSTRUCTIONS);
        assert!(request["schema"]["properties"]["items"].is_object());
    }
}
