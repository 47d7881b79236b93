//! Integration tests for the downstream service boundary types.

use std::sync::Arc;
use unocr::error::Result;
use unocr::service::CLEANUP_INSTRUCTIONS;
use unocr::{
    normalize_default, CleanupRequest, CleanupResponse, CleanupService, DocumentType,
    FieldExtractor, NormalizeOptions, Normalizer, TenderFields,
};

/// Cleanup service that only trims, standing in for a generative service.
struct TrimService;

impl CleanupService for TrimService {
    fn clean(&self, request: &CleanupRequest) -> Result<CleanupResponse> {
        Ok(CleanupResponse {
            cleaned_text: request.text.trim().to_string(),
            notes: vec!["trimmed".to_string()],
            ..Default::default()
        })
    }
}

/// Extractor that replays a canned JSON reply.
struct CannedExtractor {
    reply: &'static str,
}

impl FieldExtractor for CannedExtractor {
    fn extract(&self, _text: &str) -> Result<TenderFields> {
        Ok(TenderFields::parse_lenient(self.reply))
    }
}

#[test]
fn test_request_from_normalized_text() {
    let options = NormalizeOptions::default();
    let result = Normalizer::new(options.clone())
        .unwrap()
        .normalize("Cost: Rs. 500");
    let request = CleanupRequest::from_normalized(&result, &options);

    assert_eq!(request.text, "Cost: INR 500");
    assert!(request.requirements.preserve_case);
    assert!(request.requirements.keep_hindi);

    let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
    assert_eq!(json["text"], "Cost: INR 500");
    assert_eq!(json["requirements"]["standardize_tokens"], true);
    assert!(CLEANUP_INSTRUCTIONS.contains("cleaned_text"));
}

#[test]
fn test_response_from_pipeline() {
    let result = normalize_default("Page 1 of 2\nTax: 18 %");
    let response = CleanupResponse::from(&result);

    assert_eq!(response.cleaned_text, "Tax: 18%");
    assert_eq!(response.removed_lines, vec!["Page 1 of 2"]);
    assert_eq!(response.stats["percent_spacing"], 1);
    assert_eq!(response.notes, result.diagnostics().notes);
}

#[test]
fn test_response_parse_lenient() {
    let response = CleanupResponse::parse_lenient(
        r#"{"cleaned_text": "Tender for supply", "notes": ["merged lines"], "removed_lines": ["Page 1"], "stats": {"merged": 1}}"#,
    );
    assert_eq!(response.cleaned_text, "Tender for supply");
    assert_eq!(response.notes, vec!["merged lines"]);
    assert_eq!(response.removed_lines, vec!["Page 1"]);

    let response = CleanupResponse::parse_lenient("Sorry, here is the text: Tender");
    assert_eq!(response.cleaned_text, "Sorry, here is the text: Tender");
    assert!(!response.notes.is_empty());
}

#[test]
fn test_tender_fields_parse() {
    let fields = TenderFields::parse_lenient(
        r#"{
            "document_type": "tender",
            "title": "Supply of Laboratory Equipment",
            "buyer": "AIIMS Delhi",
            "tender_id": "AIIMS/PUR/2024/123",
            "publication_date": "2024-01-15",
            "submission_deadline": null,
            "estimated_value_inr": 5000000.0,
            "currency": "INR",
            "items": [
                {"description": "Laboratory Centrifuge", "quantity": 5, "unit": "pieces", "specs": "Min 5000 RPM"}
            ],
            "confidence": 0.9
        }"#,
    );

    assert_eq!(fields.document_type, DocumentType::Tender);
    assert_eq!(fields.buyer.as_deref(), Some("AIIMS Delhi"));
    assert_eq!(fields.submission_deadline, None);
    assert_eq!(fields.contact, None);
    assert_eq!(fields.estimated_value_inr, Some(5_000_000.0));
    assert_eq!(fields.items.len(), 1);
    assert_eq!(fields.items[0].quantity, Some(5.0));
    assert_eq!(fields.confidence, Some(0.9));
}

#[test]
fn test_tender_fields_fallback() {
    let fields = TenderFields::parse_lenient("not json at all");
    assert_eq!(fields, TenderFields::unknown());
    assert_eq!(fields.document_type, DocumentType::Unknown);
    assert_eq!(fields.confidence, Some(0.0));

    let json = serde_json::to_value(&fields).unwrap();
    assert_eq!(json["document_type"], "unknown");
}

#[test]
fn test_tender_fields_null_items() {
    let fields = TenderFields::parse_lenient(r#"{"document_type": "tender", "items": null}"#);
    assert_eq!(fields.document_type, DocumentType::Tender);
    assert!(fields.items.is_empty());
}

#[test]
fn test_services_as_trait_objects() {
    let cleaner: Arc<dyn CleanupService> = Arc::new(TrimService);
    let extractor: Arc<dyn FieldExtractor> = Arc::new(CannedExtractor {
        reply: r#"{"document_type": "tender", "tender_id": "T-42"}"#,
    });

    let options = NormalizeOptions::default();
    let request = CleanupRequest::new("  Tender T-42  ", &options);
    let response = cleaner.clean(&request).unwrap();
    assert_eq!(response.cleaned_text, "Tender T-42");

    let fields = extractor.extract(&response.cleaned_text).unwrap();
    assert_eq!(fields.tender_id.as_deref(), Some("T-42"));
}
