//! Unit tests for individual components

use std::io::Cursor;

use resumatch::{
    error::AppError,
    models::{ExtractResponse, OptimizationResult, OptimizeRequest},
    services::{document::DocumentKind, extract, validate_resume_text, ExtractionError},
};

#[test]
fn test_document_kind_detection() {
    assert_eq!(DocumentKind::detect("resume.pdf"), DocumentKind::Pdf);
    assert_eq!(DocumentKind::detect("Resume.DOCX"), DocumentKind::Docx);
    assert_eq!(DocumentKind::detect("old_resume.doc"), DocumentKind::Docx);
    assert_eq!(DocumentKind::detect("notes.txt"), DocumentKind::PlainText);
    assert_eq!(DocumentKind::detect("archive.tar.gz"), DocumentKind::Unsupported);
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::InvalidApiKey.error_code(), "INVALID_API_KEY");
    assert_eq!(AppError::RateLimitExceeded.error_code(), "RATE_LIMIT_EXCEEDED");
    assert_eq!(
        AppError::FileTooLarge { size: 20, limit: 10 }.error_code(),
        "FILE_TOO_LARGE"
    );
    assert_eq!(AppError::validation("test").error_code(), "VALIDATION_ERROR");
    assert_eq!(AppError::config("test").error_code(), "CONFIG_ERROR");
    assert_eq!(AppError::optimizer("test").error_code(), "OPTIMIZER_ERROR");
    assert_eq!(
        AppError::from(ExtractionError::Unsupported).error_code(),
        "UNSUPPORTED_FORMAT"
    );
    assert_eq!(
        AppError::from(ExtractionError::InvalidDocx("bad".to_string())).error_code(),
        "EXTRACTION_ERROR"
    );
}

#[test]
fn test_error_status_codes() {
    use axum::http::StatusCode;

    assert_eq!(AppError::InvalidApiKey.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::RateLimitExceeded.status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        AppError::FileTooLarge { size: 20, limit: 10 }.status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        AppError::from(ExtractionError::Unsupported).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::from(ExtractionError::PdfFailed {
            strategy: "lopdf",
            cause: "broken xref".to_string(),
        })
        .status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AppError::optimizer("upstream down").status_code(),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn test_extraction_error_messages_name_the_failure() {
    let err = ExtractionError::PdfFailed {
        strategy: "pdf-extract",
        cause: "unexpected EOF".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("pdf-extract"));
    assert!(message.contains("unexpected EOF"));

    let unsupported = ExtractionError::Unsupported.to_string();
    assert!(unsupported.contains("PDF"));
    assert!(unsupported.contains("DOCX"));
    assert!(unsupported.contains("TXT"));
}

#[test]
fn test_extract_plain_text_through_public_api() {
    let mut reader = Cursor::new(b"Experience: 5 years.\n".to_vec());
    let text = extract(DocumentKind::PlainText, &mut reader).unwrap();
    assert_eq!(text, "Experience: 5 years.");
}

#[test]
fn test_extract_rejects_unsupported_kind() {
    let mut reader = Cursor::new(b"whatever".to_vec());
    let err = extract(DocumentKind::Unsupported, &mut reader).unwrap_err();
    assert!(matches!(err, ExtractionError::Unsupported));
}

#[test]
fn test_extract_response_shape() {
    let validation = validate_resume_text("too short");
    let response = ExtractResponse::new(
        "Skills: Rust, async services".to_string(),
        DocumentKind::PlainText,
        validation,
        42,
    );

    assert!(response.success);
    assert_eq!(response.data.kind, DocumentKind::PlainText);
    assert_eq!(response.data.characters, 28);
    assert_eq!(response.processing_time_ms, 42);
    assert!(!response.data.validation.is_valid);
}

#[test]
fn test_validation_boundaries() {
    let short = "a".repeat(49);
    assert!(!validate_resume_text(&short).is_valid);

    let long_but_generic = "a".repeat(50);
    assert!(!validate_resume_text(&long_but_generic).is_valid);

    let resume_like = format!("{} Skills: distributed systems", "a".repeat(50));
    let outcome = validate_resume_text(&resume_like);
    assert!(outcome.is_valid);
    assert_eq!(outcome.reason, "");
}

#[test]
fn test_optimize_request_deserializes() {
    let json = r#"{"job_description": "Rust engineer", "resume": "Jane Doe"}"#;
    let request: OptimizeRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.job_description, "Rust engineer");
    assert_eq!(request.resume, "Jane Doe");
}

#[test]
fn test_optimization_result_roundtrip() {
    let result = OptimizationResult {
        optimized_resume: "Jane Doe\nRust Engineer".to_string(),
        score: 77,
        keyword_matches: vec!["rust".to_string()],
        suggestions: vec!["Add metrics".to_string()],
        analysis: "Good fit".to_string(),
    };

    let json = serde_json::to_string(&result).unwrap();
    let parsed: OptimizationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.score, 77);
    assert_eq!(parsed.keyword_matches, vec!["rust"]);
}

#[test]
fn test_document_kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&DocumentKind::PlainText).unwrap(),
        "\"plain_text\""
    );
    assert_eq!(serde_json::to_string(&DocumentKind::Pdf).unwrap(), "\"pdf\"");
}
