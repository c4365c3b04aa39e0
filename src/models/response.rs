use serde::{Deserialize, Serialize};

use crate::services::document::DocumentKind;
use crate::services::validation::ValidationOutcome;

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: ExtractData,
    pub processing_time_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractData {
    pub text: String,
    pub kind: DocumentKind,
    pub characters: usize,
    pub validation: ValidationOutcome,
}

impl ExtractResponse {
    pub fn new(
        text: String,
        kind: DocumentKind,
        validation: ValidationOutcome,
        processing_time_ms: u64,
    ) -> Self {
        let characters = text.chars().count();
        Self {
            success: true,
            data: ExtractData {
                text,
                kind,
                characters,
                validation,
            },
            processing_time_ms,
        }
    }
}

/// Structured feedback returned by the language model. The model is asked for
/// a JSON object with exactly these fields; the list fields default to empty
/// when omitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimized_resume: String,
    pub score: u8,
    #[serde(default)]
    pub keyword_matches: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub data: OptimizationResult,
    pub processing_time_ms: u64,
}

impl OptimizeResponse {
    pub fn new(data: OptimizationResult, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            data,
            processing_time_ms,
        }
    }
}
