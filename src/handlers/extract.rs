use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::try_acquire_permit;
use crate::models::{ExtractResponse, UploadedFile};
use crate::services::{document, validate_resume_text};

pub async fn extract_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting document extraction request");

    let _permit = try_acquire_permit().ok_or_else(|| {
        warn!(request_id = %request_id, "Rate limit exceeded");
        AppError::RateLimitExceeded
    })?;

    let file = read_file_from_multipart(&mut multipart).await?;

    info!(
        request_id = %request_id,
        file_name = %file.name,
        file_size = file.size,
        "File received"
    );

    let max_size_bytes = state.config.max_file_size_bytes();
    if file.size > max_size_bytes {
        warn!(
            request_id = %request_id,
            file_size = file.size,
            max_size = max_size_bytes,
            "File size exceeds limit"
        );
        return Err(AppError::FileTooLarge {
            size: file.size / (1024 * 1024),
            limit: state.config.max_file_size_mb,
        });
    }

    let kind = file.kind();
    let mut reader = Cursor::new(&file.content);
    let text = document::extract(kind, &mut reader).map_err(|e| {
        error!(request_id = %request_id, kind = ?kind, error = %e, "Extraction failed");
        AppError::from(e)
    })?;

    // A failed validation is reported in the body; the caller may still use
    // the text or re-supply it manually.
    let validation = validate_resume_text(&text);
    if !validation.is_valid {
        warn!(
            request_id = %request_id,
            reason = %validation.reason,
            "Extracted text failed resume validation"
        );
    }

    let total_time = start.elapsed().as_millis() as u64;
    info!(
        request_id = %request_id,
        kind = ?kind,
        text_chars = text.chars().count(),
        total_time_ms = total_time,
        "Extraction completed"
    );

    Ok(Json(ExtractResponse::new(text, kind, validation, total_time)))
}

async fn read_file_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::InvalidFile {
        message: format!("Failed to read multipart field: {}", e),
    })? {
        if field.name().unwrap_or("") != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();

        let data = field.bytes().await.map_err(|e| AppError::InvalidFile {
            message: format!("Failed to read file data: {}", e),
        })?;

        if data.is_empty() {
            return Err(AppError::InvalidFile {
                message: "File is empty".to_string(),
            });
        }

        return Ok(UploadedFile::new(file_name, data.to_vec()));
    }

    Err(AppError::MissingFile)
}
