use serde::{Deserialize, Serialize};

use crate::services::document::DocumentKind;

/// A file received from a multipart upload, held entirely in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
        }
    }

    /// Classification is based on the logical filename only; the content is
    /// not inspected.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::detect(&self.name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub job_description: String,
    pub resume: String,
}
