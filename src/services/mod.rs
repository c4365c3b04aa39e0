pub mod document;
pub mod optimizer;
pub mod validation;

pub use document::{extract, DocumentKind, ExtractionError};
pub use optimizer::ResumeOptimizer;
pub use validation::{validate_resume_text, ValidationOutcome};
