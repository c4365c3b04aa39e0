use serde::{Deserialize, Serialize};

/// Minimum number of characters (after trimming) for text to be considered
/// substantial enough to optimize.
pub const MIN_RESUME_CHARS: usize = 50;

/// Words that typical resume content contains. Matching any one of them is
/// enough; this is a heuristic and accepts both false positives and false
/// negatives by design.
pub const RESUME_KEYWORDS: [&str; 10] = [
    "experience",
    "education",
    "skills",
    "work",
    "employment",
    "university",
    "college",
    "degree",
    "certification",
    "project",
];

/// Outcome of the resume-content check. A failed validation is a normal
/// value, not an error; callers decide whether to proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub reason: String,
}

impl ValidationOutcome {
    fn valid() -> Self {
        Self {
            is_valid: true,
            reason: String::new(),
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

/// Heuristic check that extracted text is long enough and resembles resume
/// content.
pub fn validate_resume_text(text: &str) -> ValidationOutcome {
    if text.trim().chars().count() < MIN_RESUME_CHARS {
        return ValidationOutcome::invalid(
            "The extracted text is too short. Please ensure your resume has sufficient content.",
        );
    }

    let lowered = text.to_lowercase();
    let has_resume_content = RESUME_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword));

    if !has_resume_content {
        return ValidationOutcome::invalid(
            "The document doesn't appear to contain typical resume content. \
             Please verify you uploaded the correct file.",
        );
    }

    ValidationOutcome::valid()
}
