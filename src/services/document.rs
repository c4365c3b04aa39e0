use std::io::{Read, Seek};

use quick_xml::events::Event;
use thiserror::Error;

/// Classification of an uploaded file's format, derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
    Unsupported,
}

// Checked in this order; the extension sets are disjoint, but a fixed order
// keeps detection deterministic.
const SUPPORTED_TYPES: &[(DocumentKind, &[&str])] = &[
    (DocumentKind::Pdf, &[".pdf"]),
    (DocumentKind::Docx, &[".docx", ".doc"]),
    (DocumentKind::PlainText, &[".txt"]),
];

impl DocumentKind {
    /// Classify a filename by its extension, case-insensitively.
    pub fn detect(filename: &str) -> Self {
        let name = filename.to_lowercase();
        for (kind, extensions) in SUPPORTED_TYPES {
            if extensions.iter().any(|ext| name.ends_with(ext)) {
                return *kind;
            }
        }
        DocumentKind::Unsupported
    }

    pub fn supported_formats() -> String {
        SUPPORTED_TYPES
            .iter()
            .flat_map(|(_, extensions)| extensions.iter())
            .map(|ext| ext.trim_start_matches('.').to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid DOCX document: {0}")]
    InvalidDocx(String),

    #[error("PDF extraction failed ({strategy}): {cause}")]
    PdfFailed {
        strategy: &'static str,
        cause: String,
    },

    #[error("unsupported file type. Supported formats: PDF, DOCX, DOC, TXT")]
    Unsupported,
}

pub trait SeekRead: Read + Seek {}
impl<T: Read + Seek> SeekRead for T {}

/// One concrete way of turning PDF bytes into text. Strategies are tried in
/// order; the reader is rewound before each attempt.
struct PdfStrategy {
    name: &'static str,
    run: fn(&mut dyn SeekRead) -> anyhow::Result<String>,
}

const PDF_STRATEGIES: &[PdfStrategy] = &[
    PdfStrategy {
        name: "pdf-extract",
        run: pdf_layout_text,
    },
    PdfStrategy {
        name: "lopdf",
        run: pdf_page_text,
    },
];

/// Extract plain text from a document of the given kind.
///
/// The returned text is stripped of leading and trailing whitespace; interior
/// whitespace and line breaks are preserved as the source document had them.
pub fn extract<R: Read + Seek>(
    kind: DocumentKind,
    reader: &mut R,
) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => run_pdf_strategies(reader, PDF_STRATEGIES),
        DocumentKind::Docx => extract_docx(reader),
        DocumentKind::PlainText => extract_plain_text(reader),
        DocumentKind::Unsupported => Err(ExtractionError::Unsupported),
    }
}

fn run_pdf_strategies(
    reader: &mut dyn SeekRead,
    strategies: &[PdfStrategy],
) -> Result<String, ExtractionError> {
    let mut last_failure: Option<(&'static str, anyhow::Error)> = None;

    for strategy in strategies {
        // The previous attempt may have consumed the stream.
        reader.rewind()?;

        match (strategy.run)(reader) {
            Ok(text) => {
                if let Some((failed, _)) = &last_failure {
                    tracing::info!(
                        failed_strategy = failed,
                        used_strategy = strategy.name,
                        "PDF fallback strategy succeeded"
                    );
                }
                return Ok(text.trim().to_string());
            }
            Err(err) => {
                tracing::warn!(
                    strategy = strategy.name,
                    error = %err,
                    "PDF extraction strategy failed"
                );
                last_failure = Some((strategy.name, err));
            }
        }
    }

    match last_failure {
        Some((strategy, cause)) => Err(ExtractionError::PdfFailed {
            strategy,
            cause: cause.to_string(),
        }),
        None => Err(ExtractionError::PdfFailed {
            strategy: "none",
            cause: "no extraction strategies configured".to_string(),
        }),
    }
}

/// Primary PDF strategy: layout-aware whole-document extraction. Better at
/// preserving spacing and column structure.
fn pdf_layout_text(reader: &mut dyn SeekRead) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Fallback PDF strategy: per-page text extraction, pages joined with
/// newlines. Different parsers fail on different malformed PDFs, so chaining
/// two independent implementations raises the overall success rate.
fn pdf_page_text(reader: &mut dyn SeekRead) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let doc = lopdf::Document::load_mem(&bytes).map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut pages = Vec::new();
    for (number, _) in doc.get_pages() {
        let text = doc
            .extract_text(&[number])
            .map_err(|e| anyhow::anyhow!("page {number}: {e}"))?;
        pages.push(text);
    }
    Ok(pages.join("\n"))
}

/// Reads `word/document.xml` out of the DOCX container and concatenates the
/// run text of each paragraph in document order, one line per paragraph.
fn extract_docx(reader: &mut dyn SeekRead) -> Result<String, ExtractionError> {
    reader.rewind()?;
    let mut archive = zip::ZipArchive::new(&mut *reader)
        .map_err(|e| ExtractionError::InvalidDocx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::InvalidDocx(format!("missing document part: {e}")))?
        .read_to_string(&mut xml)?;

    let mut xml_reader = quick_xml::Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match xml_reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let piece = t
                    .unescape()
                    .map_err(|e| ExtractionError::InvalidDocx(format!("bad text run: {e}")))?;
                current.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::InvalidDocx(format!(
                    "malformed document XML: {e}"
                )))
            }
        }
    }

    Ok(paragraphs.join("\n").trim().to_string())
}

/// Reads the whole stream and decodes it as UTF-8, retrying as Latin-1 when
/// UTF-8 fails. Latin-1 accepts every byte value, so the retry itself cannot
/// fail; only the read can.
fn extract_plain_text(reader: &mut dyn SeekRead) -> Result<String, ExtractionError> {
    reader.rewind()?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!("text file is not valid UTF-8, decoding as Latin-1");
            decode_latin1(err.as_bytes())
        }
    };

    Ok(content.trim().to_string())
}

fn decode_latin1(bytes: &[u8]) -> String {
    // Latin-1 maps byte n to U+00n, so this conversion is total.
    bytes.iter().map(|&b| b as char).collect()
}
