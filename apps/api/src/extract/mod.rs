// Text Extraction Layer
// Implements: per-format extraction (PDF, DOCX, image OCR) behind one trait.
// Extractors produce a string of text or a typed failure; they never panic on
// malformed input. Callers decide whether a failure degrades or aborts.

mod docx;
mod image;
mod pdf;

pub use docx::DocxExtractor;
pub use image::ImageExtractor;
pub use pdf::PdfExtractor;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted upload formats, resolved from the declared MIME type.
/// Anything else is rejected before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Png,
    Jpeg,
}

impl DocumentFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/msword" => Some(Self::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// The extraction capability boundary: raw document bytes in, text out.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Dispatches uploaded bytes to the extractor for the declared format.
pub async fn extract_document(
    format: DocumentFormat,
    bytes: &[u8],
) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes).await,
        DocumentFormat::Doc | DocumentFormat::Docx => DocxExtractor.extract(bytes).await,
        DocumentFormat::Png | DocumentFormat::Jpeg => ImageExtractor.extract(bytes).await,
    }
}
