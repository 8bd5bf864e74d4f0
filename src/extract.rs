//! PDF text extraction for uploaded documents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(#[from] pdf_extract::OutputError),
}

/// Extract the concatenated visible text of all pages from a PDF byte stream.
///
/// Best-effort: pages with no extractable text contribute an empty string.
/// There is no fallback strategy for unreadable or corrupt documents.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{pdf::PdfRenderer, ContentRenderer};
    use std::path::Path;

    #[test]
    fn test_extract_round_trip_with_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("sample.pdf");
        let logo = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/logo.jpeg");

        PdfRenderer
            .render("the quick brown fox", &pdf_path, &logo)
            .unwrap();

        let bytes = std::fs::read(&pdf_path).unwrap();
        let text = extract_text(&bytes).unwrap();
        assert!(
            text.contains("the quick brown fox"),
            "extracted text was: {}",
            text
        );
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let result = extract_text(b"this is not a pdf at all");
        assert!(result.is_err());
    }
}
