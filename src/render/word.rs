//! Word renderer for SCORM content files.
//!
//! The body is written as a single paragraph: embedded newlines are kept as
//! literal characters and do NOT become paragraph breaks. The HTML preview
//! in the package converts them to line breaks, so the two renditions can
//! visually disagree. That asymmetry is part of the renderer contract.

use super::{require_branding, ContentRenderer, RenderError, DOCUMENT_TITLE};
use docx_rs::{Docx, Paragraph, Pic, Run};
use std::fs::File;
use std::path::Path;

/// Fixed branding display size in EMU (square logo, ~158px).
const LOGO_SIZE_EMU: u32 = 1_500_000;

/// Title size in half-points (16pt, matching the PDF renderer).
const TITLE_SIZE_HALF_PT: usize = 32;

pub struct WordRenderer;

impl ContentRenderer for WordRenderer {
    fn render(&self, content: &str, dest: &Path, branding: &Path) -> Result<(), RenderError> {
        require_branding(branding)?;

        let logo = std::fs::read(branding)?;
        let pic = Pic::new(&logo).size(LOGO_SIZE_EMU, LOGO_SIZE_EMU);

        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)))
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(DOCUMENT_TITLE)
                        .size(TITLE_SIZE_HALF_PT)
                        .bold(),
                ),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(content)));

        let file = File::create(dest)?;
        docx.build()
            .pack(file)
            .map_err(|e| RenderError::Word(e.to_string()))?;
        Ok(())
    }

    fn file_name(&self) -> &'static str {
        "response.docx"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

    fn logo_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/logo.jpeg")
    }

    /// Collect the text of each paragraph in a .docx byte stream.
    pub(crate) fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
        let docx = read_docx(bytes).expect("valid docx");
        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(para) = child {
                let mut parts = Vec::new();
                for pc in &para.children {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                parts.push(t.text.clone());
                            }
                        }
                    }
                }
                paragraphs.push(parts.concat());
            }
        }
        paragraphs
    }

    #[test]
    fn test_render_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.docx");
        WordRenderer
            .render("the answer body", &dest, &logo_path())
            .unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        let paragraphs = paragraph_texts(&bytes);
        assert!(paragraphs.iter().any(|p| p == DOCUMENT_TITLE));
        assert!(paragraphs.iter().any(|p| p == "the answer body"));
    }

    #[test]
    fn test_newlines_stay_in_one_paragraph() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.docx");
        WordRenderer
            .render("line one\nline two", &dest, &logo_path())
            .unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        let paragraphs = paragraph_texts(&bytes);
        // Logo paragraph, title paragraph, exactly one body paragraph
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[2].contains("line one"));
        assert!(paragraphs[2].contains("line two"));
    }

    #[test]
    fn test_render_empty_content_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.docx");
        WordRenderer.render("", &dest, &logo_path()).unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        // Still a structurally valid document with the title present
        let paragraphs = paragraph_texts(&bytes);
        assert!(paragraphs.iter().any(|p| p == DOCUMENT_TITLE));
    }

    #[test]
    fn test_render_missing_branding_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.docx");
        let err = WordRenderer
            .render("text", &dest, Path::new("/nonexistent/logo.jpeg"))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingBranding(_)));
    }
}
