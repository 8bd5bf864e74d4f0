//! PDF renderer for SCORM content files.

use super::{require_branding, ContentRenderer, RenderError, DOCUMENT_TITLE};
use printpdf::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LOGO_WIDTH_MM: f32 = 30.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 7.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;

/// Wrap width in characters for the 190mm body block at 12pt Helvetica.
const WRAP_COLS: usize = 90;

pub struct PdfRenderer;

impl ContentRenderer for PdfRenderer {
    fn render(&self, content: &str, dest: &Path, branding: &Path) -> Result<(), RenderError> {
        require_branding(branding)?;

        let (doc, page1, layer1) =
            PdfDocument::new(DOCUMENT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let mut layer = doc.get_page(page1).get_layer(layer1);

        add_logo(&layer, branding)?;

        // Title, centered below the logo
        let title_x = centered_x(DOCUMENT_TITLE, TITLE_SIZE_PT);
        layer.use_text(
            DOCUMENT_TITLE,
            TITLE_SIZE_PT,
            Mm(title_x),
            Mm(PAGE_HEIGHT_MM - 52.0),
            &font_bold,
        );

        // Body text, wrapped into the fixed-width block below the title
        let mut y = PAGE_HEIGHT_MM - 62.0;
        for line in wrap_lines(content, WRAP_COLS) {
            if y < BOTTOM_MARGIN_MM {
                let (page, new_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(new_layer);
                y = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
            }
            if !line.is_empty() {
                layer.use_text(line, BODY_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            }
            y -= LINE_HEIGHT_MM;
        }

        let file = File::create(dest)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(())
    }

    fn file_name(&self) -> &'static str {
        "response.pdf"
    }
}

/// Stamp the branding image at the fixed top-left position.
fn add_logo(layer: &PdfLayerReference, branding: &Path) -> Result<(), RenderError> {
    let mut reader = BufReader::new(File::open(branding)?);
    let decoder = image_crate::codecs::jpeg::JpegDecoder::new(&mut reader)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let image = Image::try_from(decoder).map_err(|e| RenderError::Pdf(e.to_string()))?;

    // Scale to the fixed display width regardless of source resolution
    let native_width_mm = image.image.width.0 as f32 * 25.4 / 300.0;
    let scale = LOGO_WIDTH_MM / native_width_mm;
    let native_height_mm = image.image.height.0 as f32 * 25.4 / 300.0;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - 8.0 - native_height_mm * scale)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(300.0),
            ..Default::default()
        },
    );
    Ok(())
}

/// Approximate centering for built-in Helvetica (no glyph metrics available).
fn centered_x(text: &str, size_pt: f32) -> f32 {
    let text_width_mm = text.len() as f32 * size_pt * 0.5 * 0.352778;
    ((PAGE_WIDTH_MM - text_width_mm) / 2.0).max(MARGIN_MM)
}

/// Greedy word wrap honoring embedded newlines. Words longer than `cols`
/// are hard-split so arbitrarily long tokens cannot overflow the block.
fn wrap_lines(content: &str, cols: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in content.split('\n') {
        if raw_line.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;
            while word.chars().count() > cols {
                // Hard split over-long tokens at the column boundary
                let split_at = word
                    .char_indices()
                    .nth(cols)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                out.push(word[..split_at].to_string());
                word = &word[split_at..];
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > cols && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/logo.jpeg")
    }

    #[test]
    fn test_render_produces_pdf_header() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.pdf");
        PdfRenderer
            .render("hello from the renderer", &dest, &logo_path())
            .unwrap();
        let bytes = std::fs::read(&dest).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_content_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.pdf");
        PdfRenderer.render("", &dest, &logo_path()).unwrap();
        assert!(dest.is_file());
    }

    #[test]
    fn test_render_long_content_spills_pages() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.pdf");
        let content = "lorem ipsum dolor sit amet ".repeat(500);
        PdfRenderer.render(&content, &dest, &logo_path()).unwrap();
        let bytes = std::fs::read(&dest).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // More than one page object once the body overflows A4. "/Page"
        // occurrences not followed by 's' are the per-page /Type entries.
        let marker = b"/Page";
        let pages = bytes
            .windows(marker.len() + 1)
            .filter(|w| w.starts_with(marker) && w[marker.len()] != b's')
            .count();
        assert!(pages > 1, "expected page spill, got {} page(s)", pages);
    }

    #[test]
    fn test_render_missing_branding_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("response.pdf");
        let err = PdfRenderer
            .render("text", &dest, Path::new("/nonexistent/logo.jpeg"))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingBranding(_)));
    }

    #[test]
    fn test_wrap_honors_newlines() {
        let lines = wrap_lines("first line\nsecond line", 90);
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let token = "x".repeat(200);
        let lines = wrap_lines(&token, 90);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 90));
    }

    #[test]
    fn test_wrap_width_respected() {
        let content = "word ".repeat(100);
        for line in wrap_lines(&content, 30) {
            assert!(line.chars().count() <= 30);
        }
    }
}
