//! Content renderers for SCORM packages.
//!
//! One rendering capability, pluggable by output format. Each renderer takes
//! the answer text, a destination path, and a branding image and produces a
//! single document file. Newline interpretation is left to each renderer:
//! the PDF renderer starts a new line per newline, the Word renderer keeps
//! the body as one paragraph.

pub mod pdf;
pub mod word;

use std::path::Path;
use thiserror::Error;

/// Title placed above the answer body in both document formats.
pub const DOCUMENT_TITLE: &str = "Research Content Response";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Branding image not found at '{0}'")]
    MissingBranding(String),
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error("Word rendering failed: {0}")]
    Word(String),
}

/// A format-specific document renderer.
pub trait ContentRenderer: Send + Sync {
    /// Render `content` into a document at `dest`, stamping the branding
    /// image from `branding`. Content may be empty or arbitrarily long and
    /// is embedded verbatim, never escaped or truncated.
    fn render(&self, content: &str, dest: &Path, branding: &Path) -> Result<(), RenderError>;

    /// Bare file name this renderer produces inside a package.
    fn file_name(&self) -> &'static str;
}

pub(crate) fn require_branding(branding: &Path) -> Result<(), RenderError> {
    if !branding.is_file() {
        return Err(RenderError::MissingBranding(
            branding.display().to_string(),
        ));
    }
    Ok(())
}
