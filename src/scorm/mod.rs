//! SCORM package builder.
//!
//! Transforms an answer text plus a format selector into a downloadable
//! SCORM 1.2 zip archive: an HTML viewer shell, a rendered content file
//! (PDF or Word), and an IMS manifest, all at the archive root.
//!
//! Staging is a per-request temporary directory and archive names carry a
//! per-request UUID, so concurrent builds never share paths. The staging
//! directory is removed on every exit path, including render failures.

pub mod archive;
pub mod manifest;

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::render::{pdf::PdfRenderer, word::WordRenderer, ContentRenderer, RenderError};

/// Output format selector for a SCORM package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    Pdf,
    Word,
}

impl PackageFormat {
    /// Parse the wire selector. Only `pdf` and `doc` are recognized;
    /// anything else is a caller error handled before any file I/O.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Word),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "doc",
        }
    }

    /// Bare name of the rendered content file inside the package.
    pub fn content_file_name(&self) -> &'static str {
        match self {
            Self::Pdf => "response.pdf",
            Self::Word => "response.docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    fn renderer(&self) -> Box<dyn ContentRenderer> {
        match self {
            Self::Pdf => Box::new(PdfRenderer),
            Self::Word => Box::new(WordRenderer),
        }
    }
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to stage package files: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to assemble archive: {0}")]
    Archive(#[from] anyhow::Error),
}

/// Builds SCORM packages into a fixed output directory.
pub struct PackageBuilder {
    output_dir: PathBuf,
    branding: PathBuf,
}

impl PackageBuilder {
    pub fn new(output_dir: impl Into<PathBuf>, branding: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            branding: branding.into(),
        }
    }

    /// Build a package for `content` and return the archive path.
    ///
    /// On success the archive is fully flushed and closed. On failure no
    /// archive is left behind and the staging directory is gone either way.
    pub fn build(&self, content: &str, format: PackageFormat) -> Result<PathBuf, PackageError> {
        let staging = tempfile::tempdir()?;

        let renderer = format.renderer();
        renderer.render(
            content,
            &staging.path().join(renderer.file_name()),
            &self.branding,
        )?;

        std::fs::write(
            staging.path().join("index.html"),
            html_shell(format, content),
        )?;
        std::fs::write(
            staging.path().join("imsmanifest.xml"),
            manifest::render(format.content_file_name()),
        )?;

        let archive_path = self.output_dir.join(format!(
            "scorm_{}_package_{}.zip",
            format.slug(),
            Uuid::new_v4()
        ));
        archive::write_archive(staging.path(), &archive_path)?;

        tracing::info!(
            format = format.slug(),
            archive = %archive_path.display(),
            "SCORM package built"
        );
        Ok(archive_path)
    }
}

/// Generate the static HTML viewer shell.
///
/// PDF packages embed the rendered document in an inline frame. Word
/// packages inline the answer text itself, converting literal newlines to
/// `<br>` so the preview reflows; the .docx keeps them in one paragraph,
/// so preview and download can visually disagree.
pub fn html_shell(format: PackageFormat, content: &str) -> String {
    match format {
        PackageFormat::Pdf => "<!DOCTYPE html>\n\
             <html>\n\
             <head><title>PDF Analysis</title></head>\n\
             <body>\n\
             <h1>PDF Analysis Response</h1>\n\
             <iframe src=\"response.pdf\" width=\"100%\" height=\"600px\"></iframe>\n\
             </body>\n\
             </html>\n"
            .to_string(),
        PackageFormat::Word => format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head><title>PDF Analysis</title></head>\n\
             <body>\n\
             <h1>PDF Analysis Response</h1>\n\
             <p>{}</p>\n\
             </body>\n\
             </html>\n",
            content.replace('\n', "<br>")
        ),
    }
}
