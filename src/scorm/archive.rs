//! ZIP assembly for SCORM packages.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Write every regular file in the (flat) staging directory into a zip
/// archive at `dest`, using deflate compression. Entry names are the bare
/// file names so the manifest's relative hrefs stay valid inside the
/// archive. The archive is flushed and closed before returning.
pub fn write_archive(staging: &Path, dest: &Path) -> Result<()> {
    let file = File::create(dest).context("Failed to create archive file")?;
    let mut zip = ZipWriter::new(file);

    let options = FileOptions::<()>::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entries: Vec<_> = std::fs::read_dir(staging)
        .context("Failed to read staging directory")?
        .collect::<io::Result<_>>()
        .context("Failed to read staging entry")?;
    // Deterministic entry order across runs
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        zip.start_file(name, options)
            .context("Failed to start ZIP entry")?;
        let data = std::fs::read(&path).context("Failed to read staged file")?;
        zip.write_all(&data).context("Failed to write data to ZIP")?;
    }

    zip.finish().context("Failed to finish ZIP archive")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_is_flat_and_deflated() {
        let staging = tempfile::tempdir().unwrap();
        std::fs::write(staging.path().join("index.html"), "<html></html>").unwrap();
        std::fs::write(staging.path().join("imsmanifest.xml"), "<manifest/>").unwrap();
        std::fs::write(staging.path().join("response.pdf"), b"%PDF-1.4").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("package.zip");
        write_archive(staging.path(), &dest).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["imsmanifest.xml", "index.html", "response.pdf"]);
        assert!(names.iter().all(|n| !n.contains('/')));

        let entry = archive.by_name("response.pdf").unwrap();
        assert_eq!(entry.compression(), zip::CompressionMethod::Deflated);
    }

    #[test]
    fn test_archive_readable_immediately_after_return() {
        let staging = tempfile::tempdir().unwrap();
        std::fs::write(staging.path().join("index.html"), "x".repeat(4096)).unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("package.zip");
        write_archive(staging.path(), &dest).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut body = String::new();
        io::Read::read_to_string(&mut archive.by_name("index.html").unwrap(), &mut body).unwrap();
        assert_eq!(body.len(), 4096);
    }
}
