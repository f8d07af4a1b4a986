//! Archive creation and extraction for assembled charts
//!
//! Charts are packaged as `.tar.gz` files whose root is the content of the
//! chart directory. Entries are written in sorted order with a zero mtime so
//! the same chart directory always produces the same archive.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tar::{Archive, Builder, EntryType, Header};
use walkdir::WalkDir;

use crate::error::{CoreError, Result};

/// File extension and artifact type of chart archives
pub const ARCHIVE_TYPE: &str = "tar.gz";

/// Archive file name for a chart variant
///
/// `<name>-<version>-<classifier>.tar.gz`, or `<name>-<classifier>.tar.gz`
/// when the project has no version.
#[must_use]
pub fn archive_file_name(name: &str, version: Option<&str>, classifier: &str) -> String {
    match version.filter(|v| !v.trim().is_empty()) {
        Some(version) => format!("{name}-{version}-{classifier}.{ARCHIVE_TYPE}"),
        None => format!("{name}-{classifier}.{ARCHIVE_TYPE}"),
    }
}

/// Create a tar.gz archive holding the contents of `chart_dir`
pub fn create_archive(chart_dir: &Path, output: &Path) -> Result<PathBuf> {
    write_archive(chart_dir, output).map_err(|source| CoreError::Archive {
        source_dir: chart_dir.to_path_buf(),
        destination: output.to_path_buf(),
        source,
    })?;

    Ok(output.to_path_buf())
}

fn write_archive(chart_dir: &Path, output: &Path) -> std::io::Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);

    for entry in WalkDir::new(chart_dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(chart_dir).unwrap_or(entry.path());
        if rel_path.as_os_str().is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            add_dir_to_archive(&mut builder, rel_path)?;
        } else {
            let content = std::fs::read(entry.path())?;
            add_bytes_to_archive(&mut builder, rel_path, &content)?;
        }
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?.flush()
}

fn add_dir_to_archive<W: Write>(
    builder: &mut Builder<W>,
    archive_path: &Path,
) -> std::io::Result<()> {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Directory);
    header.set_size(0);
    header.set_mode(0o755);
    header.set_mtime(0);
    header.set_cksum();

    builder.append_data(&mut header, archive_path, std::io::empty())
}

fn add_bytes_to_archive<W: Write>(
    builder: &mut Builder<W>,
    archive_path: &Path,
    content: &[u8],
) -> std::io::Result<()> {
    let mut header = Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();

    builder.append_data(&mut header, archive_path, content)
}

/// Extract an archive to a destination directory
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    std::fs::create_dir_all(dest)?;
    archive.unpack(dest)?;

    Ok(())
}

/// Information about a file in an archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Relative path within the archive
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
}

/// List entries in an archive
pub fn list_archive(archive_path: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    let mut entries = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        let path = entry.path()?.to_string_lossy().to_string();
        let size = entry.header().size()?;
        let is_dir = entry.header().entry_type().is_dir();

        entries.push(ArchiveEntry { path, size, is_dir });
    }

    Ok(entries)
}
