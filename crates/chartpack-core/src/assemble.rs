//! Chart directory assembly
//!
//! Populates an empty output directory with the standard chart layout:
//!
//! ```text
//! <output>/
//!   Chart.yaml
//!   templates/        copy of the source manifests
//!   README[.ext]      optional
//!   LICENSE[.ext]     optional
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CoreError, Result};
use crate::metadata::ChartMetadata;

/// Subdirectory receiving the manifests
pub const TEMPLATES_DIR: &str = "templates";

/// Base names of the support files copied from the project root
pub const SUPPORT_FILES: &[&str] = &["README", "LICENSE"];

/// Files written by a successful assembly
#[derive(Debug, Clone, Default)]
pub struct AssembledChart {
    /// Chart directory
    pub dir: PathBuf,
    /// Manifests copied into `templates/`, relative to the chart directory
    pub templates: Vec<PathBuf>,
    /// Support files copied from the project root
    pub support_files: Vec<PathBuf>,
}

/// Builds a chart directory from a manifest source directory
#[derive(Debug)]
pub struct ChartAssembler<'a> {
    metadata: &'a ChartMetadata,
    project_dir: &'a Path,
}

impl<'a> ChartAssembler<'a> {
    pub fn new(metadata: &'a ChartMetadata, project_dir: &'a Path) -> Self {
        Self {
            metadata,
            project_dir,
        }
    }

    pub fn assemble(&self, source_dir: &Path, output_dir: &Path) -> Result<AssembledChart> {
        let templates = copy_templates(source_dir, output_dir)?;
        self.metadata.write_to(output_dir)?;

        let mut support_files = Vec::new();
        for base_name in SUPPORT_FILES {
            if let Some(copied) = copy_support_file(self.project_dir, base_name, output_dir)? {
                support_files.push(copied);
            }
        }

        Ok(AssembledChart {
            dir: output_dir.to_path_buf(),
            templates,
            support_files,
        })
    }
}

/// Recursively copy `source_dir` into `<output_dir>/templates`
fn copy_templates(source_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let templates_dir = output_dir.join(TEMPLATES_DIR);
    copy_tree(source_dir, &templates_dir).map_err(|source| CoreError::CopyTemplates {
        source_dir: source_dir.to_path_buf(),
        destination: templates_dir.clone(),
        source,
    })
}

fn copy_tree(src: &Path, dest: &Path) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dest)?;
    let mut copied = Vec::new();

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(src).unwrap_or(entry.path());
        if rel_path.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(rel_path);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied.push(Path::new(TEMPLATES_DIR).join(rel_path));
        }
    }

    Ok(copied)
}

/// Files in `dir` whose name is `base_name` or `base_name.*`, ignoring case
///
/// Candidates are sorted by file name so the choice among several matches
/// does not depend on directory listing order.
pub fn find_support_files(dir: &Path, base_name: &str) -> std::io::Result<Vec<PathBuf>> {
    let base = base_name.to_lowercase();
    let prefix = format!("{base}.");

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if (name == base || name.starts_with(&prefix)) && entry.path().is_file() {
            matches.push(entry.path());
        }
    }

    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(matches)
}

/// Copy the first support file matching `base_name` into `output_dir`
///
/// The copy keeps its original file name. Returns `None` when the project
/// has no such file.
fn copy_support_file(
    project_dir: &Path,
    base_name: &str,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    let candidates = find_support_files(project_dir, base_name).map_err(|source| {
        CoreError::CopySupportFile {
            source_file: project_dir.join(base_name),
            destination: output_dir.join(base_name),
            source,
        }
    })?;

    let Some(chosen) = candidates.first() else {
        return Ok(None);
    };

    if let Some(message) = ambiguity_warning(&candidates, base_name, project_dir) {
        tracing::warn!("{}", message);
    }

    let file_name = chosen
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(base_name));
    let destination = output_dir.join(&file_name);
    fs::copy(chosen, &destination).map_err(|source| CoreError::CopySupportFile {
        source_file: chosen.clone(),
        destination: destination.clone(),
        source,
    })?;

    Ok(Some(file_name))
}

/// Warning text for more than one support file candidate
fn ambiguity_warning(
    candidates: &[PathBuf],
    base_name: &str,
    project_dir: &Path,
) -> Option<String> {
    let chosen = candidates.first().filter(|_| candidates.len() > 1)?;
    Some(format!(
        "Found {} {} files in {}. Using first one {}",
        candidates.len(),
        base_name,
        project_dir.display(),
        chosen.display()
    ))
}
