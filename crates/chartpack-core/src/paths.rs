//! Source and output directory resolution per variant

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::project::BuildPaths;
use crate::variant::Variant;

/// Why a variant has no usable source directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSource {
    /// The directory does not exist or is not a directory
    NotADirectory,
    /// The directory holds no `.yaml`/`.yml` file
    NoManifests,
}

impl fmt::Display for MissingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSource::NotADirectory => f.write_str("does not exist"),
            MissingSource::NoManifests => f.write_str("does not contain any YAML manifest"),
        }
    }
}

/// Outcome of source directory resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDir {
    Found(PathBuf),
    Missing { path: PathBuf, reason: MissingSource },
}

/// Computes where manifests are read from and where charts are assembled
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    paths: &'a BuildPaths,
    source_override: Option<&'a Path>,
    output_override: Option<&'a Path>,
}

impl<'a> PathResolver<'a> {
    pub fn new(paths: &'a BuildPaths) -> Self {
        Self {
            paths,
            source_override: None,
            output_override: None,
        }
    }

    /// Use `dir` as the source directory for every variant
    pub fn with_source_override(mut self, dir: Option<&'a Path>) -> Self {
        self.source_override = dir;
        self
    }

    /// Use `dir` as the output directory for every variant
    pub fn with_output_override(mut self, dir: Option<&'a Path>) -> Self {
        self.output_override = dir;
        self
    }

    /// `<target>/fabric8/helm/<classifier>` unless overridden
    pub fn output_dir(&self, variant: Variant) -> PathBuf {
        match self.output_override {
            Some(dir) => dir.to_path_buf(),
            None => self
                .paths
                .target_dir
                .join("fabric8")
                .join("helm")
                .join(variant.classifier()),
        }
    }

    /// Resolve the output directory and remove whatever a previous run left there
    pub fn prepare_output_dir(&self, variant: Variant) -> Result<PathBuf> {
        let dir = self.output_dir(variant);
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir).map_err(|source| CoreError::CleanOutput {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dir)
    }

    /// `<output>/META-INF/fabric8/<source-subdirectory>` unless overridden
    pub fn source_dir(&self, variant: Variant) -> PathBuf {
        match self.source_override {
            Some(dir) => dir.to_path_buf(),
            None => self
                .paths
                .output_dir
                .join("META-INF")
                .join("fabric8")
                .join(variant.source_dir()),
        }
    }

    /// Resolve and validate the source directory for `variant`
    pub fn check_source_dir(&self, variant: Variant) -> SourceDir {
        let path = self.source_dir(variant);

        if !path.is_dir() {
            return SourceDir::Missing {
                path,
                reason: MissingSource::NotADirectory,
            };
        }
        if !contains_yaml_files(&path) {
            return SourceDir::Missing {
                path,
                reason: MissingSource::NoManifests,
            };
        }
        SourceDir::Found(path)
    }
}

/// Whether `dir` directly contains a file named `*.yaml` or `*.yml`
pub fn contains_yaml_files(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries.filter_map(|e| e.ok()).any(|entry| {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        entry.path().is_file() && (name.ends_with(".yaml") || name.ends_with(".yml"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_directories() {
        let paths = BuildPaths::conventional("/proj");
        let resolver = PathResolver::new(&paths);

        assert_eq!(
            resolver.output_dir(Variant::Openshift),
            PathBuf::from("/proj/target/fabric8/helm/openshift")
        );
        assert_eq!(
            resolver.source_dir(Variant::Kubernetes),
            PathBuf::from("/proj/target/classes/META-INF/fabric8/kubernetes")
        );
    }

    #[test]
    fn test_overrides_apply_to_every_variant() {
        let paths = BuildPaths::conventional("/proj");
        let source = PathBuf::from("/manifests");
        let output = PathBuf::from("/chart");
        let resolver = PathResolver::new(&paths)
            .with_source_override(Some(&source))
            .with_output_override(Some(&output));

        for variant in Variant::all() {
            assert_eq!(resolver.source_dir(variant), source);
            assert_eq!(resolver.output_dir(variant), output);
        }
    }

    #[test]
    fn test_missing_source_dir() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::conventional(temp.path());
        let resolver = PathResolver::new(&paths);

        match resolver.check_source_dir(Variant::Kubernetes) {
            SourceDir::Missing { reason, .. } => assert_eq!(reason, MissingSource::NotADirectory),
            other => panic!("expected missing source, got {other:?}"),
        }
    }

    #[test]
    fn test_source_dir_without_manifests() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::conventional(temp.path());
        let resolver = PathResolver::new(&paths);
        let dir = resolver.source_dir(Variant::Kubernetes);
        std::fs::create_dir_all(dir.join("nested.yaml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "hello").unwrap();

        assert_eq!(
            resolver.check_source_dir(Variant::Kubernetes),
            SourceDir::Missing {
                path: dir,
                reason: MissingSource::NoManifests,
            }
        );
    }

    #[test]
    fn test_source_dir_with_manifests() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::conventional(temp.path());
        let resolver = PathResolver::new(&paths);
        let dir = resolver.source_dir(Variant::Openshift);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Deployment.YML"), "kind: Deployment\n").unwrap();

        assert_eq!(resolver.check_source_dir(Variant::Openshift), SourceDir::Found(dir));
    }

    #[test]
    fn test_prepare_output_dir_removes_previous_run() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::conventional(temp.path());
        let resolver = PathResolver::new(&paths);
        let dir = resolver.output_dir(Variant::Kubernetes);
        std::fs::create_dir_all(dir.join("templates")).unwrap();
        std::fs::write(dir.join("templates/stale.yaml"), "stale").unwrap();

        let prepared = resolver.prepare_output_dir(Variant::Kubernetes).unwrap();
        assert_eq!(prepared, dir);
        assert!(!dir.exists());
    }
}
