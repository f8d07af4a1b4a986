//! Build artifact registration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::archive::ARCHIVE_TYPE;
use crate::error::{CoreError, Result};
use crate::variant::Variant;

/// File name the ledger is written to inside the build target root
pub const LEDGER_FILE: &str = "artifacts.json";

/// A file registered as a build output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub path: PathBuf,
    /// Artifact type, e.g. `tar.gz`
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub classifier: String,
}

impl Artifact {
    /// A chart archive for `variant`
    pub fn chart_archive(path: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            path: path.into(),
            artifact_type: ARCHIVE_TYPE.to_string(),
            classifier: variant.classifier().to_string(),
        }
    }
}

/// Receiver of produced build outputs
pub trait ArtifactRegistry: Send + Sync {
    fn attach(&self, artifact: Artifact) -> Result<()>;
}

/// Registry that records artifacts in memory
#[derive(Debug, Default)]
pub struct ArtifactLedger {
    artifacts: Mutex<Vec<Artifact>>,
}

impl ArtifactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Artifact>> {
        // Pushes are the only mutation, so a poisoned Vec is still consistent.
        self.artifacts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the attached artifacts, in attachment order
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.lock().clone()
    }

    /// Write the attached artifacts as JSON to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&*self.lock()).map_err(|e| CoreError::Publish {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ArtifactRegistry for ArtifactLedger {
    fn attach(&self, artifact: Artifact) -> Result<()> {
        if !artifact.path.is_file() {
            return Err(CoreError::Publish {
                path: artifact.path,
                message: "file does not exist".to_string(),
            });
        }

        tracing::debug!(
            "Attaching {} artifact {} ({})",
            artifact.artifact_type,
            artifact.path.display(),
            artifact.classifier
        );
        self.lock().push(artifact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chart_archive_artifact() {
        let artifact = Artifact::chart_archive("/t/demo-1.0-openshift.tar.gz", Variant::Openshift);
        assert_eq!(artifact.artifact_type, "tar.gz");
        assert_eq!(artifact.classifier, "openshift");
    }

    #[test]
    fn test_attach_records_in_order() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a.tar.gz");
        let second = temp.path().join("b.tar.gz");
        std::fs::write(&first, "a").unwrap();
        std::fs::write(&second, "b").unwrap();

        let ledger = ArtifactLedger::new();
        ledger.attach(Artifact::chart_archive(&first, Variant::Kubernetes)).unwrap();
        ledger.attach(Artifact::chart_archive(&second, Variant::Openshift)).unwrap();

        let artifacts = ledger.artifacts();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].path, first);
        assert_eq!(artifacts[1].classifier, "openshift");
    }

    #[test]
    fn test_attach_missing_file() {
        let temp = TempDir::new().unwrap();
        let ledger = ArtifactLedger::new();
        let missing = temp.path().join("missing.tar.gz");
        let err = ledger
            .attach(Artifact::chart_archive(missing, Variant::Kubernetes))
            .unwrap_err();

        assert!(matches!(err, CoreError::Publish { .. }));
        assert!(ledger.artifacts().is_empty());
    }

    #[test]
    fn test_write_ledger_json() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("demo-1.0-kubernetes.tar.gz");
        std::fs::write(&archive, "x").unwrap();

        let ledger = ArtifactLedger::new();
        ledger.attach(Artifact::chart_archive(&archive, Variant::Kubernetes)).unwrap();

        let path = temp.path().join(LEDGER_FILE);
        ledger.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json[0]["type"], "tar.gz");
        assert_eq!(json[0]["classifier"], "kubernetes");

        let back: Vec<Artifact> = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger.artifacts());
    }
}
