//! End-to-end chart packaging
//!
//! Selects the variants, then for each one resolves its directories,
//! assembles the chart, archives it and registers the archive. A variant
//! without generated manifests is skipped with a warning; every other
//! failure aborts the run.

use std::path::PathBuf;

use crate::archive::{archive_file_name, create_archive};
use crate::assemble::{AssembledChart, ChartAssembler};
use crate::error::Result;
use crate::metadata::{ChartMetadata, ChartOverrides};
use crate::paths::{MissingSource, PathResolver, SourceDir};
use crate::project::Project;
use crate::properties::Properties;
use crate::publish::{Artifact, ArtifactRegistry};
use crate::variant::{Variant, select_variants};

/// What happened to one variant
#[derive(Debug, Clone)]
pub enum VariantStatus {
    Built { chart: AssembledChart, archive: PathBuf },
    Skipped { source_dir: PathBuf, reason: MissingSource },
}

#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub variant: Variant,
    pub status: VariantStatus,
}

/// Result of a packaging run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub metadata: ChartMetadata,
    pub outcomes: Vec<VariantOutcome>,
}

impl RunReport {
    pub fn built(&self) -> impl Iterator<Item = &VariantOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, VariantStatus::Built { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &VariantOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, VariantStatus::Skipped { .. }))
    }
}

/// Packages a project's generated manifests as Helm charts
pub struct HelmPipeline<'a> {
    project: &'a Project,
    props: &'a Properties,
    registry: &'a dyn ArtifactRegistry,
}

impl<'a> HelmPipeline<'a> {
    pub fn new(
        project: &'a Project,
        props: &'a Properties,
        registry: &'a dyn ArtifactRegistry,
    ) -> Self {
        Self {
            project,
            props,
            registry,
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        let variants = select_variants(self.props.variant_list(), &self.project.helm.variants)?;
        let overrides = ChartOverrides::resolve(self.props, &self.project.helm);
        let metadata = ChartMetadata::build(&self.project.facts, &overrides);

        let source_override = self.props.source_dir();
        let output_override = self.props.output_dir();
        let resolver = PathResolver::new(&self.project.paths)
            .with_source_override(source_override.as_deref())
            .with_output_override(output_override.as_deref());

        let mut outcomes = Vec::with_capacity(variants.len());
        for variant in variants {
            let status = self.package_variant(variant, &metadata, &resolver)?;
            outcomes.push(VariantOutcome { variant, status });
        }

        Ok(RunReport { metadata, outcomes })
    }

    fn package_variant(
        &self,
        variant: Variant,
        metadata: &ChartMetadata,
        resolver: &PathResolver<'_>,
    ) -> Result<VariantStatus> {
        let output_dir = resolver.prepare_output_dir(variant)?;
        let source_dir = match resolver.check_source_dir(variant) {
            SourceDir::Found(dir) => dir,
            SourceDir::Missing { path, reason } => {
                tracing::warn!(
                    "Chart source directory {} {} so cannot make chart {}. \
                     Probably you need to generate the resource manifests before.",
                    path.display(),
                    reason,
                    metadata.name
                );
                return Ok(VariantStatus::Skipped {
                    source_dir: path,
                    reason,
                });
            }
        };

        tracing::info!("Creating Helm chart \"{}\" for {}", metadata.name, variant.description());
        tracing::debug!("SourceDir: {}", source_dir.display());
        tracing::debug!("OutputDir: {}", output_dir.display());

        let chart = ChartAssembler::new(metadata, &self.project.paths.base_dir)
            .assemble(&source_dir, &output_dir)?;

        let archive_name = archive_file_name(
            &metadata.name,
            self.project.facts.version.as_deref(),
            variant.classifier(),
        );
        let archive_path = self.project.paths.target_dir.join(archive_name);
        let archive = create_archive(&output_dir, &archive_path)?;
        self.registry.attach(Artifact::chart_archive(&archive, variant))?;

        Ok(VariantStatus::Built { chart, archive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extract_archive;
    use crate::error::CoreError;
    use crate::project::{BuildPaths, HelmConfig, ProjectFacts};
    use crate::publish::ArtifactLedger;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn project(base: &Path, variants: Vec<Variant>) -> Project {
        Project {
            facts: ProjectFacts {
                artifact_id: "demo".to_string(),
                version: Some("1.2.3".to_string()),
                ..Default::default()
            },
            paths: BuildPaths::conventional(base),
            helm: HelmConfig {
                variants,
                ..Default::default()
            },
        }
    }

    fn write_manifests(project: &Project, variant: Variant) {
        let dir = PathResolver::new(&project.paths).source_dir(variant);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("deployment.yaml"), format!("# {variant}\nkind: Deployment\n")).unwrap();
    }

    fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(dir).unwrap().to_path_buf(),
                    fs::read(e.path()).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_builds_default_variant() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        write_manifests(&project, Variant::Kubernetes);
        fs::write(temp.path().join("README.md"), "# Demo\n").unwrap();

        let ledger = ArtifactLedger::new();
        let props = Properties::new();
        let report = HelmPipeline::new(&project, &props, &ledger).run().unwrap();

        assert_eq!(report.metadata.name, "demo");
        assert_eq!(report.outcomes.len(), 1);
        let VariantStatus::Built { chart, archive } = &report.outcomes[0].status else {
            panic!("expected a built chart");
        };
        assert_eq!(chart.dir, temp.path().join("target/fabric8/helm/kubernetes"));
        assert_eq!(*archive, temp.path().join("target/demo-1.2.3-kubernetes.tar.gz"));
        assert!(chart.dir.join("Chart.yaml").is_file());
        assert!(chart.dir.join("templates/deployment.yaml").is_file());
        assert!(chart.dir.join("README.md").is_file());

        let artifacts = ledger.artifacts();
        assert_eq!(artifacts, vec![Artifact::chart_archive(archive, Variant::Kubernetes)]);
    }

    #[test]
    fn test_missing_source_skips_only_that_variant() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![Variant::Kubernetes, Variant::Openshift]);
        write_manifests(&project, Variant::Openshift);

        let ledger = ArtifactLedger::new();
        let props = Properties::new();
        let report = HelmPipeline::new(&project, &props, &ledger).run().unwrap();

        assert_eq!(report.built().count(), 1);
        assert_eq!(report.skipped().count(), 1);
        assert_eq!(report.outcomes[0].variant, Variant::Kubernetes);
        assert!(matches!(
            report.outcomes[0].status,
            VariantStatus::Skipped {
                reason: MissingSource::NotADirectory,
                ..
            }
        ));

        assert!(temp.path().join("target/demo-1.2.3-openshift.tar.gz").is_file());
        assert!(!temp.path().join("target/demo-1.2.3-kubernetes.tar.gz").exists());
        assert_eq!(ledger.artifacts().len(), 1);
        assert_eq!(ledger.artifacts()[0].classifier, "openshift");
    }

    #[test]
    fn test_unknown_variant_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        write_manifests(&project, Variant::Kubernetes);

        let ledger = ArtifactLedger::new();
        let mut props = Properties::new();
        props.set(crate::properties::TYPE, "kubernetes,bogus");
        let err = HelmPipeline::new(&project, &props, &ledger).run().unwrap_err();

        assert!(matches!(err, CoreError::UnknownVariant { ref name, .. } if name == "bogus"));
        assert!(!temp.path().join("target/fabric8").exists());
        assert!(ledger.artifacts().is_empty());
    }

    #[test]
    fn test_blank_directory_overrides_use_defaults() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        write_manifests(&project, Variant::Kubernetes);

        let mut props = Properties::new();
        props.set(crate::properties::SOURCE_DIR, "");
        props.set(crate::properties::OUTPUT_DIR, "");

        let ledger = ArtifactLedger::new();
        let report = HelmPipeline::new(&project, &props, &ledger).run().unwrap();

        let VariantStatus::Built { chart, archive } = &report.outcomes[0].status else {
            panic!("expected a built chart");
        };
        assert_eq!(chart.dir, temp.path().join("target/fabric8/helm/kubernetes"));
        assert!(chart.dir.join("Chart.yaml").is_file());
        assert!(chart.dir.join("templates/deployment.yaml").is_file());
        assert!(archive.is_file());
    }

    #[test]
    fn test_property_overrides() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        let source = temp.path().join("manifests");
        let output = temp.path().join("chart-out");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("svc.yml"), "kind: Service\n").unwrap();

        let mut props = Properties::new();
        props.set(crate::properties::CHART, "renamed");
        props.set(crate::properties::TYPE, "OpenShift");
        props.set(crate::properties::SOURCE_DIR, source.to_string_lossy());
        props.set(crate::properties::OUTPUT_DIR, output.to_string_lossy());

        let ledger = ArtifactLedger::new();
        let report = HelmPipeline::new(&project, &props, &ledger).run().unwrap();

        assert_eq!(report.metadata.name, "renamed");
        assert_eq!(report.outcomes[0].variant, Variant::Openshift);
        assert!(output.join("templates/svc.yml").is_file());
        assert!(temp.path().join("target/renamed-1.2.3-openshift.tar.gz").is_file());
    }

    #[test]
    fn test_archive_matches_chart_directory() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        write_manifests(&project, Variant::Kubernetes);
        fs::write(temp.path().join("LICENSE"), "Apache-2.0\n").unwrap();

        let ledger = ArtifactLedger::new();
        let props = Properties::new();
        let report = HelmPipeline::new(&project, &props, &ledger).run().unwrap();
        let VariantStatus::Built { chart, archive } = &report.outcomes[0].status else {
            panic!("expected a built chart");
        };

        let extracted = temp.path().join("extracted");
        extract_archive(archive, &extracted).unwrap();
        assert_eq!(snapshot(&extracted), snapshot(&chart.dir));
    }

    #[test]
    fn test_rerun_replaces_output() {
        let temp = TempDir::new().unwrap();
        let project = project(temp.path(), vec![]);
        write_manifests(&project, Variant::Kubernetes);
        let props = Properties::new();

        HelmPipeline::new(&project, &props, &ArtifactLedger::new()).run().unwrap();
        let chart_dir = temp.path().join("target/fabric8/helm/kubernetes");
        let first = snapshot(&chart_dir);
        fs::write(chart_dir.join("templates/leftover.yaml"), "stale").unwrap();

        HelmPipeline::new(&project, &props, &ArtifactLedger::new()).run().unwrap();
        assert_eq!(snapshot(&chart_dir), first);
        assert!(!chart_dir.join("templates/leftover.yaml").exists());
    }
}
