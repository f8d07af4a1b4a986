//! chartpack core - Helm chart packaging for generated manifests
//!
//! This crate turns a directory of previously generated Kubernetes or
//! OpenShift manifests into a Helm chart:
//! - `Variant`: the chart flavors that can be built
//! - `Project`: project facts, build directories and `helm` configuration
//! - `ChartMetadata`: the `Chart.yaml` model
//! - `ChartAssembler`: the on-disk chart layout
//! - `create_archive`: `.tar.gz` packaging
//! - `ArtifactRegistry`: registration of produced archives
//! - `HelmPipeline`: all of the above, per variant

pub mod archive;
pub mod assemble;
pub mod error;
pub mod metadata;
pub mod paths;
pub mod pipeline;
pub mod project;
pub mod properties;
pub mod publish;
pub mod variant;

pub use archive::{ArchiveEntry, archive_file_name, create_archive, extract_archive, list_archive};
pub use assemble::{AssembledChart, ChartAssembler};
pub use error::{ChartWriteError, CoreError, Result};
pub use metadata::{ChartMetadata, ChartOverrides, Maintainer};
pub use paths::{MissingSource, PathResolver, SourceDir};
pub use pipeline::{HelmPipeline, RunReport, VariantOutcome, VariantStatus};
pub use project::{BuildPaths, Contributor, HelmConfig, Project, ProjectFacts};
pub use properties::Properties;
pub use publish::{Artifact, ArtifactLedger, ArtifactRegistry};
pub use variant::{CATALOG, Variant, VariantInfo, select_variants};
