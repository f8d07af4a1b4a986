//! Project descriptor loading
//!
//! The project descriptor (`chartpack.yaml`) carries the facts the chart
//! metadata is derived from, the build directories, and the optional `helm`
//! configuration block.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::variant::Variant;

/// Default descriptor file name
pub const DESCRIPTOR_FILE: &str = "chartpack.yaml";

/// Immutable facts about the project being packaged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFacts {
    pub artifact_id: String,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Project homepage
    pub url: Option<String>,
    /// Source control URL
    pub scm_url: Option<String>,
    pub contributors: Vec<Contributor>,
}

/// A project developer or contributor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contributor {
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }
}

/// Filesystem locations of the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Project root, searched for README and LICENSE files
    pub base_dir: PathBuf,
    /// Build target root; archives are written here
    pub target_dir: PathBuf,
    /// Compiled output root; generated manifests live below `META-INF/fabric8`
    pub output_dir: PathBuf,
}

impl BuildPaths {
    /// Conventional layout below `base_dir`: `target/` and `target/classes/`
    pub fn conventional(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let target_dir = base_dir.join("target");
        let output_dir = target_dir.join("classes");
        Self {
            base_dir,
            target_dir,
            output_dir,
        }
    }
}

/// The `helm` configuration block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmConfig {
    /// Chart name
    #[serde(default)]
    pub chart: Option<String>,

    /// Variants to build
    #[serde(default, rename = "type")]
    pub variants: Vec<Variant>,

    /// Chart keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Template engine constraint
    #[serde(default)]
    pub engine: Option<String>,
}

/// A loaded project descriptor
#[derive(Debug, Clone)]
pub struct Project {
    pub facts: ProjectFacts,
    pub paths: BuildPaths,
    pub helm: HelmConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Descriptor {
    artifact_id: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    scm: Option<Scm>,
    #[serde(default)]
    developers: Vec<Contributor>,
    #[serde(default)]
    build: BuildSection,
    #[serde(default)]
    helm: HelmConfig,
}

#[derive(Debug, Deserialize)]
struct Scm {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildSection {
    #[serde(default)]
    directory: Option<PathBuf>,
    #[serde(default)]
    output_directory: Option<PathBuf>,
}

impl Project {
    /// Load a descriptor file
    ///
    /// Relative build directories resolve against the directory containing
    /// the descriptor, which is also the project base directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CoreError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_yaml(&content, path, base_dir)
    }

    /// Parse descriptor content; `origin` is only used in error messages
    pub fn from_yaml(content: &str, origin: &Path, base_dir: PathBuf) -> Result<Self> {
        let descriptor: Descriptor =
            serde_yaml::from_str(content).map_err(|source| CoreError::ProjectParse {
                path: origin.to_path_buf(),
                source,
            })?;

        if descriptor.artifact_id.trim().is_empty() {
            return Err(CoreError::InvalidProject {
                path: origin.to_path_buf(),
                message: "artifactId must not be empty".to_string(),
            });
        }

        let mut paths = BuildPaths::conventional(&base_dir);
        if let Some(dir) = descriptor.build.directory {
            paths.target_dir = base_dir.join(dir);
            paths.output_dir = paths.target_dir.join("classes");
        }
        if let Some(dir) = descriptor.build.output_directory {
            paths.output_dir = base_dir.join(dir);
        }

        let facts = ProjectFacts {
            artifact_id: descriptor.artifact_id,
            version: descriptor.version,
            description: descriptor.description,
            url: descriptor.url,
            scm_url: descriptor.scm.and_then(|scm| scm.url),
            contributors: descriptor.developers,
        };

        Ok(Self {
            facts,
            paths,
            helm: descriptor.helm,
        })
    }
}
