//! `Chart.yaml` metadata model
//!
//! [`ChartMetadata::build`] derives the chart description from the project
//! facts plus explicit overrides. Serialization omits every field that is
//! absent or empty, so the model itself stays a plain record.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChartWriteError, CoreError, Result};
use crate::project::{HelmConfig, ProjectFacts};
use crate::properties::Properties;

/// File name of the chart metadata inside a chart directory
pub const CHART_FILE: &str = "Chart.yaml";

/// Values that count as "nothing" when serializing
pub trait EmptyValue {
    fn is_empty_value(&self) -> bool;
}

impl EmptyValue for String {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> EmptyValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: EmptyValue> EmptyValue for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.as_ref().is_none_or(|value| value.is_empty_value())
    }
}

fn omit<T: EmptyValue>(value: &T) -> bool {
    value.is_empty_value()
}

/// Helm chart metadata as written to `Chart.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "omit")]
    pub home: Option<String>,

    #[serde(skip_serializing_if = "omit")]
    pub sources: Vec<String>,

    #[serde(skip_serializing_if = "omit")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "omit")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "omit")]
    pub keywords: Vec<String>,

    #[serde(skip_serializing_if = "omit")]
    pub maintainers: Vec<Maintainer>,

    #[serde(skip_serializing_if = "omit")]
    pub engine: Option<String>,
}

/// Chart maintainer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Maintainer {
    #[serde(skip_serializing_if = "omit")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "omit")]
    pub email: Option<String>,
}

/// Explicit chart settings that take precedence over project facts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOverrides {
    pub name: Option<String>,
    pub keywords: Vec<String>,
    pub engine: Option<String>,
}

impl ChartOverrides {
    /// Combine property overrides with the `helm` configuration block
    ///
    /// The `fabric8.helm.chart` property wins over `helm.chart`. Keywords and
    /// engine only come from the configuration block.
    pub fn resolve(props: &Properties, helm: &HelmConfig) -> Self {
        let name = props
            .chart_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .or_else(|| helm.chart.clone().filter(|name| !name.trim().is_empty()));

        Self {
            name,
            keywords: helm.keywords.clone(),
            engine: helm.engine.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

impl ChartMetadata {
    /// Derive chart metadata from project facts and overrides
    pub fn build(facts: &ProjectFacts, overrides: &ChartOverrides) -> Self {
        let name = overrides
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| facts.artifact_id.clone());

        let maintainers = facts
            .contributors
            .iter()
            .filter_map(|contributor| {
                let name = non_blank(&contributor.name);
                let email = non_blank(&contributor.email);
                (name.is_some() || email.is_some()).then_some(Maintainer { name, email })
            })
            .collect();

        Self {
            name,
            home: facts.url.clone(),
            sources: non_blank(&facts.scm_url).into_iter().collect(),
            version: facts.version.clone(),
            description: facts.description.clone(),
            keywords: overrides.keywords.clone(),
            maintainers,
            engine: overrides.engine.clone(),
        }
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Write `Chart.yaml` into `chart_dir`
    pub fn write_to(&self, chart_dir: &Path) -> Result<()> {
        let path = chart_dir.join(CHART_FILE);
        let write = || -> std::result::Result<(), ChartWriteError> {
            let content = self.to_yaml()?;
            std::fs::write(&path, content)?;
            Ok(())
        };
        write().map_err(|source| CoreError::WriteChart {
            path: path.clone(),
            source,
        })
    }
}
