//! Build property overrides
//!
//! Overrides use the `fabric8.helm.*` property names. They can be given on
//! the command line as `-D key=value` or through the matching environment
//! variables; command line values win.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Chart name override
pub const CHART: &str = "fabric8.helm.chart";
/// Comma-separated list of variants to build
pub const TYPE: &str = "fabric8.helm.type";
/// Directory holding the generated manifests
pub const SOURCE_DIR: &str = "fabric8.helm.sourceDir";
/// Directory where the chart is assembled
pub const OUTPUT_DIR: &str = "fabric8.helm.outputDir";

/// Property names paired with the environment variable that can set them
pub const ENV_VARS: &[(&str, &str)] = &[
    (CHART, "FABRIC8_HELM_CHART"),
    (TYPE, "FABRIC8_HELM_TYPE"),
    (SOURCE_DIR, "FABRIC8_HELM_SOURCE_DIR"),
    (OUTPUT_DIR, "FABRIC8_HELM_OUTPUT_DIR"),
];

/// A flat set of build properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` arguments
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut props = Self::new();

        for arg in args {
            let (key, value) = arg
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| CoreError::InvalidProperty { input: arg.clone() })?;
            props.set(key.trim(), value);
        }

        Ok(props)
    }

    /// Read the known properties from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the known properties through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut props = Self::new();
        for (key, var) in ENV_VARS {
            if let Some(value) = lookup(var) {
                props.set(*key, value);
            }
        }
        props
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Layer `other` on top of `self`; keys in `other` win
    pub fn merge(&mut self, other: Properties) {
        self.entries.extend(other.entries);
    }

    pub fn chart_name(&self) -> Option<&str> {
        self.get(CHART)
    }

    pub fn variant_list(&self) -> Option<&str> {
        self.get(TYPE)
    }

    /// Source directory override; blank values count as unset
    pub fn source_dir(&self) -> Option<PathBuf> {
        self.non_blank(SOURCE_DIR).map(PathBuf::from)
    }

    /// Output directory override; blank values count as unset
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.non_blank(OUTPUT_DIR).map(PathBuf::from)
    }

    fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }
}
