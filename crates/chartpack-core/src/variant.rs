//! Chart variants and variant selection
//!
//! A variant is a flavor of the chart that shares all assembly logic but
//! reads manifests from its own source subdirectory and produces an archive
//! with its own classifier. The set of variants is fixed: adding one means
//! adding an enum case and a row to [`CATALOG`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// A supported chart variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Kubernetes,
    Openshift,
}

/// Static description of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    pub variant: Variant,
    /// Identifier used in configuration and overrides
    pub id: &'static str,
    /// Human readable name
    pub description: &'static str,
    /// Token appended to archive names and artifact registrations
    pub classifier: &'static str,
    /// Subdirectory of `META-INF/fabric8` holding the generated manifests
    pub source_dir: &'static str,
}

/// All known variants, in declaration order
pub const CATALOG: &[VariantInfo] = &[
    VariantInfo {
        variant: Variant::Kubernetes,
        id: "kubernetes",
        description: "Kubernetes",
        classifier: "kubernetes",
        source_dir: "kubernetes",
    },
    VariantInfo {
        variant: Variant::Openshift,
        id: "openshift",
        description: "OpenShift",
        classifier: "openshift",
        source_dir: "openshift",
    },
];

impl Variant {
    /// All variants in catalog order
    pub fn all() -> impl Iterator<Item = Variant> {
        CATALOG.iter().map(|info| info.variant)
    }

    pub fn info(self) -> &'static VariantInfo {
        // Every enum case has exactly one catalog row.
        match self {
            Variant::Kubernetes => &CATALOG[0],
            Variant::Openshift => &CATALOG[1],
        }
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn classifier(self) -> &'static str {
        self.info().classifier
    }

    pub fn source_dir(self) -> &'static str {
        self.info().source_dir
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Variant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|info| info.id == s)
            .map(|info| info.variant)
            .ok_or_else(|| CoreError::UnknownVariant {
                name: s.to_string(),
                known: CATALOG
                    .iter()
                    .map(|info| info.id)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Determine the ordered list of variants to build
///
/// A non-blank `override_value` is split on commas and every token is
/// trimmed, lower-cased and resolved against the catalog. Otherwise a
/// non-empty `configured` list is used as given. With neither, only
/// [`Variant::Kubernetes`] is built. Duplicates are kept.
pub fn select_variants(
    override_value: Option<&str>,
    configured: &[Variant],
) -> Result<Vec<Variant>> {
    if let Some(value) = override_value {
        let selected = value
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .map(|token| token.parse())
            .collect::<Result<Vec<Variant>>>()?;
        if !selected.is_empty() {
            return Ok(selected);
        }
    }

    if !configured.is_empty() {
        return Ok(configured.to_vec());
    }

    Ok(vec![Variant::Kubernetes])
}
