//! Helm command - package generated manifests as Helm charts

use chartpack_core::publish::LEDGER_FILE;
use chartpack_core::{ArtifactLedger, HelmPipeline, Project, Properties, VariantStatus};
use console::style;
use std::path::Path;

use crate::error::{CliError, Result};
use crate::util::{display_path, format_size};

pub fn run(project_path: &Path, defines: &[String], write_ledger: bool) -> Result<()> {
    let mut props = Properties::from_env();
    props.merge(Properties::parse(defines)?);

    let project = Project::load(project_path)?;
    tracing::debug!(
        "Loaded project {} (target: {})",
        project.facts.artifact_id,
        project.paths.target_dir.display()
    );
    let ledger = ArtifactLedger::new();
    let report = HelmPipeline::new(&project, &props, &ledger).run()?;
    let base = &project.paths.base_dir;

    println!(
        "{} {} {}",
        style("Packaging").cyan().bold(),
        report.metadata.name,
        report.metadata.version.as_deref().unwrap_or("")
    );

    for outcome in &report.outcomes {
        match &outcome.status {
            VariantStatus::Built { chart, archive } => {
                let size = std::fs::metadata(archive)
                    .map_err(|e| CliError::Io {
                        message: format!("{}: {}", archive.display(), e),
                    })?
                    .len();
                println!(
                    "  {} {} ({}, {} templates, {})",
                    style("Created").green().bold(),
                    display_path(archive, base),
                    outcome.variant.description(),
                    chart.templates.len(),
                    format_size(size)
                );
                for file in &chart.support_files {
                    println!("    {} {}", style("+").dim(), file.display());
                }
            }
            VariantStatus::Skipped { source_dir, reason } => {
                println!(
                    "  {} {}: {} {}",
                    style("Skipped").yellow().bold(),
                    outcome.variant,
                    display_path(source_dir, base),
                    reason
                );
            }
        }
    }

    // Written even when empty; an earlier run's ledger must not survive
    if write_ledger {
        let ledger_path = project.paths.target_dir.join(LEDGER_FILE);
        ledger.write_to(&ledger_path)?;
        println!("  {} {}", style("Artifacts").dim(), display_path(&ledger_path, base));
    }

    if report.built().next().is_none() {
        println!(
            "{} no chart was built; generate the resource manifests first",
            style("warning:").yellow().bold()
        );
    }

    Ok(())
}
