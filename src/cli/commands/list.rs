//! List command implementation
//!
//! Implements `wasmdist list`: the packages in build order, where each one
//! is built and where its artifact will be collected from.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::commands::load_plan;
use crate::cli::output::{self, OutputConfig};
use crate::core::manifest::ManifestOverrides;
use crate::core::package::PackageName;

#[derive(Debug, Serialize)]
struct ListedPackage {
    index: usize,
    package: PackageName,
    source_dir: PathBuf,
    artifact: PathBuf,
    destination: PathBuf,
}

/// Execute the list command
pub async fn execute(manifest_path: &Path, output: OutputConfig) -> Result<()> {
    let plan = load_plan(manifest_path, ManifestOverrides::default())?;
    let mut navigator = plan.navigator();

    let listed: Vec<ListedPackage> = plan
        .packages
        .iter()
        .enumerate()
        .map(|(index, pkg)| {
            let source_dir = navigator.advance(pkg);
            ListedPackage {
                index,
                package: pkg.clone(),
                artifact: plan.command.artifact_path(&source_dir, pkg),
                destination: plan
                    .output_dir
                    .join(pkg.artifact_file_name(&plan.command.extension)),
                source_dir,
            }
        })
        .collect();

    if output.json {
        return output::print_json(&listed);
    }
    if output.quiet {
        return Ok(());
    }

    for item in &listed {
        println!("{}. {}", item.index + 1, item.package);
        println!("   source:   {}", item.source_dir.display());
        println!("   artifact: {}", item.artifact.display());
        println!("   output:   {}", item.destination.display());
    }
    Ok(())
}
