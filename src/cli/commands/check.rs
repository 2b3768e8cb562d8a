//! Check command implementation
//!
//! Implements `wasmdist check` to validate configuration without building.

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::commands::load_plan;
use crate::cli::output::{self, status, OutputConfig};
use crate::core::check;
use crate::core::manifest::ManifestOverrides;

/// Execute the check command
pub async fn execute(manifest_path: &Path, output: OutputConfig) -> Result<()> {
    let plan = load_plan(manifest_path, ManifestOverrides::default())?;
    let result = check::check(&plan);

    if output.json {
        output::print_json(&result)?;
    } else if output.show_text() {
        println!("Checking project configuration...\n");
        println!("{} Manifest is valid", status::SUCCESS);

        match &result.toolchain {
            Some(path) => println!(
                "{} Toolchain '{}' found at {}",
                status::SUCCESS,
                plan.command.program,
                path.display()
            ),
            None => println!(
                "{} Toolchain '{}' not found in PATH",
                status::WARNING,
                plan.command.program
            ),
        }

        if result.output_dir_exists {
            println!(
                "{} Output directory {}",
                status::SUCCESS,
                plan.output_dir.display()
            );
        }

        println!("\nPackages in build order:");
        for pkg in &result.packages {
            let mark = if pkg.found { status::SUCCESS } else { status::ERROR };
            println!("  {mark} {} ({})", pkg.package, pkg.source_dir.display());
        }

        if !result.warnings.is_empty() {
            println!("\nWarnings:");
            for warning in &result.warnings {
                println!("  {} {warning}", status::WARNING);
            }
        }
    }

    if !result.is_valid() {
        bail!("Check failed:\n  - {}", result.errors.join("\n  - "));
    }

    if output.show_text() {
        println!("\n{} Ready to build {} packages", status::SUCCESS, result.packages.len());
    }
    Ok(())
}
