//! Build command implementation
//!
//! Implements `wasmdist build`: runs the pipeline and reports the collected
//! artifacts, or the first failure.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::commands::load_plan;
use crate::cli::output::{self, create_build_bar, status, OutputConfig};
use crate::core::builder::{BuildEvent, BuildOrchestrator, BuildReport};
use crate::core::manifest::ManifestOverrides;
use crate::infra::toolchain::ProcessToolchain;

/// Execute the build command
pub async fn execute(
    manifest_path: &Path,
    overrides: ManifestOverrides,
    output: OutputConfig,
) -> Result<()> {
    let plan = load_plan(manifest_path, overrides)?;

    tracing::info!(
        "Building {} packages with `{}`",
        plan.packages.len(),
        plan.command.display()
    );

    let bar = if output.show_progress() {
        Some(create_build_bar(plan.packages.len() as u64))
    } else {
        None
    };
    let progress = bar.clone();

    // Builds block until the toolchain exits; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || {
        let orchestrator = BuildOrchestrator::for_plan(ProcessToolchain::new(), &plan);
        orchestrator.run_with(&plan.packages, &plan.command, &plan.output_dir, |event| {
            if let Some(pb) = &progress {
                match event {
                    BuildEvent::Started { package, .. } => pb.set_message(package.to_string()),
                    BuildEvent::Collected(_) => pb.inc(1),
                }
            }
        })
    })
    .await
    .context("Build task panicked")?;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if let Some(pb) = &bar {
                pb.abandon();
            }
            let context = format!(
                "Pipeline halted at package '{}' during {} step",
                e.package(),
                e.step()
            );
            return Err(anyhow::Error::new(e).context(context));
        }
    };

    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }

    print_report(&report, output)
}

fn print_report(report: &BuildReport, output: OutputConfig) -> Result<()> {
    if output.json {
        return output::print_json(report);
    }
    if !output.show_text() {
        return Ok(());
    }

    for dup in &report.duplicates {
        println!("{} Package '{dup}' was declared more than once", status::WARNING);
    }
    println!("{} Build complete!", status::SUCCESS);
    println!("  Packages built: {}", report.artifacts.len());
    for artifact in &report.artifacts {
        println!(
            "  {} -> {} ({} bytes)",
            artifact.package,
            artifact.destination.display(),
            artifact.size
        );
    }
    Ok(())
}
