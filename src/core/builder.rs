//! Build orchestration logic
//!
//! Builds packages strictly in declared order. For each package: find its
//! source directory, run the toolchain there and wait for it, then copy the
//! artifact into the output directory. The first failure stops the
//! pipeline. Artifacts already copied stay where they are.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::command::BuildCommand;
use crate::core::manifest::PipelinePlan;
use crate::core::navigation::SourceNavigator;
use crate::core::package::{self, PackageName};
use crate::error::{PipelineError, ToolchainError};
use crate::infra::filesystem;
use crate::infra::toolchain::Toolchain;

/// One artifact copied into the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedArtifact {
    /// Package that produced it
    pub package: PackageName,
    /// Package source directory the toolchain ran in
    pub source_dir: PathBuf,
    /// Where the toolchain left it
    pub source: PathBuf,
    /// Where it was copied to
    pub destination: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA-256 of the copied file
    pub sha256: String,
}

/// Summary of a successful pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Artifacts in build order
    pub artifacts: Vec<CollectedArtifact>,
    /// Packages that were declared (and built) more than once
    pub duplicates: Vec<PackageName>,
}

/// Progress notifications emitted while the pipeline runs
#[derive(Debug)]
pub enum BuildEvent<'a> {
    /// A package is about to be built
    Started {
        index: usize,
        total: usize,
        package: &'a PackageName,
        dir: &'a Path,
    },
    /// A package's artifact has been collected
    Collected(&'a CollectedArtifact),
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<T> {
    toolchain: T,
    navigator: SourceNavigator,
}

impl<T: Toolchain> BuildOrchestrator<T> {
    /// Create an orchestrator that starts navigating from `navigator`'s root
    pub fn new(toolchain: T, navigator: SourceNavigator) -> Self {
        Self {
            toolchain,
            navigator,
        }
    }

    /// Create an orchestrator for a resolved plan
    pub fn for_plan(toolchain: T, plan: &PipelinePlan) -> Self {
        Self::new(toolchain, plan.navigator())
    }

    /// The toolchain in use
    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Run the pipeline
    pub fn run(
        &self,
        packages: &[PackageName],
        command: &BuildCommand,
        output_dir: &Path,
    ) -> Result<BuildReport, PipelineError> {
        self.run_with(packages, command, output_dir, |_| {})
    }

    /// Run the pipeline, reporting progress to `on_event`
    pub fn run_with<F>(
        &self,
        packages: &[PackageName],
        command: &BuildCommand,
        output_dir: &Path,
        mut on_event: F,
    ) -> Result<BuildReport, PipelineError>
    where
        F: FnMut(BuildEvent<'_>),
    {
        let mut report = BuildReport {
            artifacts: Vec::with_capacity(packages.len()),
            duplicates: package::duplicates(packages),
        };
        for dup in &report.duplicates {
            tracing::warn!("Package '{dup}' is declared more than once and will be rebuilt");
        }

        // Each run starts navigating from the source root again
        let mut navigator = self.navigator.clone();
        let total = packages.len();

        for (index, pkg) in packages.iter().enumerate() {
            let dir = navigator.enter(pkg)?;
            on_event(BuildEvent::Started {
                index,
                total,
                package: pkg,
                dir: &dir,
            });
            tracing::info!("[{}/{total}] Building {pkg} in {}", index + 1, dir.display());

            self.build(pkg, &dir, command)?;
            let artifact = collect(pkg, &dir, command, output_dir)?;

            tracing::info!(
                "Collected {} ({} bytes)",
                artifact.destination.display(),
                artifact.size
            );
            on_event(BuildEvent::Collected(&artifact));
            report.artifacts.push(artifact);
        }

        Ok(report)
    }

    fn build(
        &self,
        pkg: &PackageName,
        dir: &Path,
        command: &BuildCommand,
    ) -> Result<(), PipelineError> {
        let outcome = self.toolchain.build(dir, command).map_err(|e| match e {
            ToolchainError::Spawn { error, .. } => PipelineError::BuildFailed {
                package: pkg.to_string(),
                status: format!("could not start '{}'", command.program),
                diagnostics: error,
            },
            other @ ToolchainError::NotFound { .. } => PipelineError::BuildFailed {
                package: pkg.to_string(),
                status: "toolchain unavailable".to_string(),
                diagnostics: other.to_string(),
            },
        })?;

        if outcome.success {
            Ok(())
        } else {
            Err(PipelineError::BuildFailed {
                package: pkg.to_string(),
                status: outcome.status_line(),
                diagnostics: outcome.diagnostics(),
            })
        }
    }
}

/// Copy a package's artifact into `output_dir`, keeping its file name
fn collect(
    pkg: &PackageName,
    dir: &Path,
    command: &BuildCommand,
    output_dir: &Path,
) -> Result<CollectedArtifact, PipelineError> {
    let source = command.artifact_path(dir, pkg);
    if !source.is_file() {
        return Err(PipelineError::ArtifactMissing {
            package: pkg.to_string(),
            path: source,
        });
    }

    let destination = output_dir.join(pkg.artifact_file_name(&command.extension));
    let copy_error = |error: String| PipelineError::Copy {
        package: pkg.to_string(),
        from: source.clone(),
        to: destination.clone(),
        error,
    };

    // Hashed before copying, so a read failure is never reported after the
    // copy already succeeded
    let sha256 = filesystem::sha256_file(&source).map_err(|e| copy_error(e.to_string()))?;
    let size = filesystem::copy_file(&source, &destination)
        .map_err(|e| copy_error(e.to_string()))?;

    Ok(CollectedArtifact {
        package: pkg.clone(),
        source_dir: dir.to_path_buf(),
        source,
        destination,
        size,
        sha256,
    })
}
