//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod init;
pub mod list;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::cli::output::OutputConfig;
use crate::core::manifest::{Manifest, ManifestOverrides, PipelinePlan};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every package and collect the artifacts
    Build {
        /// Build only these packages, in this order (repeatable)
        #[arg(short, long = "package", value_name = "NAME")]
        packages: Vec<String>,

        /// Override the output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the target triple
        #[arg(long)]
        target: Option<String>,

        /// Override the build profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Validate configuration without building
    Check,

    /// Show packages in build order with their directories
    List,

    /// Create a manifest (wasmdist.toml, or the --manifest path)
    Init {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,

        /// Fill the package list from the source root
        #[arg(long)]
        discover: bool,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, manifest_path: &Path, output: OutputConfig) -> Result<()> {
        match self {
            Self::Build {
                packages,
                output_dir,
                target,
                profile,
            } => {
                let overrides = ManifestOverrides {
                    packages: packages.into_iter().map(Into::into).collect(),
                    output_dir,
                    target,
                    profile,
                };
                build::execute(manifest_path, overrides, output).await
            }
            Self::Check => check::execute(manifest_path, output).await,
            Self::List => list::execute(manifest_path, output).await,
            Self::Init {
                name,
                discover,
                force,
            } => {
                let manifest_path = std::env::current_dir()?.join(manifest_path);
                let options = crate::core::init::InitOptions {
                    name,
                    discover,
                    force,
                };
                init::execute(&manifest_path, &options, output).await
            }
        }
    }
}

/// Load the manifest, apply overrides and resolve paths.
///
/// Relative paths in the manifest are resolved against the manifest's
/// directory; command-line paths against the current directory.
pub fn load_plan(manifest_path: &Path, mut overrides: ManifestOverrides) -> Result<PipelinePlan> {
    let current_dir = std::env::current_dir()?;
    let manifest_path = current_dir.join(manifest_path);

    let mut manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
    tracing::info!("Loaded project: {}", manifest.project.name);

    if let Some(dir) = overrides.output_dir.take() {
        overrides.output_dir = Some(current_dir.join(dir));
    }
    manifest.apply(overrides);

    let base_dir = manifest_path.parent().unwrap_or(&current_dir);
    let plan = manifest
        .plan(base_dir)
        .with_context(|| format!("Invalid manifest {}", manifest_path.display()))?;
    Ok(plan)
}
