//! Check command logic
//!
//! Validates a resolved plan without building anything: every package
//! directory must be reachable, the output directory must exist, and the
//! toolchain should be on PATH.

use std::path::{Path, PathBuf};

use crate::core::manifest::PipelinePlan;
use crate::core::navigation::normalize;
use crate::core::package::PackageName;
use crate::infra::{filesystem, toolchain};

/// Where a package would be built
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PackageCheck {
    /// Package name
    pub package: PackageName,
    /// Resolved source directory
    pub source_dir: PathBuf,
    /// Whether the source directory exists
    pub found: bool,
    /// Where the toolchain is expected to leave the artifact
    pub artifact: PathBuf,
}

/// Result of the check operation
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CheckResult {
    /// Per-package resolution, in build order
    pub packages: Vec<PackageCheck>,
    /// Whether the output directory exists
    pub output_dir_exists: bool,
    /// Toolchain location, if found
    pub toolchain: Option<PathBuf>,
    /// Problems that would make the build fail
    pub errors: Vec<String>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if the build could start
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve every package without building.
///
/// Navigation continues past a missing directory so that every problem is
/// reported, not just the first.
pub fn check(plan: &PipelinePlan) -> CheckResult {
    let mut result = CheckResult::default();
    let mut navigator = plan.navigator();

    for pkg in &plan.packages {
        let dir = navigator.advance(pkg);
        let found = dir.is_dir();
        if !found {
            result.errors.push(format!(
                "Source directory for '{pkg}' not found: {}",
                dir.display()
            ));
        }
        let artifact = plan.command.artifact_path(&dir, pkg);
        if let Some(artifact_dir) = artifact.parent() {
            if collides(artifact_dir, &plan.output_dir) {
                result.errors.push(format!(
                    "Output directory {} is where the toolchain leaves '{pkg}'; \
                     collecting would copy the artifact onto itself",
                    plan.output_dir.display()
                ));
            }
        }
        result.packages.push(PackageCheck {
            package: pkg.clone(),
            artifact,
            source_dir: dir,
            found,
        });
    }

    result.output_dir_exists = plan.output_dir.is_dir();
    if !result.output_dir_exists {
        result.errors.push(format!(
            "Output directory does not exist: {}",
            plan.output_dir.display()
        ));
    }

    match toolchain::locate(&plan.command.program) {
        Ok(path) => result.toolchain = Some(path),
        Err(e) => result.warnings.push(e.to_string()),
    }

    for dup in plan.duplicates() {
        result
            .warnings
            .push(format!("Package '{dup}' is declared more than once"));
    }

    result
}

fn collides(artifact_dir: &Path, output_dir: &Path) -> bool {
    normalize(artifact_dir) == normalize(output_dir)
        || filesystem::same_file(artifact_dir, output_dir)
}
