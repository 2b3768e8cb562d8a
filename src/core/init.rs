//! Project initialization logic
//!
//! Writes a starter `wasmdist.toml`, optionally pre-filled with the packages
//! found under the source root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::defaults;
use crate::core::manifest::generate_manifest_content;
use crate::core::package::PackageName;
use crate::error::InitError;
use crate::infra::filesystem;

/// Options for project initialization
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project name; defaults to the directory name
    pub name: Option<String>,
    /// Scan the source root for packages
    pub discover: bool,
    /// Overwrite an existing manifest
    pub force: bool,
}

/// Result of initialization
#[derive(Debug)]
pub struct InitResult {
    /// Path to created manifest
    pub manifest_path: PathBuf,
    /// Packages written into the manifest
    pub packages: Vec<PackageName>,
}

/// Find package directories directly under `source_root`.
///
/// A package directory contains a `Cargo.toml`. Names are sorted so the
/// generated build order is stable.
pub fn discover_packages(source_root: &Path) -> Result<Vec<PackageName>, InitError> {
    if !source_root.is_dir() {
        return Err(InitError::Discover {
            path: source_root.to_path_buf(),
            error: "not a directory".to_string(),
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(source_root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| InitError::Discover {
            path: source_root.to_path_buf(),
            error: e.to_string(),
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if !entry.path().join(defaults::PACKAGE_MARKER).is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        found.push(PackageName::new(name));
    }
    found.sort();
    Ok(found)
}

/// Write a manifest at `manifest_path`.
///
/// The project directory is the manifest's parent: discovery scans its
/// source root and the project name defaults to its directory name.
pub fn init(manifest_path: &Path, options: &InitOptions) -> Result<InitResult, InitError> {
    if manifest_path.exists() && !options.force {
        return Err(InitError::ManifestExists {
            path: manifest_path.to_path_buf(),
        });
    }
    let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let packages = if options.discover {
        let root = dir.join(defaults::DEFAULT_SOURCE_ROOT);
        let packages = discover_packages(&root)?;
        tracing::info!("Discovered {} packages in {}", packages.len(), root.display());
        packages
    } else {
        Vec::new()
    };

    let name = options.name.clone().unwrap_or_else(|| {
        dir.file_name()
            .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned())
    });

    let content = generate_manifest_content(&name, &packages);
    filesystem::write_file(manifest_path, &content)?;

    Ok(InitResult {
        manifest_path: manifest_path.to_path_buf(),
        packages,
    })
}
