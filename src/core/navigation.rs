//! Source directory navigation
//!
//! Packages live side by side. The first package is entered from the source
//! root and each later one is reached from the previous package's directory
//! through `../<name>`, exactly like a sequence of `cd` calls. Instead of
//! changing the process working directory, the navigator keeps its own
//! cursor and hands out normalized absolute paths.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::core::package::PackageName;
use crate::error::PipelineError;

/// How package source directories are located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// First package from the source root, then `../<name>` from the previous one
    #[default]
    Sibling,
    /// Every package as `<source root>/<name>`
    Root,
}

/// Resolves package source directories in build order
#[derive(Debug, Clone)]
pub struct SourceNavigator {
    root: PathBuf,
    mode: NavigationMode,
    overrides: BTreeMap<PackageName, PathBuf>,
    cursor: Option<PathBuf>,
}

impl SourceNavigator {
    /// Create a navigator starting at `root`
    pub fn new(root: impl Into<PathBuf>, mode: NavigationMode) -> Self {
        Self {
            root: normalize(&root.into()),
            mode,
            overrides: BTreeMap::new(),
            cursor: None,
        }
    }

    /// Use explicit directories for some packages
    #[must_use]
    pub fn with_overrides(mut self, overrides: BTreeMap<PackageName, PathBuf>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Directory of the most recently entered package
    pub fn current(&self) -> Option<&Path> {
        self.cursor.as_deref()
    }

    /// Resolve the next package's directory and move the cursor there.
    ///
    /// Does not touch the filesystem.
    pub fn advance(&mut self, package: &PackageName) -> PathBuf {
        let dir = if let Some(explicit) = self.overrides.get(package) {
            normalize(explicit)
        } else {
            match (self.mode, &self.cursor) {
                (NavigationMode::Sibling, Some(previous)) => {
                    normalize(&previous.join("..").join(package.as_str()))
                }
                _ => normalize(&self.root.join(package.as_str())),
            }
        };
        self.cursor = Some(dir.clone());
        dir
    }

    /// Resolve the next package's directory and require that it exists
    pub fn enter(&mut self, package: &PackageName) -> Result<PathBuf, PipelineError> {
        let dir = self.advance(package);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(PipelineError::Navigation {
                package: package.to_string(),
                path: dir,
            })
        }
    }
}

/// Lexically normalize a path, folding `.` and `..` components.
///
/// `..` at the top of a relative path is kept; `..` at the filesystem root
/// is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
