//! Package names
//!
//! A package name doubles as the name of its source directory and as the
//! stem of its artifact file, so it must be a single plain path component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a package, identical to its source directory name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a package name without validation
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the name is usable as a directory and file stem.
    ///
    /// Returns a description of the problem if it is not.
    pub fn check(&self) -> Option<String> {
        let name = self.0.as_str();
        if name.trim().is_empty() {
            return Some("package name cannot be empty".to_string());
        }
        if name == "." || name == ".." {
            return Some(format!("package name '{name}' is not a directory name"));
        }
        if name.contains('/') || name.contains('\\') {
            return Some(format!(
                "package name '{name}' must be a single directory name \
                 (use [sources] for nested paths)"
            ));
        }
        None
    }

    /// File name of this package's artifact
    pub fn artifact_file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PackageName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Names that appear more than once, in order of their second appearance
pub fn duplicates(packages: &[PackageName]) -> Vec<PackageName> {
    let mut seen = std::collections::HashSet::new();
    let mut dups = Vec::new();
    for pkg in packages {
        if !seen.insert(pkg) && !dups.contains(pkg) {
            dups.push(pkg.clone());
        }
    }
    dups
}
