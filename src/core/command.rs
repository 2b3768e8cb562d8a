//! Toolchain invocation template
//!
//! The same command is run for every package. It never names the package:
//! the working directory alone decides what gets built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::package::PackageName;

/// Placeholder replaced with the target triple
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Placeholder replaced with the build profile
pub const PROFILE_PLACEHOLDER: &str = "{profile}";

/// Process-wide build command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildCommand {
    /// Toolchain program
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments, may contain `{target}` and `{profile}`
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Target triple
    #[serde(default = "default_target")]
    pub target: String,

    /// Build profile
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Artifact file extension, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Toolchain output directory relative to the package directory.
    /// Derived from target and profile when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_program() -> String {
    defaults::DEFAULT_PROGRAM.to_string()
}

fn default_args() -> Vec<String> {
    defaults::DEFAULT_ARGS.iter().map(ToString::to_string).collect()
}

fn default_target() -> String {
    defaults::DEFAULT_TARGET.to_string()
}

fn default_profile() -> String {
    defaults::DEFAULT_PROFILE.to_string()
}

fn default_extension() -> String {
    defaults::DEFAULT_EXTENSION.to_string()
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            target: default_target(),
            profile: default_profile(),
            extension: default_extension(),
            output_dir: None,
        }
    }
}

impl BuildCommand {
    /// Arguments with placeholders substituted
    pub fn rendered_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace(TARGET_PLACEHOLDER, &self.target)
                    .replace(PROFILE_PLACEHOLDER, &self.profile)
            })
            .collect()
    }

    /// Full command line, for logging
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.rendered_args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Directory name cargo uses for the profile (`dev` builds land in `debug`)
    pub fn profile_dir(&self) -> &str {
        match self.profile.as_str() {
            "dev" | "test" => "debug",
            "bench" => "release",
            other => other,
        }
    }

    /// Toolchain output directory relative to a package directory
    pub fn toolchain_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            PathBuf::from("target")
                .join(&self.target)
                .join(self.profile_dir())
        })
    }

    /// Where a successful build of `package` in `package_dir` leaves its artifact
    pub fn artifact_path(&self, package_dir: &Path, package: &PackageName) -> PathBuf {
        package_dir
            .join(self.toolchain_output_dir())
            .join(package.artifact_file_name(&self.extension))
    }

    /// Problems with the command, empty if usable
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.program.trim().is_empty() {
            problems.push("toolchain.program cannot be empty".to_string());
        }
        if self.extension.trim().is_empty() {
            problems.push("toolchain.extension cannot be empty".to_string());
        } else if self.extension.starts_with('.') {
            problems.push(format!(
                "toolchain.extension '{}' must not start with '.'",
                self.extension
            ));
        }
        let uses_target = self.args.iter().any(|a| a.contains(TARGET_PLACEHOLDER));
        if uses_target && self.target.trim().is_empty() {
            problems.push("toolchain.target cannot be empty when args use {target}".to_string());
        }
        problems
    }
}
