//! Manifest (wasmdist.toml) parsing and validation
//!
//! The manifest declares the ordered package list, where sources live,
//! where artifacts go, and the toolchain command used for every package.
//! Supports environment variable substitution using ${VAR} syntax.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::command::BuildCommand;
use crate::core::navigation::{normalize, NavigationMode, SourceNavigator};
use crate::core::package::{self, PackageName};
use crate::error::ManifestError;
use crate::infra::filesystem;

/// The project manifest (wasmdist.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    #[serde(default)]
    pub project: ProjectConfig,

    /// Package list and directories
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Build command applied to every package
    #[serde(default)]
    pub toolchain: BuildCommand,

    /// Explicit source directories, relative to the manifest
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<PackageName, PathBuf>,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            description: None,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Directory the first package is resolved from
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Shared artifact destination; must already exist
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// How package directories are located
    #[serde(default)]
    pub navigation: NavigationMode,

    /// Packages in build order
    #[serde(default)]
    pub packages: Vec<PackageName>,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_SOURCE_ROOT)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_OUTPUT_DIR)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            output_dir: default_output_dir(),
            navigation: NavigationMode::default(),
            packages: Vec::new(),
        }
    }
}

/// Command-line overrides applied on top of the manifest
#[derive(Debug, Clone, Default)]
pub struct ManifestOverrides {
    /// Replace the package list
    pub packages: Vec<PackageName>,
    /// Replace the output directory
    pub output_dir: Option<PathBuf>,
    /// Replace the target triple
    pub target: Option<String>,
    /// Replace the build profile
    pub profile: Option<String>,
}

/// Everything the orchestrator needs, with paths made absolute
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    /// Packages in build order
    pub packages: Vec<PackageName>,
    /// Build command
    pub command: BuildCommand,
    /// Absolute source root
    pub source_root: PathBuf,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Navigation mode
    pub navigation: NavigationMode,
    /// Absolute explicit source directories
    pub sources: BTreeMap<PackageName, PathBuf>,
}

impl PipelinePlan {
    /// Navigator positioned at the source root
    pub fn navigator(&self) -> SourceNavigator {
        SourceNavigator::new(&self.source_root, self.navigation)
            .with_overrides(self.sources.clone())
    }

    /// Packages declared more than once
    pub fn duplicates(&self) -> Vec<PackageName> {
        package::duplicates(&self.packages)
    }
}

/// Substitute environment variables in a string using ${VAR} syntax.
///
/// Unset variables expand to the empty string.
///
/// # Examples
/// ```
/// use wasmdist::core::manifest::substitute_env_vars;
///
/// std::env::set_var("WASMDIST_DOC_VAR", "hello");
/// let result = substitute_env_vars("prefix_${WASMDIST_DOC_VAR}_suffix").unwrap();
/// assert_eq!(result, "prefix_hello_suffix");
/// std::env::remove_var("WASMDIST_DOC_VAR");
/// ```
pub fn substitute_env_vars(input: &str) -> Result<String, ManifestError> {
    substitute_vars(input, |name| std::env::var(name).ok())
}

/// Replace `${VAR}` patterns using `lookup`; unknown names expand to nothing
fn substitute_vars<F>(input: &str, lookup: F) -> Result<String, ManifestError>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| ManifestError::Substitution(format!("Invalid regex: {e}")))?;

    let output = re.replace_all(input, |caps: &regex::Captures<'_>| {
        lookup(&caps[1]).unwrap_or_default()
    });
    Ok(output.into_owned())
}

/// Recursively substitute environment variables in a TOML value
fn substitute_in_value(value: &mut toml::Value) -> Result<(), ManifestError> {
    match value {
        toml::Value::String(s) => {
            *s = substitute_env_vars(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr.iter_mut() {
                substitute_in_value(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                substitute_in_value(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl Manifest {
    /// Load a manifest from disk, substituting ${VAR} in string values
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = filesystem::read_file(path)?;
        Self::from_toml_with_env(&content)
    }

    /// Parse manifest content, substituting ${VAR} in string values
    pub fn from_toml_with_env(content: &str) -> Result<Self, ManifestError> {
        let mut value: toml::Value = toml::from_str(content)?;
        substitute_in_value(&mut value)?;
        Ok(value.try_into::<Manifest>()?)
    }

    /// Parse manifest content verbatim
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize manifest to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: ManifestOverrides) {
        if !overrides.packages.is_empty() {
            self.pipeline.packages = overrides.packages;
        }
        if let Some(dir) = overrides.output_dir {
            self.pipeline.output_dir = dir;
        }
        if let Some(target) = overrides.target {
            self.toolchain.target = target;
        }
        if let Some(profile) = overrides.profile {
            self.toolchain.profile = profile;
        }
    }

    /// Collect every problem with the manifest
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.project.name.trim().is_empty() {
            problems.push("project.name cannot be empty".to_string());
        }
        if self.pipeline.packages.is_empty() {
            problems.push("pipeline.packages must list at least one package".to_string());
        }
        for pkg in &self.pipeline.packages {
            if let Some(problem) = pkg.check() {
                problems.push(problem);
            }
        }
        for name in self.sources.keys() {
            if let Some(problem) = name.check() {
                problems.push(format!("[sources]: {problem}"));
            }
        }
        problems.extend(self.toolchain.problems());
        problems
    }

    /// Validate the manifest, reporting all problems at once
    pub fn validate(&self) -> Result<(), ManifestError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ManifestError::Invalid { problems })
        }
    }

    /// Validate and resolve paths against `base_dir` (the manifest's directory)
    pub fn plan(&self, base_dir: &Path) -> Result<PipelinePlan, ManifestError> {
        self.validate()?;
        let resolve = |p: &Path| normalize(&base_dir.join(p));
        Ok(PipelinePlan {
            packages: self.pipeline.packages.clone(),
            command: self.toolchain.clone(),
            source_root: resolve(self.pipeline.source_root.as_path()),
            output_dir: resolve(self.pipeline.output_dir.as_path()),
            navigation: self.pipeline.navigation,
            sources: self
                .sources
                .iter()
                .map(|(name, path)| (name.clone(), resolve(path.as_path())))
                .collect(),
        })
    }
}

/// Generate a commented manifest for a new project
pub fn generate_manifest_content(project_name: &str, packages: &[PackageName]) -> String {
    let package_list = if packages.is_empty() {
        "# packages = [\"auction_house\", \"escrow\", \"account_manager\"]\npackages = []"
            .to_string()
    } else {
        let quoted: Vec<String> = packages.iter().map(|p| toml_string(p.as_str())).collect();
        format!("packages = [{}]", quoted.join(", "))
    };
    let args: Vec<String> = defaults::DEFAULT_ARGS.iter().map(|a| toml_string(a)).collect();

    format!(
        r#"# wasmdist configuration

[project]
name = {project_name}

[pipeline]
# Directory the first package is resolved from
source_root = "{source_root}"
# Artifacts are copied here; the directory must already exist
output_dir = "{output_dir}"
# "sibling": each package is found next to the previous one (../<name>)
# "root": each package is found directly under source_root
navigation = "sibling"
# Names must match the package directory names. Build order is list order.
{package_list}

[toolchain]
program = "{program}"
args = [{args}]
target = "{target}"
profile = "{profile}"
extension = "{extension}"
# Defaults to target/<target>/<profile>
# output_dir = "target/{target}/{profile}"

# Explicit source directories, relative to this file
# [sources]
# escrow = "vendored/escrow"
"#,
        project_name = toml_string(project_name),
        source_root = defaults::DEFAULT_SOURCE_ROOT,
        output_dir = defaults::DEFAULT_OUTPUT_DIR,
        program = defaults::DEFAULT_PROGRAM,
        args = args.join(", "),
        target = defaults::DEFAULT_TARGET,
        profile = defaults::DEFAULT_PROFILE,
        extension = defaults::DEFAULT_EXTENSION,
    )
}

/// Quote and escape a TOML string value
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
