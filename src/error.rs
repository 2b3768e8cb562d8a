//! Error types for wasmdist
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline step at which a package failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    /// Resolving the package's source directory
    Navigate,
    /// Running the toolchain
    Build,
    /// Copying the artifact into the output directory
    Collect,
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigate => write!(f, "navigate"),
            Self::Build => write!(f, "build"),
            Self::Collect => write!(f, "collect"),
        }
    }
}

/// Build pipeline errors
///
/// Every variant halts the pipeline; none are recovered.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source directory for a package does not exist
    #[error("Source directory for package '{package}' not found: {path}")]
    Navigation { package: String, path: PathBuf },

    /// Toolchain exited unsuccessfully
    #[error("Build failed for package '{package}' ({status}):\n{diagnostics}")]
    BuildFailed {
        package: String,
        status: String,
        diagnostics: String,
    },

    /// Build succeeded but no artifact was produced
    #[error("Build for package '{package}' reported success but artifact is missing: {path}")]
    ArtifactMissing { package: String, path: PathBuf },

    /// Artifact could not be copied to the output directory
    #[error("Failed to copy artifact for package '{package}' from '{from}' to '{to}': {error}")]
    Copy {
        package: String,
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

impl PipelineError {
    /// Name of the package that failed
    pub fn package(&self) -> &str {
        match self {
            Self::Navigation { package, .. }
            | Self::BuildFailed { package, .. }
            | Self::ArtifactMissing { package, .. }
            | Self::Copy { package, .. } => package,
        }
    }

    /// Step at which the package failed
    pub fn step(&self) -> PipelineStep {
        match self {
            Self::Navigation { .. } => PipelineStep::Navigate,
            Self::BuildFailed { .. } => PipelineStep::Build,
            Self::ArtifactMissing { .. } | Self::Copy { .. } => PipelineStep::Collect,
        }
    }
}

/// Manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest not found at '{path}'. Run 'wasmdist init' to create one.")]
    NotFound { path: PathBuf },

    /// TOML syntax or schema error
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failed
    #[error("Invalid manifest:\n  - {}", .problems.join("\n  - "))]
    Invalid { problems: Vec<String> },

    /// Environment substitution failed
    #[error("Environment substitution failed: {0}")]
    Substitution(String),

    /// Manifest could not be read
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Toolchain invocation errors
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Process could not be started
    #[error("Failed to start '{program}' in '{dir}': {error}")]
    Spawn {
        program: String,
        dir: PathBuf,
        error: String,
    },

    /// Program is not on PATH
    #[error("Toolchain '{program}' not found in PATH")]
    NotFound { program: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Project initialization errors
#[derive(Error, Debug)]
pub enum InitError {
    /// Manifest already exists
    #[error("Manifest already exists: {path}. Use --force to overwrite it")]
    ManifestExists { path: PathBuf },

    /// Source root could not be scanned
    #[error("Failed to scan '{path}' for packages: {error}")]
    Discover { path: PathBuf, error: String },

    /// Manifest could not be written
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
