//! Default configuration values

/// Manifest file name looked up in the working directory
pub const MANIFEST_FILE: &str = "wasmdist.toml";

/// Environment variable overriding the manifest path
pub const MANIFEST_ENV: &str = "WASMDIST_MANIFEST";

/// Directory the first package is resolved from
pub const DEFAULT_SOURCE_ROOT: &str = "contracts";

/// Shared artifact destination
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Toolchain program
pub const DEFAULT_PROGRAM: &str = "cargo";

/// Toolchain arguments; `{target}` and `{profile}` are substituted
pub const DEFAULT_ARGS: &[&str] = &["build", "--target", "{target}", "--profile", "{profile}"];

/// Target triple
pub const DEFAULT_TARGET: &str = "wasm32-unknown-unknown";

/// Build profile
pub const DEFAULT_PROFILE: &str = "release";

/// Artifact file extension
pub const DEFAULT_EXTENSION: &str = "wasm";

/// Marker file identifying a package directory during discovery
pub const PACKAGE_MARKER: &str = "Cargo.toml";
