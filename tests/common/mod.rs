//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Shell script standing in for the compiler.
///
/// Runs in the package directory, appends the directory name to
/// `calls.log` two levels up, fails when a `FAIL` marker exists, skips the
/// artifact when a `NO_ARTIFACT` marker exists, and otherwise writes
/// `out/<name>.wasm`.
pub const FAKE_TOOLCHAIN: &str = r#"name=$(basename "$PWD")
echo "$name" >> ../../calls.log
if [ -f FAIL ]; then echo "error: could not compile $name" >&2; exit 101; fi
if [ -f NO_ARTIFACT ]; then echo "Finished"; exit 0; fi
mkdir -p out && printf 'wasm:%s' "$name" > "out/$name.wasm""#;

/// Test project context
///
/// Creates a temporary directory holding a `contracts/` source root, a
/// `dist/` output directory and a manifest using the fake toolchain.
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new empty test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with package directories, `dist/`, and a manifest
    /// listing `order`
    pub fn with_packages(packages: &[&str], order: &[&str]) -> Self {
        let project = Self::new();
        for pkg in packages {
            project.add_package(pkg);
        }
        project.create_dir("dist");
        project.write_manifest(order, "");
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a package source directory under `contracts/`
    pub fn add_package(&self, name: &str) {
        self.create_file(
            &format!("contracts/{name}/Cargo.toml"),
            &format!("[package]\nname = \"{name}\"\n"),
        );
    }

    /// Make the fake toolchain fail for a package
    pub fn mark_failing(&self, name: &str) {
        self.create_file(&format!("contracts/{name}/FAIL"), "");
    }

    /// Make the fake toolchain succeed without producing an artifact
    pub fn mark_no_artifact(&self, name: &str) {
        self.create_file(&format!("contracts/{name}/NO_ARTIFACT"), "");
    }

    /// Write `wasmdist.toml` with the given package order and extra TOML
    pub fn write_manifest(&self, order: &[&str], extra: &str) {
        let quoted: Vec<String> = order.iter().map(|p| format!("\"{p}\"")).collect();
        let content = format!(
            r#"[project]
name = "test-project"

[pipeline]
source_root = "contracts"
output_dir = "dist"
packages = [{packages}]

[toolchain]
program = "sh"
args = ["-c", '''{script}''']
output_dir = "out"
{extra}
"#,
            packages = quoted.join(", "),
            script = FAKE_TOOLCHAIN,
        );
        self.create_file("wasmdist.toml", &content);
    }

    /// Package directory names in the order the toolchain ran
    pub fn calls(&self) -> Vec<String> {
        let log = self.dir.path().join("calls.log");
        if !log.exists() {
            return Vec::new();
        }
        std::fs::read_to_string(log)
            .expect("Failed to read calls.log")
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Sorted file names in `dist/`
    pub fn dist_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path().join("dist"))
            .expect("Failed to read dist")
            .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run wasmdist in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        wasmdist_command(self.dir.path()).args(args).output().expect("Failed to execute wasmdist")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A wasmdist command with a clean environment, run in `dir`
#[allow(dead_code)]
pub fn wasmdist_command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wasmdist"));
    cmd.current_dir(dir)
        .env_remove("WASMDIST_MANIFEST")
        .env_remove("RUST_LOG");
    cmd
}

/// Lossy stdout
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
