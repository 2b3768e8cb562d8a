//! Integration tests for `wasmdist build`
//!
//! - Builds every package in declared order and collects one artifact each
//! - Stops at the first failing package; earlier artifacts stay in place
//! - Reports missing artifacts, missing source directories and copy failures
//! - Resolves later packages relative to the previous package directory

mod common;

use common::{stderr, stdout, wasmdist_command, TestProject};
use predicates::prelude::*;

#[test]
fn test_build_collects_every_artifact_in_order() {
    let project = TestProject::with_packages(&["a", "b", "c"], &["a", "b", "c"]);

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.calls(), vec!["a", "b", "c"]);
    assert_eq!(project.dist_files(), vec!["a.wasm", "b.wasm", "c.wasm"]);
    assert_eq!(project.read_file("dist/b.wasm"), "wasm:b");
    assert!(predicate::str::contains("Build complete").eval(&stdout(&output)));
}

#[test]
fn test_failure_halts_before_remaining_packages() {
    let project = TestProject::with_packages(&["a", "b", "c"], &["a", "b", "c"]);
    project.mark_failing("b");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("'b'"), "stderr: {err}");
    assert!(err.contains("error: could not compile b"), "stderr: {err}");
    // c is never attempted and a's artifact is left in place
    assert_eq!(project.calls(), vec!["a", "b"]);
    assert_eq!(project.dist_files(), vec!["a.wasm"]);
}

#[test]
fn test_first_package_failure_copies_nothing() {
    let project = TestProject::with_packages(&["a", "b"], &["a", "b"]);
    project.mark_failing("a");

    let output = project.run(&["build"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(project.calls(), vec!["a"]);
    assert!(project.dist_files().is_empty());
}

#[test]
fn test_missing_artifact_after_successful_build() {
    let project = TestProject::with_packages(&["a"], &["a"]);
    project.mark_no_artifact("a");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("artifact is missing"), "stderr: {err}");
    assert!(err.contains("out/a.wasm"), "stderr: {err}");
    assert!(project.dist_files().is_empty());
}

#[test]
fn test_missing_source_directory() {
    let project = TestProject::with_packages(&["a", "c"], &["a", "b", "c"]);

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Source directory for package 'b' not found"), "stderr: {err}");
    assert_eq!(project.calls(), vec!["a"]);
    assert_eq!(project.dist_files(), vec!["a.wasm"]);
}

#[test]
fn test_unstartable_toolchain_halts_at_first_package() {
    let project = TestProject::with_packages(&["a", "b"], &["a", "b"]);
    let manifest = project
        .read_file("wasmdist.toml")
        .replace("program = \"sh\"", "program = \"wasmdist-no-such-program\"");
    project.create_file("wasmdist.toml", &manifest);

    let output = project.run(&["build"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("package 'a'"), "stderr: {err}");
    assert!(err.contains("wasmdist-no-such-program"), "stderr: {err}");
    assert!(project.calls().is_empty());
    assert!(project.dist_files().is_empty());
}

#[test]
fn test_missing_output_directory_is_not_created() {
    let project = TestProject::new();
    project.add_package("a");
    project.write_manifest(&["a"], "");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to copy artifact"));
    assert!(!project.file_exists("dist"));
}

#[test]
fn test_order_permutations_yield_same_artifacts() {
    for order in [["c", "a", "b"], ["b", "c", "a"]] {
        let project = TestProject::with_packages(&["a", "b", "c"], &order);

        let output = project.run(&["build"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(project.calls(), order.to_vec());
        assert_eq!(project.dist_files(), vec!["a.wasm", "b.wasm", "c.wasm"]);
        for name in ["a", "b", "c"] {
            assert_eq!(project.read_file(&format!("dist/{name}.wasm")), format!("wasm:{name}"));
        }
    }
}

#[test]
fn test_rebuild_is_byte_identical() {
    let project = TestProject::with_packages(&["a", "b"], &["a", "b"]);

    assert!(project.run(&["build"]).status.success());
    let first = std::fs::read(project.path().join("dist/a.wasm")).unwrap();
    assert!(project.run(&["build"]).status.success());
    let second = std::fs::read(project.path().join("dist/a.wasm")).unwrap();

    assert_eq!(first, second);
    assert_eq!(project.calls(), vec!["a", "b", "a", "b"]);
}

#[test]
fn test_json_report() {
    let project = TestProject::with_packages(&["a", "b"], &["a", "b"]);

    let output = project.run(&["build", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout is not JSON");
    let artifacts = report["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0]["package"], "a");
    assert_eq!(artifacts[1]["size"], "wasm:b".len());
    assert_eq!(artifacts[0]["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_package_flag_overrides_manifest_list() {
    let project = TestProject::with_packages(&["a", "b", "c"], &["a", "b", "c"]);

    let output = project.run(&["build", "-p", "c", "-p", "a"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.calls(), vec!["c", "a"]);
    assert_eq!(project.dist_files(), vec!["a.wasm", "c.wasm"]);
}

#[test]
fn test_output_dir_flag() {
    let project = TestProject::with_packages(&["a"], &["a"]);
    project.create_dir("elsewhere");

    let output = project.run(&["build", "--output-dir", "elsewhere"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.file_exists("elsewhere/a.wasm"));
    assert!(project.dist_files().is_empty());
}

#[test]
fn test_later_packages_follow_explicit_source() {
    let project = TestProject::new();
    project.add_package("auction_house");
    project.create_file("vendored/escrow/Cargo.toml", "");
    project.create_file("vendored/account_manager/Cargo.toml", "");
    project.create_dir("dist");
    project.write_manifest(
        &["auction_house", "escrow", "account_manager"],
        "[sources]\nescrow = \"vendored/escrow\"\n",
    );

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        project.calls(),
        vec!["auction_house", "escrow", "account_manager"]
    );
    // account_manager was found next to the vendored escrow
    assert!(project.file_exists("vendored/account_manager/out/account_manager.wasm"));
    assert_eq!(
        project.dist_files(),
        vec!["account_manager.wasm", "auction_house.wasm", "escrow.wasm"]
    );
}

#[test]
fn test_root_navigation_mode() {
    let project = TestProject::new();
    project.add_package("auction_house");
    project.add_package("account_manager");
    project.create_file("vendored/escrow/Cargo.toml", "");
    project.create_dir("dist");
    project.write_manifest(
        &["auction_house", "escrow", "account_manager"],
        "[sources]\nescrow = \"vendored/escrow\"\n",
    );
    let manifest = project
        .read_file("wasmdist.toml")
        .replace("output_dir = \"dist\"", "output_dir = \"dist\"\nnavigation = \"root\"");
    project.create_file("wasmdist.toml", &manifest);

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.file_exists("contracts/account_manager/out/account_manager.wasm"));
}

#[test]
fn test_manifest_from_environment_variable() {
    let project = TestProject::with_packages(&["a"], &["a"]);
    let elsewhere = tempfile::TempDir::new().unwrap();

    let output = wasmdist_command(elsewhere.path())
        .env("WASMDIST_MANIFEST", project.path().join("wasmdist.toml"))
        .arg("build")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.dist_files(), vec!["a.wasm"]);
}

#[test]
fn test_missing_manifest() {
    let project = TestProject::new();

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("wasmdist init"));
}
