//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid package name (lowercase alphanumeric with underscores and hyphens)
    pub fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,30}"
    }

    /// Generate a list of distinct package names
    pub fn package_list(max: usize) -> impl Strategy<Value = Vec<String>> {
        proptest::collection::btree_set(package_name(), 1..=max)
            .prop_map(|set| set.into_iter().collect())
    }

    /// Generate a target triple the default toolchain accepts
    pub fn target_triple() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("wasm32-unknown-unknown".to_string()),
            Just("wasm32-wasip1".to_string()),
            Just("wasm32v1-none".to_string()),
        ]
    }

    /// Generate a cargo profile name
    pub fn profile() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("release".to_string()),
            Just("dev".to_string()),
            "[a-z][a-z0-9-]{0,10}",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::command::BuildCommand;
    use crate::core::package::PackageName;
    use proptest::prelude::*;
    use std::path::Path;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_list_generator_is_distinct(list in package_list(10)) {
            let mut sorted = list.clone();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), list.len());
        }

        #[test]
        fn artifact_path_always_ends_with_name_and_extension(
            name in package_name(),
            target in target_triple(),
            profile in profile(),
        ) {
            let cmd = BuildCommand { target, profile, ..BuildCommand::default() };
            let pkg = PackageName::new(name.clone());
            let path = cmd.artifact_path(Path::new("/src").join(&name).as_path(), &pkg);
            let expected = format!("{name}.wasm");
            prop_assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);
            prop_assert!(path.starts_with(Path::new("/src").join(&name).join("target")));
        }
    }
}
