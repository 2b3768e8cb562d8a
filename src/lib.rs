//! wasmdist - fail-fast package build pipeline
//!
//! Compiles an ordered list of packages with one toolchain command (by
//! default `cargo build --target wasm32-unknown-unknown`) and collects each
//! artifact into a shared output directory.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Manifest, navigation and build orchestration
//! - [`infra`] - Infrastructure layer (filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
