//! Core business logic module
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (wasmdist.toml) parsing and validation
//! - [`package`] - Package names
//! - [`command`] - The toolchain command applied to every package
//! - [`navigation`] - Package source directory resolution
//! - [`builder`] - Build orchestration
//! - [`check`] - Configuration validation logic
//! - [`init`] - Project initialization logic

pub mod builder;
pub mod check;
pub mod command;
pub mod init;
pub mod manifest;
pub mod navigation;
pub mod package;
