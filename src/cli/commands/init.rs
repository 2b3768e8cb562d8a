//! Init command implementation
//!
//! Implements `wasmdist init` to create a manifest.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::{status, OutputConfig};
use crate::core::init::{self, InitOptions};

/// Execute the init command
pub async fn execute(
    manifest_path: &Path,
    options: &InitOptions,
    output: OutputConfig,
) -> Result<()> {
    let result = init::init(manifest_path, options)?;

    if output.show_text() {
        println!(
            "{} Created {}",
            status::SUCCESS,
            result.manifest_path.display()
        );
        if options.discover {
            println!("  Packages: {}", result.packages.len());
            for pkg in &result.packages {
                println!("    {pkg}");
            }
        }
    }
    Ok(())
}
