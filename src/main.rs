//! wasmdist CLI
//!
//! Entry point for the wasmdist command-line application.

use anyhow::Result;
use clap::Parser;

use wasmdist::cli::output::display_error;
use wasmdist::cli::{build_info, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.output_config().log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("wasmdist {}", build_info());

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
