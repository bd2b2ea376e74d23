//! teardown - retire tagged EC2 instances and autoscaling groups.
//!
//! Every run is a stateless scan-and-act pass: discover fleet
//! resources, match them against the app/env/exclude-version filters,
//! and tear the matches down. Autoscaling groups are retired
//! gracefully (scale to zero, drain, delete); standalone instances are
//! bulk-terminated.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod client;
mod commands;
mod error;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Any fatal error or any per-group failure exits non-zero.
    if let Err(e) = cli.run().await {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
