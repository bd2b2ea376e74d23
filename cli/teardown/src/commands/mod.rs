//! CLI commands.

mod asg;
mod ec2;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use teardown_fleet::TeardownCriteria;
use teardown_retire::{DrainConfig, Orchestrator, Summary};

use crate::client::ControlPlaneClient;

/// teardown - terminate tagged EC2 instances and autoscaling groups.
#[derive(Debug, Parser)]
#[command(name = "teardown")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bulk-terminate standalone instances matching the filters.
    Ec2(ec2::Ec2Command),

    /// Gracefully retire autoscaling groups matching the filters.
    Asg(asg::AsgCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Ec2(cmd) => cmd.run().await,
            Commands::Asg(cmd) => cmd.run().await,
        }
    }
}

/// Flags shared by both subcommands.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Region to operate in.
    #[arg(long, env = "AWS_REGION")]
    pub region: String,

    /// Only tear down resources carrying this app tag.
    #[arg(long, env = "TEARDOWN_APP")]
    pub app: String,

    /// Only tear down resources carrying this env tag.
    #[arg(long, env = "TEARDOWN_ENV")]
    pub env: String,

    /// Spare resources carrying this version tag.
    #[arg(long = "exclude", env = "TEARDOWN_VERSION")]
    pub exclude: String,

    /// Match and report, but mutate nothing.
    #[arg(long, env = "TEARDOWN_DRY")]
    pub dry: bool,

    /// Control plane API endpoint.
    #[arg(
        long,
        env = "TEARDOWN_ENDPOINT",
        default_value = "http://127.0.0.1:8080"
    )]
    pub endpoint: String,

    /// Seconds to sleep between drain polls.
    #[arg(long, env = "TEARDOWN_DRAIN_INTERVAL", default_value_t = 15)]
    pub drain_interval_secs: u64,
}

impl FilterArgs {
    pub fn criteria(&self) -> TeardownCriteria {
        TeardownCriteria {
            app: self.app.clone(),
            env: self.env.clone(),
            exclude_version: self.exclude.clone(),
            dry_run: self.dry,
        }
    }

    pub fn drain_config(&self) -> DrainConfig {
        DrainConfig {
            poll_interval: Duration::from_secs(self.drain_interval_secs),
        }
    }

    /// Builds the orchestrator with Ctrl-C wired to cooperative shutdown.
    pub fn orchestrator(&self) -> Result<Orchestrator<ControlPlaneClient>> {
        let client = ControlPlaneClient::new(&self.endpoint, &self.region)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received interrupt, cancelling in-flight waits");
                let _ = shutdown_tx.send(true);
            }
        });

        Ok(Orchestrator::new(
            Arc::new(client),
            self.drain_config(),
            shutdown_rx,
        ))
    }
}

/// Turns a run summary into the process outcome.
///
/// Policy: best-effort execution, strict reporting — every per-group
/// failure is already logged, and any failure makes the run exit
/// non-zero.
pub fn finish(summary: Summary, what: &str) -> Result<()> {
    if summary.is_clean() {
        return Ok(());
    }
    anyhow::bail!(
        "{} of {} {} teardown(s) failed",
        summary.failures.len(),
        summary.attempted,
        what
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parses_asg_flags() {
        let cli = Cli::try_parse_from([
            "teardown",
            "asg",
            "--region",
            "us-east-1",
            "--app",
            "checkout",
            "--env",
            "prod",
            "--exclude",
            "v42",
            "--dry",
        ])
        .unwrap();

        let Commands::Asg(cmd) = cli.command else {
            panic!("expected asg subcommand");
        };
        let criteria = cmd.filters.criteria();
        assert_eq!(criteria.app, "checkout");
        assert_eq!(criteria.env, "prod");
        assert_eq!(criteria.exclude_version, "v42");
        assert!(criteria.dry_run);
        assert_eq!(cmd.filters.drain_interval_secs, 15);
    }

    #[test]
    fn test_missing_required_flag_rejected() {
        let result = Cli::try_parse_from([
            "teardown",
            "ec2",
            "--region",
            "us-east-1",
            "--app",
            "checkout",
            "--env",
            "prod",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_finish_reports_failures() {
        let summary = Summary {
            matched: 2,
            attempted: 2,
            failures: vec![teardown_retire::RetireError::TaskPanicked {
                group: "g".to_string(),
            }],
        };
        assert!(finish(summary, "group").is_err());

        let clean = Summary {
            matched: 0,
            attempted: 0,
            failures: Vec::new(),
        };
        assert!(finish(clean, "group").is_ok());
    }
}
