//! `teardown ec2` - bulk standalone-instance termination.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{finish, FilterArgs};

#[derive(Debug, Args)]
pub struct Ec2Command {
    #[command(flatten)]
    pub filters: FilterArgs,
}

impl Ec2Command {
    pub async fn run(self) -> Result<()> {
        let criteria = self.filters.criteria();
        info!(
            region = %self.filters.region,
            app = %criteria.app,
            env = %criteria.env,
            exclude = %criteria.exclude_version,
            dry_run = criteria.dry_run,
            "starting instance teardown"
        );

        let orchestrator = self.filters.orchestrator()?;
        let summary = orchestrator.terminate_instances(&criteria).await?;
        finish(summary, "instance")
    }
}
