//! `teardown asg` - graceful autoscaling-group retirement.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{finish, FilterArgs};

#[derive(Debug, Args)]
pub struct AsgCommand {
    #[command(flatten)]
    pub filters: FilterArgs,
}

impl AsgCommand {
    pub async fn run(self) -> Result<()> {
        let criteria = self.filters.criteria();
        info!(
            region = %self.filters.region,
            app = %criteria.app,
            env = %criteria.env,
            exclude = %criteria.exclude_version,
            dry_run = criteria.dry_run,
            "starting autoscaling group teardown"
        );

        let orchestrator = self.filters.orchestrator()?;
        let summary = orchestrator.retire_groups(&criteria).await?;
        finish(summary, "group")
    }
}
