//! Per-group retirement state machine.
//!
//! ## State machine
//!
//! ```text
//! scaling -> draining -> deleting_group -> deleting_launch_template -> done
//!    |           |              |                     |
//!    +-----------+-----> failed <--------------------+
//! ```
//!
//! A drain that finds the group already gone jumps straight to `done`;
//! there is nothing left to delete. `failed` is absorbing and strictly
//! per-group: it never blocks or cancels sibling jobs.

use tokio::sync::watch;
use tracing::{debug, info};

use teardown_fleet::AutoscalingGroup;

use crate::drain::{wait_for_drain, DrainConfig, DrainError, DrainResult};
use crate::error::RetireError;
use crate::provider::FleetControl;

/// Lifecycle state of a retirement job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Shrinking desired/min/max capacity to zero.
    Scaling,
    /// Waiting for the member count to reach zero.
    Draining,
    /// Force-deleting the group.
    DeletingGroup,
    /// Deleting the group's launch template.
    DeletingLaunchTemplate,
    /// Terminal: the group and its template are gone.
    Done,
    /// Terminal: some step failed; the error was reported upward.
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// One group's retirement, owned exclusively by the task driving it.
///
/// Created when the orchestrator fans out, dropped when the job reaches
/// a terminal state. Nothing here is shared with sibling jobs.
#[derive(Debug)]
pub struct RetirementJob {
    group: AutoscalingGroup,
    state: JobState,
}

impl RetirementJob {
    pub fn new(group: AutoscalingGroup) -> Self {
        Self {
            group,
            state: JobState::Scaling,
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group.name
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Drives the job to a terminal state.
    ///
    /// Always leaves `state()` at `Done` or `Failed`; the returned
    /// error is the one recorded in the run summary.
    pub async fn run<P: FleetControl + ?Sized>(
        &mut self,
        provider: &P,
        drain: &DrainConfig,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), RetireError> {
        let result = self.drive(provider, drain, shutdown).await;
        self.state = match result {
            Ok(()) => JobState::Done,
            Err(_) => JobState::Failed,
        };
        result
    }

    async fn drive<P: FleetControl + ?Sized>(
        &mut self,
        provider: &P,
        drain: &DrainConfig,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), RetireError> {
        let name = self.group.name.clone();

        // Capacity must reach zero and actually drain before deletion:
        // deleting a group with live members can orphan them.
        provider
            .set_group_capacity(&name, 0, 0, 0)
            .await
            .map_err(|source| RetireError::Scale {
                group: name.clone(),
                source,
            })?;
        self.state = JobState::Draining;
        info!(group = %name, "scaled group to zero, waiting for drain");

        match wait_for_drain(provider, &name, drain, shutdown).await {
            Ok(DrainResult::Drained) => {}
            Ok(DrainResult::AlreadyGone) => {
                info!(group = %name, "group already gone, nothing left to delete");
                return Ok(());
            }
            Err(DrainError::Poll(source)) => {
                return Err(RetireError::Poll {
                    group: name,
                    source,
                });
            }
            Err(DrainError::Cancelled) => {
                return Err(RetireError::Cancelled { group: name });
            }
        }

        self.state = JobState::DeletingGroup;
        info!(group = %name, "deleting autoscaling group");
        provider
            .delete_group(&name, true)
            .await
            .map_err(|source| RetireError::DeleteGroup {
                group: name.clone(),
                source,
            })?;

        if let Some(template) = self.group.launch_template.clone() {
            self.state = JobState::DeletingLaunchTemplate;
            info!(group = %name, template = %template.id, "deleting launch template");
            provider.delete_launch_template(&template.id).await.map_err(
                |source| RetireError::DeleteTemplate {
                    group: name.clone(),
                    template: template.id.clone(),
                    source,
                },
            )?;
        } else {
            debug!(group = %name, "group has no launch template, skipping");
        }

        Ok(())
    }
}
