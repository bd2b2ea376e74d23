//! Teardown orchestrator: discovery, matching, and concurrent fan-out.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

use teardown_fleet::{
    select_candidates, TagFilter, TeardownCriteria, TAG_APP, TAG_ENV,
};

use crate::drain::DrainConfig;
use crate::error::{RetireError, TeardownError};
use crate::job::RetirementJob;
use crate::provider::FleetControl;

/// Outcome of one teardown run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Resources the matcher selected.
    pub matched: usize,

    /// Jobs (or terminate batches) actually started; zero on dry runs.
    pub attempted: usize,

    /// Per-job failures, collected after every job reached a terminal
    /// state. Never causes sibling jobs to be cancelled.
    pub failures: Vec<RetireError>,
}

impl Summary {
    fn matched_only(matched: usize) -> Self {
        Self {
            matched,
            attempted: 0,
            failures: Vec::new(),
        }
    }

    /// True when nothing went wrong (including the no-op case).
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans the retirement state machine out across matched groups and
/// drives the bulk standalone-instance path.
pub struct Orchestrator<P> {
    provider: Arc<P>,
    drain: DrainConfig,
    shutdown: watch::Receiver<bool>,
}

impl<P: FleetControl + 'static> Orchestrator<P> {
    pub fn new(provider: Arc<P>, drain: DrainConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            provider,
            drain,
            shutdown,
        }
    }

    /// Retires every autoscaling group matching `criteria`.
    ///
    /// One concurrent job per matched group, no pooling. Waits for all
    /// jobs to reach a terminal state before returning; failures are
    /// aggregated, never fail-fast.
    pub async fn retire_groups(
        &self,
        criteria: &TeardownCriteria,
    ) -> Result<Summary, TeardownError> {
        criteria.validate()?;

        let groups = self
            .provider
            .list_groups()
            .await
            .map_err(TeardownError::Discovery)?;
        let candidates = select_candidates(groups, criteria);
        let matched = candidates.len();
        info!(matched, "matched autoscaling group(s) for retirement");

        if candidates.is_empty() {
            info!("no autoscaling groups to retire");
            return Ok(Summary::matched_only(0));
        }

        if criteria.dry_run {
            for group in &candidates {
                info!(group = %group.name, "dry run: would retire group");
            }
            info!(matched, "dry run: no groups were mutated");
            return Ok(Summary::matched_only(matched));
        }

        let mut handles = Vec::with_capacity(matched);
        for group in candidates {
            let provider = Arc::clone(&self.provider);
            let drain = self.drain.clone();
            let mut shutdown = self.shutdown.clone();
            let name = group.name.clone();
            let handle = tokio::spawn(async move {
                let mut job = RetirementJob::new(group);
                let result = job
                    .run(provider.as_ref(), &drain, &mut shutdown)
                    .await;
                debug_assert!(job.state().is_terminal());
                result
            });
            handles.push((name, handle));
        }

        let mut summary = Summary {
            matched,
            attempted: matched,
            failures: Vec::new(),
        };
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(())) => debug!(group = %name, "group retired"),
                Ok(Err(e)) => {
                    error!(group = %name, error = %e, "group retirement failed");
                    summary.failures.push(e);
                }
                Err(e) => {
                    error!(group = %name, error = %e, "retirement task panicked");
                    summary.failures.push(RetireError::TaskPanicked { group: name });
                }
            }
        }

        info!(
            attempted = summary.attempted,
            failed = summary.failures.len(),
            "group retirement complete"
        );
        Ok(summary)
    }

    /// Terminates every standalone instance matching `criteria`.
    ///
    /// A single bulk call; there is no per-instance state machine. An
    /// empty candidate set is a no-op, not an error.
    pub async fn terminate_instances(
        &self,
        criteria: &TeardownCriteria,
    ) -> Result<Summary, TeardownError> {
        criteria.validate()?;

        // app/env are narrowed server-side; the matcher still applies
        // the full invariant, including the version exclusion.
        let filters = [
            TagFilter::new(TAG_APP, &criteria.app),
            TagFilter::new(TAG_ENV, &criteria.env),
        ];
        let instances = self
            .provider
            .list_instances(&filters)
            .await
            .map_err(TeardownError::Discovery)?;
        let candidates = select_candidates(instances, criteria);
        let matched = candidates.len();

        if candidates.is_empty() {
            info!("no instances to terminate");
            return Ok(Summary::matched_only(0));
        }

        if criteria.dry_run {
            info!(matched, "dry run: would terminate instance(s)");
            return Ok(Summary::matched_only(matched));
        }

        let ids: Vec<String> = candidates.into_iter().map(|i| i.id).collect();
        let mut summary = Summary {
            matched,
            attempted: matched,
            failures: Vec::new(),
        };
        match self.provider.terminate_instances(&ids).await {
            Ok(terminated) => {
                info!(terminating = terminated.len(), "instance termination requested");
            }
            Err(source) => {
                let failure = RetireError::Terminate { source };
                error!(error = %failure, "instance termination failed");
                summary.failures.push(failure);
            }
        }

        Ok(summary)
    }
}
