//! Drain waiter: polls a group until its member count reaches zero.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::provider::{FleetControl, ProviderError};

/// Default interval between drain polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Drain polling configuration.
#[derive(Debug, Clone)]
pub struct DrainConfig {
    /// Time slept between member-count queries.
    pub poll_interval: Duration,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Successful outcome of a drain wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainResult {
    /// The group exists and reports zero members.
    Drained,

    /// The group is gone from the listing entirely, e.g. deleted
    /// out-of-band while we waited. A success, not an error.
    AlreadyGone,
}

/// Why a drain wait ended without a result.
#[derive(Debug)]
pub enum DrainError {
    /// A member-count query failed; propagated immediately, no retry.
    Poll(ProviderError),

    /// The shutdown channel was signaled (or its sender dropped).
    Cancelled,
}

/// Waits until `group_name` has drained.
///
/// Queries the group immediately, then sleeps `config.poll_interval`
/// between queries. There is no upper bound on the wait; the only ways
/// out are a terminal poll result, a query error, or the shutdown
/// channel flipping to `true`.
pub async fn wait_for_drain<P: FleetControl + ?Sized>(
    provider: &P,
    group_name: &str,
    config: &DrainConfig,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<DrainResult, DrainError> {
    loop {
        if *shutdown.borrow() {
            return Err(DrainError::Cancelled);
        }

        match provider
            .describe_group(group_name)
            .await
            .map_err(DrainError::Poll)?
        {
            None => return Ok(DrainResult::AlreadyGone),
            Some(group) if group.member_count == 0 => return Ok(DrainResult::Drained),
            Some(group) => {
                debug!(
                    group = %group_name,
                    members = group.member_count,
                    "group not drained yet"
                );
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(config.poll_interval) => {}
            changed = shutdown.changed() => {
                // A dropped sender means nobody can signal us anymore;
                // treat it the same as an explicit cancel.
                if changed.is_err() || *shutdown.borrow() {
                    return Err(DrainError::Cancelled);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let config = DrainConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(15));
    }
}
