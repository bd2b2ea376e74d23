//! Control-plane capability trait.
//!
//! The retirement logic never talks to a concrete cloud API; it
//! consumes this trait. The CLI supplies an HTTP-backed implementation,
//! tests supply an in-memory one. Implementations are shared read-only
//! across workers: every worker mutates only its own group, so
//! concurrent independent calls are safe.

use async_trait::async_trait;
use thiserror::Error;

use teardown_fleet::{AutoscalingGroup, StandaloneInstance, TagFilter};

/// Error from a control-plane call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The control plane rejected the request.
    #[error("control plane returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got a usable response.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// The control-plane operations teardown consumes.
#[async_trait]
pub trait FleetControl: Send + Sync {
    /// List all autoscaling groups in the region, pagination exhausted.
    async fn list_groups(&self) -> Result<Vec<AutoscalingGroup>, ProviderError>;

    /// Fetch one group by name; `None` means the group no longer exists.
    async fn describe_group(&self, name: &str)
        -> Result<Option<AutoscalingGroup>, ProviderError>;

    /// List standalone instances matching the given tag filters.
    async fn list_instances(
        &self,
        filters: &[TagFilter],
    ) -> Result<Vec<StandaloneInstance>, ProviderError>;

    /// Set a group's desired/min/max capacity in one mutation.
    async fn set_group_capacity(
        &self,
        name: &str,
        desired: u32,
        min: u32,
        max: u32,
    ) -> Result<(), ProviderError>;

    /// Delete a group. With `force`, delete even if the control plane's
    /// own bookkeeping still believes members remain.
    async fn delete_group(&self, name: &str, force: bool) -> Result<(), ProviderError>;

    /// Delete a launch template by id.
    async fn delete_launch_template(&self, id: &str) -> Result<(), ProviderError>;

    /// Bulk-terminate instances; returns the ids that entered termination.
    async fn terminate_instances(&self, ids: &[String]) -> Result<Vec<String>, ProviderError>;
}
