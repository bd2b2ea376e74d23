//! Error taxonomy for teardown runs.
//!
//! Two tiers: `TeardownError` is fatal for the whole run (bad criteria,
//! failed discovery), `RetireError` is fatal only to the owning
//! per-group job and is collected into the run summary instead of
//! propagating.

use thiserror::Error;

use teardown_fleet::CriteriaError;

use crate::provider::ProviderError;

/// Fatal, run-level errors.
#[derive(Debug, Error)]
pub enum TeardownError {
    /// A required filter was missing; raised before any API call.
    #[error("invalid teardown criteria: {0}")]
    Criteria(#[from] CriteriaError),

    /// Listing resources failed; no candidate set, cannot proceed.
    #[error("fleet discovery failed: {0}")]
    Discovery(#[source] ProviderError),
}

/// Job-level errors, isolated per group (or per terminate batch).
#[derive(Debug, Error)]
pub enum RetireError {
    #[error("failed to scale group {group} to zero: {source}")]
    Scale {
        group: String,
        source: ProviderError,
    },

    #[error("drain poll failed for group {group}: {source}")]
    Poll {
        group: String,
        source: ProviderError,
    },

    #[error("failed to delete group {group}: {source}")]
    DeleteGroup {
        group: String,
        source: ProviderError,
    },

    #[error("failed to delete launch template {template} of group {group}: {source}")]
    DeleteTemplate {
        group: String,
        template: String,
        source: ProviderError,
    },

    #[error("failed to terminate instances: {source}")]
    Terminate { source: ProviderError },

    #[error("retirement of group {group} was cancelled")]
    Cancelled { group: String },

    #[error("retirement task for group {group} panicked")]
    TaskPanicked { group: String },
}
