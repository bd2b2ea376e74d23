//! Graceful fleet retirement.
//!
//! The core of the teardown tool: given a candidate set of autoscaling
//! groups, each group is retired by a small state machine — scale to
//! zero, wait for members to drain, force-delete the group, delete its
//! launch template — with one concurrent job per group and strictly
//! per-group failure isolation.
//!
//! Structure:
//!
//! - [`provider`]: the `FleetControl` capability trait the rest of the
//!   crate consumes; implemented over HTTP by the CLI and in-memory by
//!   tests.
//! - [`drain`]: the polling waiter for a group's member count.
//! - [`job`]: the per-group retirement state machine.
//! - [`orchestrator`]: discovery, matching, fan-out, and the bulk
//!   standalone-instance path.

pub mod drain;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod provider;

pub use drain::{wait_for_drain, DrainConfig, DrainError, DrainResult, DEFAULT_POLL_INTERVAL};
pub use error::{RetireError, TeardownError};
pub use job::{JobState, RetirementJob};
pub use orchestrator::{Orchestrator, Summary};
pub use provider::{FleetControl, ProviderError};
