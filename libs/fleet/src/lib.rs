//! Fleet resource model and teardown matching.
//!
//! This library holds the data types shared by the teardown tooling:
//!
//! - **Tags**: key/value pairs attached to compute resources. Keys are
//!   not unique in the underlying system, so tags are a list, not a map.
//! - **Criteria**: the app/env/exclude-version filter set for one run.
//! - **Resources**: standalone instances and autoscaling groups.
//! - **Matcher**: pure selection of teardown candidates.
//!
//! Everything here is side-effect free; talking to the control plane is
//! the `teardown-retire` crate's job.

mod criteria;
mod matcher;
mod resource;
mod tags;

pub use criteria::{CriteriaError, TeardownCriteria};
pub use matcher::select_candidates;
pub use resource::{AutoscalingGroup, FleetResource, LaunchTemplateRef, StandaloneInstance};
pub use tags::{Tag, TagFilter, TAG_APP, TAG_ENV, TAG_VERSION};
