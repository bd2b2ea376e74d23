//! Fleet resource types.

use serde::{Deserialize, Serialize};

use crate::tags::Tag;

/// A tagged compute unit subject to tag-based lifecycle management.
///
/// Implemented by standalone instances and autoscaling groups; the
/// matcher only ever looks at tags, so this is the whole seam.
pub trait FleetResource {
    /// The resource's tags, in control-plane order.
    fn tags(&self) -> &[Tag];
}

/// Reference to the launch template an autoscaling group provisions from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTemplateRef {
    pub id: String,
}

/// An autoscaling group as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscalingGroup {
    /// Unique group name within the region.
    pub name: String,

    /// Launch template the group provisions members from, if any.
    #[serde(default)]
    pub launch_template: Option<LaunchTemplateRef>,

    /// Number of members currently in the group.
    pub member_count: u32,

    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl FleetResource for AutoscalingGroup {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// A standalone compute instance (not managed by any group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandaloneInstance {
    pub id: String,

    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl FleetResource for StandaloneInstance {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_deserializes_without_tags() {
        let group: AutoscalingGroup = serde_json::from_str(
            r#"{"name": "web-v41", "launch_template": {"id": "lt-1"}, "member_count": 3}"#,
        )
        .unwrap();

        assert_eq!(group.name, "web-v41");
        assert_eq!(group.member_count, 3);
        assert!(group.tags.is_empty());
    }

    #[test]
    fn test_instance_round_trips() {
        let instance = StandaloneInstance {
            id: "i-0abc".to_string(),
            tags: vec![Tag::new("app", "checkout")],
        };

        let json = serde_json::to_string(&instance).unwrap();
        let back: StandaloneInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
