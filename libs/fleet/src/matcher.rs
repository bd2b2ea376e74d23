//! Candidate selection for teardown.

use crate::criteria::TeardownCriteria;
use crate::resource::FleetResource;
use crate::tags::{has_tag, TAG_APP, TAG_ENV, TAG_VERSION};

/// Selects the resources that qualify for teardown.
///
/// A resource is a candidate iff it carries `app=criteria.app` and
/// `env=criteria.env` and does NOT carry
/// `version=criteria.exclude_version`. The same rule applies to
/// instances and groups; absent tags never match, so an untagged
/// resource is excluded rather than erroring.
///
/// Pure and order-preserving relative to the input listing. The caller
/// is responsible for exhausting control-plane pagination first.
pub fn select_candidates<R: FleetResource>(
    resources: Vec<R>,
    criteria: &TeardownCriteria,
) -> Vec<R> {
    resources
        .into_iter()
        .filter(|resource| {
            let tags = resource.tags();
            has_tag(tags, TAG_APP, &criteria.app)
                && has_tag(tags, TAG_ENV, &criteria.env)
                && !has_tag(tags, TAG_VERSION, &criteria.exclude_version)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::resource::{AutoscalingGroup, StandaloneInstance};
    use crate::tags::Tag;

    fn criteria() -> TeardownCriteria {
        TeardownCriteria {
            app: "checkout".to_string(),
            env: "prod".to_string(),
            exclude_version: "v42".to_string(),
            dry_run: false,
        }
    }

    fn group(name: &str, tags: Vec<Tag>) -> AutoscalingGroup {
        AutoscalingGroup {
            name: name.to_string(),
            launch_template: None,
            member_count: 0,
            tags,
        }
    }

    #[test]
    fn test_matches_only_qualifying_group() {
        let groups = vec![
            group(
                "checkout-v41",
                vec![
                    Tag::new("app", "checkout"),
                    Tag::new("env", "prod"),
                    Tag::new("version", "v41"),
                ],
            ),
            group(
                "checkout-v42",
                vec![
                    Tag::new("app", "checkout"),
                    Tag::new("env", "prod"),
                    Tag::new("version", "v42"),
                ],
            ),
            group(
                "billing-v41",
                vec![
                    Tag::new("app", "billing"),
                    Tag::new("env", "prod"),
                    Tag::new("version", "v41"),
                ],
            ),
        ];

        let candidates = select_candidates(groups, &criteria());
        let names: Vec<&str> = candidates.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["checkout-v41"]);
    }

    #[test]
    fn test_untagged_resource_excluded() {
        let instances = vec![StandaloneInstance {
            id: "i-0abc".to_string(),
            tags: Vec::new(),
        }];

        assert!(select_candidates(instances, &criteria()).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let tags = vec![Tag::new("app", "checkout"), Tag::new("env", "prod")];
        let groups = vec![
            group("c", tags.clone()),
            group("a", tags.clone()),
            group("b", tags),
        ];

        let names: Vec<String> = select_candidates(groups, &criteria())
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_keys_any_entry_matches() {
        // Keys are not unique upstream; one matching entry suffices.
        let groups = vec![group(
            "dup",
            vec![
                Tag::new("app", "billing"),
                Tag::new("app", "checkout"),
                Tag::new("env", "prod"),
            ],
        )];

        assert_eq!(select_candidates(groups, &criteria()).len(), 1);
    }

    fn arb_tag() -> impl Strategy<Value = Tag> {
        let keys = prop_oneof![
            Just("app".to_string()),
            Just("env".to_string()),
            Just("version".to_string()),
            Just("team".to_string()),
        ];
        let values = prop_oneof![
            Just("checkout".to_string()),
            Just("billing".to_string()),
            Just("prod".to_string()),
            Just("v41".to_string()),
            Just("v42".to_string()),
        ];
        (keys, values).prop_map(|(key, value)| Tag { key, value })
    }

    proptest! {
        #[test]
        fn prop_membership_matches_invariant(tags in proptest::collection::vec(arb_tag(), 0..8)) {
            let criteria = criteria();
            let expected = has_tag(&tags, "app", "checkout")
                && has_tag(&tags, "env", "prod")
                && !has_tag(&tags, "version", "v42");

            let instances = vec![StandaloneInstance {
                id: "i-0abc".to_string(),
                tags,
            }];
            let selected = !select_candidates(instances, &criteria).is_empty();

            prop_assert_eq!(selected, expected);
        }
    }
}
