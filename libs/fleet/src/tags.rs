//! Resource tags and tag filters.

use serde::{Deserialize, Serialize};

/// Tag key carrying the application name.
pub const TAG_APP: &str = "app";

/// Tag key carrying the environment name.
pub const TAG_ENV: &str = "env";

/// Tag key carrying the deployed version.
pub const TAG_VERSION: &str = "version";

/// A single key/value tag on a fleet resource.
///
/// The control plane does not guarantee key uniqueness, so resources
/// carry a list of tags rather than a map. Any entry with the right
/// key and value counts as a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A server-side tag filter for instance listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Returns true if any tag in `tags` has the given key and value.
pub(crate) fn has_tag(tags: &[Tag], key: &str, value: &str) -> bool {
    tags.iter().any(|tag| tag.key == key && tag.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag_matches_any_entry() {
        let tags = vec![
            Tag::new("app", "checkout"),
            Tag::new("app", "billing"),
            Tag::new("env", "prod"),
        ];

        assert!(has_tag(&tags, "app", "checkout"));
        assert!(has_tag(&tags, "app", "billing"));
        assert!(!has_tag(&tags, "app", "prod"));
        assert!(!has_tag(&tags, "version", "v1"));
    }

    #[test]
    fn test_has_tag_empty_list() {
        assert!(!has_tag(&[], "app", "checkout"));
    }
}
