//! Teardown criteria for one invocation.

use thiserror::Error;

/// A required filter was missing or empty.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("required filter `{0}` is empty")]
    EmptyFilter(&'static str),
}

/// The filter set for one teardown run.
///
/// Constructed once from CLI flags / environment variables and passed
/// by reference into every component; there is no ambient global
/// options value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownCriteria {
    /// Resources must carry `app=<app>`.
    pub app: String,

    /// Resources must carry `env=<env>`.
    pub env: String,

    /// Resources carrying `version=<exclude_version>` are spared.
    pub exclude_version: String,

    /// Match and report, but never mutate.
    pub dry_run: bool,
}

impl TeardownCriteria {
    /// Reject empty required filters before any network call is made.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.app.is_empty() {
            return Err(CriteriaError::EmptyFilter("app"));
        }
        if self.env.is_empty() {
            return Err(CriteriaError::EmptyFilter("env"));
        }
        if self.exclude_version.is_empty() {
            return Err(CriteriaError::EmptyFilter("exclude"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> TeardownCriteria {
        TeardownCriteria {
            app: "checkout".to_string(),
            env: "prod".to_string(),
            exclude_version: "v42".to_string(),
            dry_run: false,
        }
    }

    #[test]
    fn test_valid_criteria() {
        assert_eq!(criteria().validate(), Ok(()));
    }

    #[test]
    fn test_empty_app_rejected() {
        let mut c = criteria();
        c.app.clear();
        assert_eq!(c.validate(), Err(CriteriaError::EmptyFilter("app")));
    }

    #[test]
    fn test_empty_env_rejected() {
        let mut c = criteria();
        c.env.clear();
        assert_eq!(c.validate(), Err(CriteriaError::EmptyFilter("env")));
    }

    #[test]
    fn test_empty_exclude_rejected() {
        let mut c = criteria();
        c.exclude_version.clear();
        assert_eq!(c.validate(), Err(CriteriaError::EmptyFilter("exclude")));
    }
}
