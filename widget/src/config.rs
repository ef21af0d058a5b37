//! Widget configuration.
//!
//! Two policies decide behavior the interactive surface never exercises under
//! normal use:
//!
//! - [`UnchangedRemoval`]: what removing an id that is not in the list does
//! - [`IdCollision`]: what adding an item whose generated id is taken does
//!
//! Both default to the stricter choice. [`TodoConfig::from_env`] reads
//! overrides from `TODO_WIDGET_UNCHANGED_REMOVAL` and `TODO_WIDGET_ID_COLLISION`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable selecting [`UnchangedRemoval`]
pub const UNCHANGED_REMOVAL_VAR: &str = "TODO_WIDGET_UNCHANGED_REMOVAL";

/// Environment variable selecting [`IdCollision`]
pub const ID_COLLISION_VAR: &str = "TODO_WIDGET_ID_COLLISION";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting had a value outside its allowed set
    #[error("Invalid value {value:?} for {key} (expected one of: {expected})")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// Rejected value
        value: String,
        /// Allowed values
        expected: &'static str,
    },
}

/// Removing an id that matches nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnchangedRemoval {
    /// Keep the current snapshot; subscribers are not notified
    #[default]
    Skip,
    /// Publish a new, content-equal snapshot
    Replace,
}

impl FromStr for UnchangedRemoval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "replace" => Ok(Self::Replace),
            _ => Err(ConfigError::InvalidValue {
                key: UNCHANGED_REMOVAL_VAR,
                value: s.to_string(),
                expected: "skip, replace",
            }),
        }
    }
}

impl fmt::Display for UnchangedRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Adding an item whose generated id is already in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdCollision {
    /// Refuse the add and record [`TodoError::DuplicateId`](crate::types::TodoError::DuplicateId)
    #[default]
    Reject,
    /// Append anyway; the list then holds two items with one id
    Accept,
}

impl FromStr for IdCollision {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "accept" => Ok(Self::Accept),
            _ => Err(ConfigError::InvalidValue {
                key: ID_COLLISION_VAR,
                value: s.to_string(),
                expected: "reject, accept",
            }),
        }
    }
}

impl fmt::Display for IdCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Accept => write!(f, "accept"),
        }
    }
}

/// Widget configuration
///
/// # Example
///
/// ```
/// use todo_widget::config::{IdCollision, TodoConfig, UnchangedRemoval};
///
/// let config = TodoConfig::default()
///     .with_unchanged_removal(UnchangedRemoval::Replace)
///     .with_id_collision(IdCollision::Accept);
///
/// assert_eq!(config.unchanged_removal, UnchangedRemoval::Replace);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoConfig {
    /// Behavior of removals that match nothing
    pub unchanged_removal: UnchangedRemoval,
    /// Behavior of adds whose id is taken
    pub id_collision: IdCollision,
}

impl TodoConfig {
    /// Set the removal policy
    #[must_use]
    pub const fn with_unchanged_removal(mut self, policy: UnchangedRemoval) -> Self {
        self.unchanged_removal = policy;
        self
    }

    /// Set the collision policy
    #[must_use]
    pub const fn with_id_collision(mut self, policy: IdCollision) -> Self {
        self.id_collision = policy;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a key maps to an unknown value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(UNCHANGED_REMOVAL_VAR) {
            config.unchanged_removal = value.parse()?;
        }

        if let Some(value) = lookup(ID_COLLISION_VAR) {
            config.id_collision = value.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_strict() {
        let config = TodoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TodoConfig::default());
        assert_eq!(config.unchanged_removal, UnchangedRemoval::Skip);
        assert_eq!(config.id_collision, IdCollision::Reject);
    }

    #[test]
    fn values_are_case_insensitive() {
        let config = TodoConfig::from_lookup(lookup(&[
            (UNCHANGED_REMOVAL_VAR, "Replace"),
            (ID_COLLISION_VAR, " ACCEPT "),
        ]))
        .unwrap();

        assert_eq!(config.unchanged_removal, UnchangedRemoval::Replace);
        assert_eq!(config.id_collision, IdCollision::Accept);
    }

    #[test]
    fn unknown_value_is_an_error() {
        let err = TodoConfig::from_lookup(lookup(&[(ID_COLLISION_VAR, "overwrite")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ID_COLLISION_VAR,
                value: "overwrite".to_string(),
                expected: "reject, accept",
            }
        );
        assert!(err.to_string().contains("TODO_WIDGET_ID_COLLISION"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for policy in [UnchangedRemoval::Skip, UnchangedRemoval::Replace] {
            assert_eq!(policy.to_string().parse::<UnchangedRemoval>().unwrap(), policy);
        }
        for policy in [IdCollision::Reject, IdCollision::Accept] {
            assert_eq!(policy.to_string().parse::<IdCollision>().unwrap(), policy);
        }
    }
}
