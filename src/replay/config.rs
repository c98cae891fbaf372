//! Replay configuration.
//!
//! Two behaviors of the replayer are configurable: whether sequence numbers
//! are validated, and whether a closed account rejects every later event or
//! only money movements. An optional cap bounds the length of logs the
//! replayer accepts.
//!
//! # Environment Variables
//!
//! | Key | Values | Default |
//! |-----|--------|---------|
//! | `REPLAY_SEQUENCE_POLICY` | `strict`, `permissive` | `strict` |
//! | `REPLAY_CLOSURE_POLICY` | `absorbing`, `monetary-only` | `absorbing` |
//! | `REPLAY_MAX_EVENTS` | positive integer | no cap |
//!
//! # Example
//!
//! ```rust,ignore
//! use account_replay::replay::{ReplayConfig, Replayer};
//!
//! let replayer = Replayer::new(ReplayConfig::from_env()?);
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment key selecting the [`SequencePolicy`].
pub const SEQUENCE_POLICY_KEY: &str = "REPLAY_SEQUENCE_POLICY";
/// Environment key selecting the [`ClosurePolicy`].
pub const CLOSURE_POLICY_KEY: &str = "REPLAY_CLOSURE_POLICY";
/// Environment key capping the number of events per replay.
pub const MAX_EVENTS_KEY: &str = "REPLAY_MAX_EVENTS";

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable has a value that cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy '{0}'")]
pub struct UnknownPolicy(pub String);

/// How sequence numbers are checked before replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequencePolicy {
    /// Every event must carry its 1-based position as sequence number.
    #[default]
    Strict,
    /// Sequence numbers are ignored and input order is trusted.
    Permissive,
}

impl SequencePolicy {
    /// Returns the configuration name of the policy.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for SequencePolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(UnknownPolicy(value.to_string())),
        }
    }
}

/// What a closed account still accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClosurePolicy {
    /// A closed account rejects every event.
    #[default]
    Absorbing,
    /// A closed account rejects deposits and withdrawals only.
    MonetaryOnly,
}

impl ClosurePolicy {
    /// Returns `true` for [`ClosurePolicy::Absorbing`].
    #[must_use]
    pub const fn is_absorbing(&self) -> bool {
        matches!(self, Self::Absorbing)
    }

    /// Returns the configuration name of the policy.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Absorbing => "absorbing",
            Self::MonetaryOnly => "monetary-only",
        }
    }
}

impl fmt::Display for ClosurePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for ClosurePolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "absorbing" => Ok(Self::Absorbing),
            "monetary-only" | "monetary_only" => Ok(Self::MonetaryOnly),
            _ => Err(UnknownPolicy(value.to_string())),
        }
    }
}

/// Replayer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayConfig {
    /// Sequence-number validation.
    pub sequence_policy: SequencePolicy,
    /// Behavior of closed accounts.
    pub closure_policy: ClosurePolicy,
    /// Longest log accepted, if capped.
    pub max_events: Option<usize>,
}

impl ReplayConfig {
    /// Loads configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `lookup` returns the raw value of a key, or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use account_replay::replay::{ClosurePolicy, ReplayConfig, SequencePolicy};
    ///
    /// let config = ReplayConfig::from_lookup(|key| match key {
    ///     "REPLAY_CLOSURE_POLICY" => Some("monetary-only".to_string()),
    ///     "REPLAY_MAX_EVENTS" => Some("500".to_string()),
    ///     _ => None,
    /// })?;
    ///
    /// assert_eq!(config.sequence_policy, SequencePolicy::Strict);
    /// assert_eq!(config.closure_policy, ClosurePolicy::MonetaryOnly);
    /// assert_eq!(config.max_events, Some(500));
    /// # Ok::<(), account_replay::replay::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sequence_policy: SequencePolicy =
            parse_optional(&lookup, SEQUENCE_POLICY_KEY)?.unwrap_or_default();
        let closure_policy: ClosurePolicy =
            parse_optional(&lookup, CLOSURE_POLICY_KEY)?.unwrap_or_default();
        let max_events: Option<usize> = parse_optional(&lookup, MAX_EVENTS_KEY)?;

        if max_events == Some(0) {
            return Err(ConfigError::invalid(
                MAX_EVENTS_KEY,
                "must be a positive integer",
            ));
        }

        Ok(Self {
            sequence_policy,
            closure_policy,
            max_events,
        })
    }

    /// Returns the configuration with the given sequence policy.
    #[must_use]
    pub const fn with_sequence_policy(self, sequence_policy: SequencePolicy) -> Self {
        Self {
            sequence_policy,
            ..self
        }
    }

    /// Returns the configuration with the given closure policy.
    #[must_use]
    pub const fn with_closure_policy(self, closure_policy: ClosurePolicy) -> Self {
        Self {
            closure_policy,
            ..self
        }
    }

    /// Returns the configuration with a cap on the number of events.
    #[must_use]
    pub const fn with_max_events(self, max_events: usize) -> Self {
        Self {
            max_events: Some(max_events),
            ..self
        }
    }
}

fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|error: T::Err| ConfigError::invalid(key, error.to_string()))
        })
        .transpose()
}
