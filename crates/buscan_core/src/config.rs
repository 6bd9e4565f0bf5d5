//! Injected core configuration.
//!
//! # Responsibility
//! - Carry the closed set of bus operational states.
//! - Carry the route-reference strictness policy.
//!
//! # Invariants
//! - The state set is non-empty, trimmed, and free of duplicates.
//! - The default bus state is a member of the state set.
//! - Validation logic only ever consults `BusStateSet`, never literals.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Bus is parked and can be dispatched.
pub const BUS_STATE_AVAILABLE: &str = "AVAILABLE";
/// Bus is running a route.
pub const BUS_STATE_IN_SERVICE: &str = "IN_SERVICE";
/// Bus is withdrawn for maintenance or repair.
pub const BUS_STATE_OUT_OF_SERVICE: &str = "OUT_OF_SERVICE";

const DEFAULT_BUS_STATES: &[&str] = &[
    BUS_STATE_AVAILABLE,
    BUS_STATE_IN_SERVICE,
    BUS_STATE_OUT_OF_SERVICE,
];

/// How create/update paths treat route names that do not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Record the name anyway; it becomes a dangling reference.
    #[default]
    Permissive,
    /// Reject the write with a validation error.
    Strict,
}

/// Configuration load or validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    EmptyStateSet,
    BlankState,
    DuplicateState(String),
    UnknownDefaultState(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::EmptyStateSet => write!(f, "bus_states must contain at least one state"),
            Self::BlankState => write!(f, "bus_states must not contain blank entries"),
            Self::DuplicateState(state) => write!(f, "duplicate bus state `{state}`"),
            Self::UnknownDefaultState(state) => {
                write!(f, "default_bus_state `{state}` is not in bus_states")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Closed, ordered set of valid bus states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BusStateSet {
    states: Vec<String>,
}

impl BusStateSet {
    /// Builds a state set, trimming entries and rejecting blanks/duplicates.
    pub fn new<I, S>(states: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for state in states {
            let state = state.as_ref().trim();
            if state.is_empty() {
                return Err(ConfigError::BlankState);
            }
            if normalized.iter().any(|known| known == state) {
                return Err(ConfigError::DuplicateState(state.to_string()));
            }
            normalized.push(state.to_string());
        }
        if normalized.is_empty() {
            return Err(ConfigError::EmptyStateSet);
        }
        Ok(Self { states: normalized })
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.iter().any(|known| known == state)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    /// Checks caller input against the set. Input is trimmed; matching is
    /// case-sensitive.
    pub fn parse(&self, value: &str) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if self.contains(trimmed) {
            Ok(trimmed.to_string())
        } else {
            Err(ValidationError::UnknownState {
                value: value.to_string(),
            })
        }
    }
}

impl Default for BusStateSet {
    fn default() -> Self {
        Self {
            states: DEFAULT_BUS_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for BusStateSet {
    type Error = ConfigError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusStateSet> for Vec<String> {
    fn from(value: BusStateSet) -> Self {
        value.states
    }
}

/// Configuration injected into `FleetService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Valid bus operational states.
    pub bus_states: BusStateSet,
    /// State assigned to newly created buses.
    pub default_bus_state: String,
    /// Treatment of unknown route names on create/update.
    pub reference_policy: ReferencePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            bus_states: BusStateSet::default(),
            default_bus_state: BUS_STATE_AVAILABLE.to_string(),
            reference_policy: ReferencePolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document. Missing keys take
    /// default values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Returns a copy with a different reference policy.
    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bus_states.contains(&self.default_bus_state) {
            return Err(ConfigError::UnknownDefaultState(
                self.default_bus_state.clone(),
            ));
        }
        Ok(())
    }
}
