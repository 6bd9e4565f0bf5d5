//! Bus domain model.
//!
//! # Responsibility
//! - Define the individually tracked bus record.
//!
//! # Invariants
//! - The bus number is the key in `Document::buses` and never changes;
//!   renaming a bus is delete + create.
//! - `capacity` is positive for every bus written through the service.
//! - `passengers` belongs to the telemetry collaborator; editing paths
//!   carry it over unchanged.

use serde::{Deserialize, Serialize};

use super::codec::blank_as_none;

/// One bus unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    /// Seated plus standing capacity.
    #[serde(alias = "capacidad")]
    pub capacity: u32,
    /// Operational state; a member of the configured state set.
    #[serde(alias = "estado")]
    pub state: String,
    /// Last reported passenger count.
    #[serde(default, alias = "pasajeros")]
    pub passengers: u32,
    /// Weak reference to a route by name. May dangle.
    #[serde(default, alias = "ruta", deserialize_with = "blank_as_none")]
    pub route: Option<String>,
}

impl Bus {
    /// Creates an unassigned bus with no passengers on board.
    pub fn new(capacity: u32, state: impl Into<String>) -> Self {
        Self {
            capacity,
            state: state.into(),
            passengers: 0,
            route: None,
        }
    }

    /// Assigned route name, if any.
    pub fn route_name(&self) -> Option<&str> {
        self.route.as_deref()
    }
}
