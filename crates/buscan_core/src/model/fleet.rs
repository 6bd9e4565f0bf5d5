//! Fleet inventory model.
//!
//! # Invariants
//! - A fleet item groups interchangeable units; it is never linked to
//!   individual `Bus` records.
//! - `capacity` is per unit and positive; `quantity` may be zero.

use serde::{Deserialize, Serialize};

use super::codec::blank_as_none;

/// Inventory record for a group of interchangeable buses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetItem {
    /// Units available for assignment.
    #[serde(alias = "cantidad")]
    pub quantity: u32,
    /// Capacity of each unit.
    #[serde(alias = "capacidad")]
    pub capacity: u32,
    /// Weak reference to a route by name. May dangle.
    #[serde(default, alias = "ruta", deserialize_with = "blank_as_none")]
    pub route: Option<String>,
}

impl FleetItem {
    pub fn new(quantity: u32, capacity: u32, route: Option<String>) -> Self {
        Self {
            quantity,
            capacity,
            route,
        }
    }

    /// Seats offered by all units of this item together.
    pub fn total_capacity(&self) -> u64 {
        u64::from(self.quantity) * u64::from(self.capacity)
    }
}
