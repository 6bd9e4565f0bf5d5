//! Persisted aggregate root.
//!
//! # Responsibility
//! - Own every bus, route and fleet record in one serializable value.
//! - Resolve weak route references through explicit lookups.
//!
//! # Invariants
//! - Missing top-level mappings decode as empty mappings.
//! - Mappings are key-ordered so the encoded file is deterministic.
//! - A dangling route reference is a valid state, reported but never
//!   rejected on read.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::bus::Bus;
use super::fleet::FleetItem;
use super::route::Route;

/// Kinds of records stored in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Bus,
    Route,
    FleetItem,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Route => "route",
            Self::FleetItem => "fleet item",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored route name whose route no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Kind of the record holding the reference.
    pub owner: EntityKind,
    /// Bus number or fleet item name.
    pub owner_id: String,
    /// The missing route name, exactly as stored.
    pub route: String,
}

/// Whole fleet dataset as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub buses: BTreeMap<String, Bus>,
    #[serde(default, alias = "rutas")]
    pub routes: BTreeMap<String, Route>,
    #[serde(default, alias = "flota")]
    pub fleet: BTreeMap<String, FleetItem>,
}

impl Document {
    /// Looks up a route by name. `None` is a normal outcome for dangling refs.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Resolves the route assigned to a bus, if both exist.
    pub fn bus_route(&self, number: &str) -> Option<&Route> {
        self.buses
            .get(number)
            .and_then(Bus::route_name)
            .and_then(|route| self.route(route))
    }

    /// Resolves the route assigned to a fleet item, if both exist.
    pub fn fleet_route(&self, name: &str) -> Option<&Route> {
        self.fleet
            .get(name)
            .and_then(|item| item.route.as_deref())
            .and_then(|route| self.route(route))
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty() && self.routes.is_empty() && self.fleet.is_empty()
    }

    /// Lists bus and fleet assignments that point at missing routes.
    ///
    /// Buses are listed before fleet items, each ordered by identifier.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let buses = self.buses.iter().filter_map(|(number, bus)| {
            bus.route
                .as_ref()
                .map(|route| (EntityKind::Bus, number, route))
        });
        let fleet = self.fleet.iter().filter_map(|(name, item)| {
            item.route
                .as_ref()
                .map(|route| (EntityKind::FleetItem, name, route))
        });

        buses
            .chain(fleet)
            .filter(|(_, _, route)| !self.routes.contains_key(route.as_str()))
            .map(|(owner, owner_id, route)| DanglingReference {
                owner,
                owner_id: owner_id.clone(),
                route: route.clone(),
            })
            .collect()
    }
}
