//! Fleet consistency service.
//!
//! # Responsibility
//! - Provide create/update/delete entry points for buses, routes and fleet
//!   items.
//! - Enforce identifier uniqueness and input validation before any write.
//! - Apply the configured policy to route references.
//!
//! # Invariants
//! - The injected configuration has passed `CoreConfig::validate`, so new
//!   buses always start in a configured state.
//! - Each mutating call performs exactly one `load` and at most one `save`.
//! - A failed call never saves; the persisted document is unchanged.
//! - Deleting a route never rewrites bus or fleet records; their route
//!   names may dangle afterwards.
//! - Bus passenger counts are carried over untouched by every edit.
//! - No locking: interleaved callers are last-writer-wins.

use crate::config::{ConfigError, CoreConfig, ReferencePolicy};
use crate::model::bus::Bus;
use crate::model::document::{DanglingReference, Document, EntityKind};
use crate::model::fleet::FleetItem;
use crate::model::route::Route;
use crate::model::validation::{
    non_negative_u32, normalize_route_ref, positive_u32, require_identifier, ValidationError,
};
use crate::service::stop_editor::normalize_stops;
use crate::store::{DocumentStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from fleet service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input is invalid; re-prompt and retry.
    Validation(ValidationError),
    /// Target record does not exist; caller view is stale.
    NotFound { entity: EntityKind, id: String },
    /// Persistence failure, propagated unchanged.
    Store(StoreError),
}

impl ServiceError {
    fn not_found(entity: EntityKind, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_storage_corrupt(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_corrupt())
    }

    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_write_failure())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Partial bus edit. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusUpdate {
    pub capacity: Option<i64>,
    pub state: Option<String>,
    /// `Some(None)` clears the assignment; `Some(Some(name))` reassigns.
    pub route: Option<Option<String>>,
}

/// Create-or-update request for one fleet item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetItemRequest {
    /// Name the item is stored under after the call.
    pub name: String,
    pub quantity: i64,
    pub capacity: i64,
    pub route: Option<String>,
    /// Name the item was stored under before, when editing.
    pub previous_name: Option<String>,
}

/// Read-only route listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub name: String,
    pub stop_count: usize,
    /// `false` for zero-stop routes.
    pub is_active: bool,
}

/// Fleet use-case service over an injected document store.
pub struct FleetService<S: DocumentStore> {
    store: S,
    config: CoreConfig,
}

impl<S: DocumentStore> FleetService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: CoreConfig::default(),
        }
    }

    /// Creates a service with explicit configuration.
    ///
    /// # Errors
    /// - Any `CoreConfig::validate` failure, such as a default bus state
    ///   outside the configured state set.
    pub fn with_config(store: S, config: CoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a bus in the configured default state.
    ///
    /// # Errors
    /// - `Validation` when `number` is blank or taken, or `capacity <= 0`.
    /// - `Validation` for an unknown route under the strict policy.
    pub fn create_bus(
        &self,
        number: &str,
        capacity: i64,
        route: Option<&str>,
    ) -> ServiceResult<Bus> {
        let number = require_identifier("number", number)?;
        let capacity = positive_u32("capacity", capacity)?;
        let route = normalize_route_ref(route);

        let mut document = self.store.load()?;
        if document.buses.contains_key(&number) {
            return Err(ValidationError::Duplicate {
                field: "number",
                value: number,
            }
            .into());
        }
        self.check_route_reference(&document, route.as_deref())?;

        let mut bus = Bus::new(capacity, self.config.default_bus_state.as_str());
        bus.route = route;
        document.buses.insert(number.clone(), bus.clone());
        self.store.save(&document)?;

        info!(
            "event=bus_create module=service status=ok number={} route={}",
            number,
            bus.route_name().unwrap_or("-")
        );
        Ok(bus)
    }

    /// Updates capacity, state and/or route assignment of an existing bus.
    ///
    /// Passenger count is never modified.
    pub fn update_bus(&self, number: &str, update: &BusUpdate) -> ServiceResult<Bus> {
        let capacity = update
            .capacity
            .map(|value| positive_u32("capacity", value))
            .transpose()?;
        let state = update
            .state
            .as_deref()
            .map(|value| self.config.bus_states.parse(value))
            .transpose()?;
        let route = update
            .route
            .as_ref()
            .map(|value| normalize_route_ref(value.as_deref()));

        let number = number.trim();
        let mut document = self.store.load()?;
        let stored_route = document
            .buses
            .get(number)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Bus, number))?
            .route_name();
        if let Some(Some(route)) = &route {
            if stored_route != Some(route.as_str()) {
                self.check_route_reference(&document, Some(route.as_str()))?;
            }
        }

        let bus = document
            .buses
            .get_mut(number)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Bus, number))?;
        if let Some(capacity) = capacity {
            bus.capacity = capacity;
        }
        if let Some(state) = state {
            bus.state = state;
        }
        if let Some(route) = route {
            bus.route = route;
        }
        let updated = bus.clone();
        self.store.save(&document)?;

        info!(
            "event=bus_update module=service status=ok number={} state={} route={}",
            number,
            updated.state,
            updated.route_name().unwrap_or("-")
        );
        Ok(updated)
    }

    /// Removes a bus. Returns `false` (and writes nothing) when absent.
    pub fn delete_bus(&self, number: &str) -> ServiceResult<bool> {
        let number = number.trim();
        let mut document = self.store.load()?;
        if document.buses.remove(number).is_none() {
            info!("event=bus_delete module=service status=noop number={number}");
            return Ok(false);
        }
        self.store.save(&document)?;
        info!("event=bus_delete module=service status=ok number={number}");
        Ok(true)
    }

    /// Creates a route. Stops are normalized; an empty list is accepted here
    /// and the route is reported inactive until stops are added.
    pub fn create_route(&self, name: &str, stops: Vec<String>) -> ServiceResult<Route> {
        let name = require_identifier("name", name)?;
        let route = Route::new(normalize_stops(stops));

        let mut document = self.store.load()?;
        if document.routes.contains_key(&name) {
            return Err(ValidationError::Duplicate {
                field: "name",
                value: name,
            }
            .into());
        }
        document.routes.insert(name.clone(), route.clone());
        self.store.save(&document)?;

        if route.is_active() {
            info!(
                "event=route_create module=service status=ok name={} stops={}",
                name,
                route.stop_count()
            );
        } else {
            warn!("event=route_create module=service status=ok name={name} stops=0 active=false");
        }
        Ok(route)
    }

    /// Replaces a route's stops and optionally renames it in the same write.
    ///
    /// # Errors
    /// - `NotFound` when `old_name` is absent.
    /// - `Validation` when `new_name` is blank or taken by another route, or
    ///   when no stops remain after normalization.
    pub fn rename_or_update_route(
        &self,
        old_name: &str,
        new_name: &str,
        stops: Vec<String>,
    ) -> ServiceResult<Route> {
        let new_name = require_identifier("name", new_name)?;
        let route = Route::new(normalize_stops(stops));
        if !route.is_active() {
            return Err(ValidationError::NoStops { route: new_name }.into());
        }

        let old_name = old_name.trim();
        let mut document = self.store.load()?;
        if !document.routes.contains_key(old_name) {
            return Err(ServiceError::not_found(EntityKind::Route, old_name));
        }
        let renamed = new_name != old_name;
        if renamed && document.routes.contains_key(&new_name) {
            return Err(ValidationError::Duplicate {
                field: "name",
                value: new_name,
            }
            .into());
        }

        document.routes.remove(old_name);
        document.routes.insert(new_name.clone(), route.clone());
        self.store.save(&document)?;

        if renamed {
            info!(
                "event=route_rename module=service status=ok from={} to={} stops={}",
                old_name,
                new_name,
                route.stop_count()
            );
        } else {
            info!(
                "event=route_update module=service status=ok name={} stops={}",
                new_name,
                route.stop_count()
            );
        }
        Ok(route)
    }

    /// Replaces the stop sequence of an existing route without renaming it.
    pub fn update_route_stops(&self, name: &str, stops: Vec<String>) -> ServiceResult<Route> {
        let name = name.trim();
        let stops = normalize_stops(stops);
        if stops.is_empty() {
            return Err(ValidationError::NoStops {
                route: name.to_string(),
            }
            .into());
        }

        let mut document = self.store.load()?;
        let route = document
            .routes
            .get_mut(name)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Route, name))?;
        route.stops = stops;
        let updated = route.clone();
        self.store.save(&document)?;

        info!(
            "event=route_stops_update module=service status=ok name={} stops={}",
            name,
            updated.stop_count()
        );
        Ok(updated)
    }

    /// Removes a route only. Bus and fleet references to it are left as-is.
    /// Returns `false` (and writes nothing) when absent.
    pub fn delete_route(&self, name: &str) -> ServiceResult<bool> {
        let name = name.trim();
        let mut document = self.store.load()?;
        if document.routes.remove(name).is_none() {
            info!("event=route_delete module=service status=noop name={name}");
            return Ok(false);
        }
        self.store.save(&document)?;

        let orphaned = document
            .dangling_references()
            .iter()
            .filter(|reference| reference.route == name)
            .count();
        info!("event=route_delete module=service status=ok name={name} orphaned_refs={orphaned}");
        Ok(true)
    }

    /// Creates or updates a fleet item, renaming it when `previous_name`
    /// differs from `name`.
    ///
    /// # Errors
    /// - `Validation` when the name is blank, `quantity < 0`, `capacity <= 0`,
    ///   or a rename targets another existing item.
    /// - `Validation` for an unknown route under the strict policy, unless the
    ///   item already carries that route.
    pub fn save_fleet_item(&self, request: &FleetItemRequest) -> ServiceResult<FleetItem> {
        let name = require_identifier("name", &request.name)?;
        let quantity = non_negative_u32("quantity", request.quantity)?;
        let capacity = positive_u32("capacity", request.capacity)?;
        let route = normalize_route_ref(request.route.as_deref());
        let previous_name = request
            .previous_name
            .as_deref()
            .map(str::trim)
            .filter(|previous| !previous.is_empty() && *previous != name);

        let mut document = self.store.load()?;
        if previous_name.is_some() && document.fleet.contains_key(&name) {
            return Err(ValidationError::Duplicate {
                field: "name",
                value: name,
            }
            .into());
        }
        let stored_route = document
            .fleet
            .get(previous_name.unwrap_or(name.as_str()))
            .and_then(|existing| existing.route.as_deref());
        if route.as_deref() != stored_route {
            self.check_route_reference(&document, route.as_deref())?;
        }

        let item = FleetItem::new(quantity, capacity, route);
        document.fleet.insert(name.clone(), item.clone());
        if let Some(previous) = previous_name {
            document.fleet.remove(previous);
            info!("event=fleet_rename module=service status=ok from={previous} to={name}");
        }
        self.store.save(&document)?;

        info!(
            "event=fleet_save module=service status=ok name={} quantity={} capacity={}",
            name, item.quantity, item.capacity
        );
        Ok(item)
    }

    /// Removes a fleet item. Returns `false` (and writes nothing) when absent.
    pub fn delete_fleet_item(&self, name: &str) -> ServiceResult<bool> {
        let name = name.trim();
        let mut document = self.store.load()?;
        if document.fleet.remove(name).is_none() {
            info!("event=fleet_delete module=service status=noop name={name}");
            return Ok(false);
        }
        self.store.save(&document)?;
        info!("event=fleet_delete module=service status=ok name={name}");
        Ok(true)
    }

    /// Loads a fresh snapshot of the whole document.
    pub fn load_document(&self) -> ServiceResult<Document> {
        self.store.load().map_err(Into::into)
    }

    /// Lists buses ordered by number.
    pub fn list_buses(&self) -> ServiceResult<Vec<(String, Bus)>> {
        Ok(self.store.load()?.buses.into_iter().collect())
    }

    pub fn get_bus(&self, number: &str) -> ServiceResult<Option<Bus>> {
        Ok(self.store.load()?.buses.remove(number.trim()))
    }

    /// Lists routes ordered by name.
    pub fn list_routes(&self) -> ServiceResult<Vec<(String, Route)>> {
        Ok(self.store.load()?.routes.into_iter().collect())
    }

    pub fn get_route(&self, name: &str) -> ServiceResult<Option<Route>> {
        Ok(self.store.load()?.routes.remove(name.trim()))
    }

    /// Ordered stops of one route for read-only consumers such as map views.
    pub fn route_stops(&self, name: &str) -> ServiceResult<Option<Vec<String>>> {
        Ok(self.get_route(name)?.map(|route| route.stops))
    }

    /// Route listing with zero-stop routes flagged inactive.
    pub fn route_summaries(&self) -> ServiceResult<Vec<RouteSummary>> {
        Ok(self
            .store
            .load()?
            .routes
            .into_iter()
            .map(|(name, route)| RouteSummary {
                stop_count: route.stop_count(),
                is_active: route.is_active(),
                name,
            })
            .collect())
    }

    /// Lists fleet items ordered by name.
    pub fn list_fleet(&self) -> ServiceResult<Vec<(String, FleetItem)>> {
        Ok(self.store.load()?.fleet.into_iter().collect())
    }

    pub fn get_fleet_item(&self, name: &str) -> ServiceResult<Option<FleetItem>> {
        Ok(self.store.load()?.fleet.remove(name.trim()))
    }

    /// Reports assignments whose route no longer exists.
    pub fn dangling_references(&self) -> ServiceResult<Vec<DanglingReference>> {
        Ok(self.store.load()?.dangling_references())
    }

    fn check_route_reference(
        &self,
        document: &Document,
        route: Option<&str>,
    ) -> Result<(), ValidationError> {
        let Some(route) = route else {
            return Ok(());
        };
        if document.route(route).is_some() {
            return Ok(());
        }
        match self.config.reference_policy {
            ReferencePolicy::Permissive => {
                warn!("event=route_reference module=service status=dangling route={route}");
                Ok(())
            }
            ReferencePolicy::Strict => Err(ValidationError::UnknownRoute {
                field: "route",
                value: route.to_string(),
            }),
        }
    }
}
