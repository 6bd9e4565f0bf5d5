//! Core domain logic for BuScanGo fleet operations.
//! This crate is the single source of truth for fleet records and the
//! consistency rules between buses, routes and fleet items.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{BusStateSet, ConfigError, CoreConfig, ReferencePolicy};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::bus::Bus;
pub use model::document::{DanglingReference, Document, EntityKind};
pub use model::fleet::FleetItem;
pub use model::route::Route;
pub use model::validation::ValidationError;
pub use service::fleet_service::{
    BusUpdate, FleetItemRequest, FleetService, RouteSummary, ServiceError, ServiceResult,
};
pub use service::stop_editor::{
    insert_stop, move_stop, normalize_stops, parse_stop_lines, remove_stop, InvalidDirection,
    MoveDirection,
};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
