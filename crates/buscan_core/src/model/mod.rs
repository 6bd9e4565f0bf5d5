//! Fleet domain model.
//!
//! # Responsibility
//! - Define the persisted records: buses, routes and fleet items.
//! - Define the `Document` aggregate that owns every record.
//! - Provide input validation shared by all write paths.
//!
//! # Invariants
//! - Identifiers are map keys inside `Document`; uniqueness is structural.
//! - Cross-record references are route names, never structural links, and
//!   may dangle after a route deletion.

mod codec;
pub mod bus;
pub mod document;
pub mod fleet;
pub mod route;
pub mod validation;
