//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate load/validate/mutate/save cycles over a `DocumentStore`.
//! - Provide stop-sequence editing independent of any presentation widget.
//!
//! # Invariants
//! - Every mutating call reloads the document; no state is cached between
//!   calls.

pub mod fleet_service;
pub mod stop_editor;
