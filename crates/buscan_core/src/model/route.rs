//! Transit route model.
//!
//! A route is identified by its key in `Document::routes`; the record itself
//! only holds the ordered stop sequence.

use serde::{Deserialize, Serialize};

/// Ordered stop sequence for one route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Stops in travel order.
    #[serde(default, alias = "paradas")]
    pub stops: Vec<String>,
}

impl Route {
    pub fn new(stops: Vec<String>) -> Self {
        Self { stops }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// A route without stops can be stored but is not usable for service.
    pub fn is_active(&self) -> bool {
        !self.stops.is_empty()
    }
}
