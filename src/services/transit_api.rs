//! Trait for the transit data source behind each lookup.

use transit_lookup::error::LookupError;
use transit_lookup::models::{Alert, Route, RoutePattern, Vehicle};

/// Abstraction over a transit JSON:API provider (e.g., the MBTA v3 API).
///
/// Single-record lookups return [`LookupError::NotFound`] when the payload
/// has no `data`; list lookups return an empty list instead.
#[async_trait::async_trait]
pub trait TransitApi: Send + Sync {
    async fn get_route(&self, id: &str) -> Result<Route, LookupError>;

    /// Patterns served by one route, feeding the headsign resolver.
    async fn list_route_patterns(&self, route_id: &str) -> Result<Vec<RoutePattern>, LookupError>;

    async fn get_vehicle(&self, id: &str) -> Result<Vehicle, LookupError>;

    /// Alerts affecting boarding, exiting, or riding.
    async fn list_alerts(&self) -> Result<Vec<Alert>, LookupError>;
}
