use serde::Serialize;

use crate::models::{Route, RoutePattern};
use crate::views::headsign::{DirectionSummary, resolve_directions};

pub const NO_ROUTE_NAME: &str = "No route name available";

/// A route with its start and end, described by direction headsign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub id: String,
    pub long_name: String,
    pub directions: Vec<DirectionSummary>,
}

impl RouteSummary {
    pub fn new(route: &Route, patterns: &[RoutePattern]) -> Self {
        let long_name = route
            .attributes
            .long_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_ROUTE_NAME);

        Self {
            id: route.id.clone(),
            long_name: long_name.to_string(),
            directions: resolve_directions(patterns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, RouteAttributes, RoutePatternAttributes};

    fn route(id: &str, long_name: Option<&str>) -> Route {
        Resource {
            id: id.to_string(),
            attributes: RouteAttributes {
                long_name: long_name.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_with_directions() {
        let patterns = vec![Resource {
            attributes: RoutePatternAttributes {
                direction_id: Some(0),
                direction_headsign: Some("Harvard".to_string()),
            },
            ..Default::default()
        }];
        let route = route("1", Some("Harvard Square - Nubian Station"));
        let summary = RouteSummary::new(&route, &patterns);
        assert_eq!(summary.id, "1");
        assert_eq!(summary.long_name, "Harvard Square - Nubian Station");
        assert_eq!(summary.directions.len(), 1);
        assert_eq!(summary.directions[0].headsign, "Harvard");
    }

    #[test]
    fn test_missing_long_name() {
        assert_eq!(RouteSummary::new(&route("SL4", None), &[]).long_name, NO_ROUTE_NAME);
        assert_eq!(RouteSummary::new(&route("SL4", Some("")), &[]).long_name, NO_ROUTE_NAME);
    }
}
