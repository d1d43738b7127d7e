use transit_lookup::models::{Alert, Document, ListDocument, Route, RoutePattern, Vehicle};
use transit_lookup::output::{render_alerts, render_route, render_vehicle};
use transit_lookup::views::alerts::{
    AlertListSummary, ExpandedAlerts, MAX_BODY_CHARS, SeverityTier, build_alert_items,
};
use transit_lookup::views::headsign::{DirectionSummary, resolve_directions};
use transit_lookup::views::route::RouteSummary;
use transit_lookup::views::status::{Occupancy, VehicleStatus};
use transit_lookup::views::vehicle::VehicleSummary;

fn load_alerts() -> Vec<Alert> {
    let bytes = include_bytes!("fixtures/alerts.json");
    serde_json::from_slice::<ListDocument<Alert>>(bytes)
        .expect("Failed to parse alerts fixture")
        .into_list()
}

fn load_patterns() -> Vec<RoutePattern> {
    let bytes = include_bytes!("fixtures/route_patterns_red.json");
    serde_json::from_slice::<ListDocument<RoutePattern>>(bytes)
        .expect("Failed to parse route patterns fixture")
        .into_list()
}

#[test]
fn test_route_pipeline() {
    let bytes = include_bytes!("fixtures/route_red.json");
    let route: Route = serde_json::from_slice::<Document<Route>>(bytes)
        .expect("Failed to parse route fixture")
        .into_data()
        .expect("route fixture has data");
    let patterns = load_patterns();

    let summary = RouteSummary::new(&route, &patterns);

    assert_eq!(summary.long_name, "Red Line");
    assert_eq!(
        summary.directions,
        vec![
            DirectionSummary {
                direction_id: 0,
                headsign: "Braintree".to_string(),
            },
            DirectionSummary {
                direction_id: 1,
                headsign: "Alewife".to_string(),
            },
        ]
    );

    let text = render_route(&summary);
    assert!(text.contains("Direction 0: Braintree"));
    assert!(text.contains("Direction 1: Alewife"));
}

#[test]
fn test_headsigns_ignore_input_order_except_ties() {
    let mut patterns = load_patterns();
    patterns.reverse();
    let directions = resolve_directions(&patterns);
    assert_eq!(directions[0].headsign, "Braintree");
    assert_eq!(directions[1].headsign, "Alewife");
}

#[test]
fn test_alert_pipeline() {
    let alerts = load_alerts();
    assert_eq!(alerts.len(), 4);

    let items = build_alert_items(&alerts, "", &ExpandedAlerts::new());
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["500002", "500003", "500001", "500004"]);

    let shuttle = &items[0];
    assert_eq!(shuttle.tier, SeverityTier::High);
    assert!(shuttle.has_more);
    assert!(shuttle.body.chars().count() <= MAX_BODY_CHARS + 1);

    // a string severity decodes as absent
    assert_eq!(items[1].tier, SeverityTier::Default);

    let detour = &items[2];
    assert_eq!(detour.body, "No description provided.");
    assert_eq!(detour.tier, SeverityTier::Low);

    let untitled = &items[3];
    assert_eq!(untitled.header, "Service Alert");
    assert_eq!(untitled.sent, "Unknown time");
    assert_eq!(untitled.tier, SeverityTier::Medium);
}

#[test]
fn test_alert_search_and_expand() {
    let alerts = load_alerts();
    let expanded: ExpandedAlerts = ["500002"].into_iter().collect();

    let items = build_alert_items(&alerts, "QUINCY", &expanded);
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].body,
        alerts[1].attributes.description.clone().unwrap()
    );
    assert_eq!(items[0].toggle_label(), Some("Show less"));

    let summary = AlertListSummary::new(items.len(), alerts.len(), "QUINCY");
    let text = render_alerts(&items, &summary);
    assert!(text.starts_with("Showing 1 of 4\n"));
    assert!(text.contains("[high] Red Line: Shuttle buses"));
}

#[test]
fn test_vehicle_pipeline() {
    let bytes = include_bytes!("fixtures/vehicle.json");
    let vehicle: Vehicle = serde_json::from_slice::<Document<Vehicle>>(bytes)
        .expect("Failed to parse vehicle fixture")
        .into_data()
        .expect("vehicle fixture has data");

    let summary = VehicleSummary::from_resource(&vehicle);
    assert_eq!(summary.status.category, VehicleStatus::Stopped);
    assert_eq!(summary.occupancy.category, Occupancy::VeryCrowded);
    assert_eq!(summary.occupancy.label, "Very crowded");
    assert_eq!(summary.speed, None);

    let text = render_vehicle(&summary);
    assert!(text.contains("Vehicle: 1899 (y1899)"));
    assert!(text.contains("Speed:         N/A"));
    assert!(text.contains("Bearing:       270"));
    assert!(text.contains("Position:      42.37000, -71.11000"));
}
