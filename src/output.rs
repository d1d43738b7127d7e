//! Output formatting and persistence for lookup results.
//!
//! Supports plain-text rendering, pretty JSON, and CSV append of alert lists.

use anyhow::Result;
use serde::Serialize;
use std::fmt::{Debug, Write as _};
use tracing::debug;

use crate::views::alerts::{AlertItem, AlertListSummary};
use crate::views::route::RouteSummary;
use crate::views::vehicle::VehicleSummary;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};

const NOT_AVAILABLE: &str = "N/A";

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Serializes a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_route(route: &RouteSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Route: {}", route.id);
    let _ = writeln!(out, "{}", route.long_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Start & End (by direction)");

    if route.directions.is_empty() {
        let _ = writeln!(out, "No direction headsigns found for this route.");
    }
    for direction in &route.directions {
        let _ = writeln!(out, "  Direction {}: {}", direction.direction_id, direction.headsign);
    }

    out
}

pub fn render_vehicle(vehicle: &VehicleSummary) -> String {
    fn or_na<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
    }

    let position = vehicle
        .position()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |(lat, lon)| format!("{lat:.5}, {lon:.5}"));

    let mut out = String::new();
    let _ = writeln!(out, "Vehicle: {} ({})", or_na(vehicle.label.as_deref()), vehicle.id);
    let _ = writeln!(out, "  Status:        {}", vehicle.status);
    let _ = writeln!(out, "  Occupancy:     {}", vehicle.occupancy);
    let _ = writeln!(out, "  Route:         {}", or_na(vehicle.route_id.as_deref()));
    let _ = writeln!(out, "  Trip:          {}", or_na(vehicle.trip_id.as_deref()));
    let _ = writeln!(out, "  Stop:          {}", or_na(vehicle.stop_id.as_deref()));
    let _ = writeln!(out, "  Direction:     {}", or_na(vehicle.direction_id));
    let _ = writeln!(out, "  Stop sequence: {}", or_na(vehicle.current_stop_sequence));
    let _ = writeln!(out, "  Speed:         {}", or_na(vehicle.speed));
    let _ = writeln!(out, "  Bearing:       {}", or_na(vehicle.bearing));
    let _ = writeln!(out, "  Position:      {}", position);
    let _ = writeln!(out, "  Updated:       {}", vehicle.updated);
    out
}

pub fn render_alerts(items: &[AlertItem], summary: &AlertListSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.counts_label());

    if let Some(message) = summary.empty_message() {
        let _ = writeln!(out, "{message}");
        return out;
    }

    for item in items {
        let _ = writeln!(out);
        let badges: Vec<String> = item.badges.iter().map(ToString::to_string).collect();
        if badges.is_empty() {
            let _ = writeln!(out, "[{}] {}", item.tier.as_str(), item.header);
        } else {
            let _ = writeln!(
                out,
                "[{}] {} ({})",
                item.tier.as_str(),
                item.header,
                badges.join(", ")
            );
        }
        let _ = writeln!(out, "Sent: {}", item.sent);
        let _ = writeln!(out, "{}", item.body);
        if let Some(label) = item.toggle_label() {
            let _ = writeln!(out, "({label}: --expand {})", item.id);
        }
        match &item.updated {
            Some(updated) => {
                let _ = writeln!(out, "Alert ID: {}  Updated: {}", item.id, updated);
            }
            None => {
                let _ = writeln!(out, "Alert ID: {}", item.id);
            }
        }
    }

    out
}

/// Flat CSV row for one alert item.
#[derive(Debug, Serialize)]
struct AlertRecord<'a> {
    id: &'a str,
    sent: &'a str,
    updated: Option<&'a str>,
    tier: &'static str,
    severity: Option<f64>,
    effect: Option<&'a str>,
    header: &'a str,
    has_more: bool,
    body: &'a str,
}

impl<'a> From<&'a AlertItem> for AlertRecord<'a> {
    fn from(item: &'a AlertItem) -> Self {
        use crate::views::alerts::Badge;

        let severity = item.badges.iter().find_map(|b| match b {
            Badge::Severity(s) => Some(*s),
            _ => None,
        });
        let effect = item.badges.iter().find_map(|b| match b {
            Badge::Effect(e) => Some(e.as_str()),
            _ => None,
        });

        Self {
            id: &item.id,
            sent: &item.sent,
            updated: item.updated.as_deref(),
            tier: item.tier.as_str(),
            severity,
            effect,
            header: &item.header,
            has_more: item.has_more,
            body: &item.body,
        }
    }
}

/// Appends alert items as rows to a CSV file.
///
/// Writes the header row first when the file is missing or empty. An empty
/// `items` leaves the file untouched.
pub fn append_alert_records(path: &str, items: &[AlertItem]) -> Result<()> {
    if items.is_empty() {
        debug!(path, "No alert rows to append");
        return Ok(());
    }

    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    debug!(path, needs_header, rows = items.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    for item in items {
        writer.serialize(AlertRecord::from(item))?;
    }
    writer.flush()?;

    Ok(())
}
