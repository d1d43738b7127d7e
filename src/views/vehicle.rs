use serde::Serialize;

use crate::models::Vehicle;
use crate::time::display_timestamp;
use crate::views::status::{
    Classified, Occupancy, VehicleStatus, classify_current_status, classify_occupancy,
};

/// Everything shown for a single vehicle lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    pub id: String,
    pub label: Option<String>,
    pub status: Classified<VehicleStatus>,
    pub occupancy: Classified<Occupancy>,
    pub direction_id: Option<u8>,
    pub current_stop_sequence: Option<u32>,
    pub speed: Option<f64>,
    pub bearing: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated: String,
    pub route_id: Option<String>,
    pub trip_id: Option<String>,
    pub stop_id: Option<String>,
}

impl VehicleSummary {
    pub fn from_resource(vehicle: &Vehicle) -> Self {
        let attrs = &vehicle.attributes;
        let related = |name: &str| vehicle.related_id(name).map(str::to_string);

        Self {
            id: vehicle.id.clone(),
            label: attrs.label.clone().filter(|l| !l.is_empty()),
            status: classify_current_status(attrs.current_status.as_deref()),
            occupancy: classify_occupancy(attrs.occupancy_status.as_deref()),
            direction_id: attrs.direction_id,
            current_stop_sequence: attrs.current_stop_sequence,
            speed: attrs.speed,
            bearing: attrs.bearing,
            latitude: attrs.latitude,
            longitude: attrs.longitude,
            updated: display_timestamp(attrs.updated_at.as_deref()),
            route_id: related("route"),
            trip_id: related("trip"),
            stop_id: related("stop"),
        }
    }

    /// `latitude, longitude`, when both are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
