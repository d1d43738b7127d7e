//! Wire types for the transit JSON:API feed.
//!
//! A single-record response is a [`Document`] whose `data` holds one
//! [`Resource`]; a collection response is a [`ListDocument`]. Attribute
//! structs decode every field leniently so a single odd value never discards
//! the record it belongs to, and a collection entry that is not a resource at
//! all is skipped.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::serde_helpers::{lenient, or_default, skip_invalid};

/// Top-level `{ data, errors }` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "or_default")]
    pub errors: Vec<ErrorObject>,
}

impl<T> Document<T> {
    /// Unwraps `data`, treating an absent payload as "no result".
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// `{ data: [...], errors }` envelope for collections.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: DeserializeOwned"))]
pub struct ListDocument<A> {
    #[serde(default, deserialize_with = "skip_invalid")]
    pub data: Vec<A>,
    #[serde(default, deserialize_with = "or_default")]
    pub errors: Vec<ErrorObject>,
}

impl<A> ListDocument<A> {
    /// Unwraps the collection. An absent or non-array payload is empty.
    pub fn into_list(self) -> Vec<A> {
        self.data
    }
}

/// One entry of a JSON:API `errors` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub detail: Option<String>,
}

/// A JSON:API resource object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "A: DeserializeOwned + Default"))]
pub struct Resource<A> {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "or_default")]
    pub attributes: A,
    #[serde(default, deserialize_with = "or_default")]
    pub relationships: HashMap<String, Relationship>,
}

impl<A> Resource<A> {
    /// Returns the id of a to-one relationship such as `route` or `stop`.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .get(name)
            .and_then(|r| r.data.as_ref())
            .map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<ResourceRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub long_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePatternAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub direction_id: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction_headsign: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub header: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Numeric severity score, 0 to 10 on the MBTA feed.
    #[serde(default, deserialize_with = "lenient")]
    pub severity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub effect: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub occupancy_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction_id: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_stop_sequence: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bearing: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,
}

pub type Route = Resource<RouteAttributes>;
pub type RoutePattern = Resource<RoutePatternAttributes>;
pub type Alert = Resource<AlertAttributes>;
pub type Vehicle = Resource<VehicleAttributes>;
