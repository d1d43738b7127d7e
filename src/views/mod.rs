//! Display-ready summaries derived from raw feed records.
//!
//! The three core transformations are pure functions over borrowed input:
//!
//! - [`headsign::resolve_directions`] picks one headsign per route direction.
//! - [`alerts::build_alert_items`] filters, orders and truncates alerts.
//! - [`status`] maps vehicle status and occupancy codes to display categories.
//!
//! [`route`] and [`vehicle`] compose them into per-query summaries.

pub mod alerts;
pub mod headsign;
pub mod route;
pub mod status;
pub mod vehicle;
