//! Vehicle status and occupancy classification.
//!
//! Both taxonomies are matched the same way: the raw code is upper-cased and
//! checked against an ordered rule table by substring, first match wins.
//! Several codes contain one another (`CRUSHED_STANDING_ROOM_ONLY` contains
//! `STANDING_ROOM_ONLY`), so the table order is part of the contract.

use serde::Serialize;
use std::fmt;

/// A display category with its label. For codes no rule recognizes, the label
/// is the raw code itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classified<C> {
    pub category: C,
    pub label: String,
}

impl<C> fmt::Display for Classified<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A fixed set of display categories backed by an ordered rule table.
pub trait StatusCategory: Copy + 'static {
    /// `(code substring, category)` pairs in priority order.
    const RULES: &'static [(&'static str, Self)];
    /// Used when the code is missing or blank.
    const ABSENT: Self;
    /// Used when the code is present but no rule matches.
    const UNRECOGNIZED: Self;

    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Stopped,
    Incoming,
    InTransit,
    Unknown,
    Unrecognized,
}

impl StatusCategory for VehicleStatus {
    const RULES: &'static [(&'static str, Self)] = &[
        ("STOPPED", VehicleStatus::Stopped),
        ("INCOMING", VehicleStatus::Incoming),
        ("IN_TRANSIT", VehicleStatus::InTransit),
    ];
    const ABSENT: Self = VehicleStatus::Unknown;
    const UNRECOGNIZED: Self = VehicleStatus::Unrecognized;

    fn label(self) -> &'static str {
        match self {
            VehicleStatus::Stopped => "Stopped",
            VehicleStatus::Incoming => "Incoming",
            VehicleStatus::InTransit => "In transit",
            VehicleStatus::Unknown => "Unknown status",
            VehicleStatus::Unrecognized => "Unrecognized status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Empty,
    ManySeats,
    FewSeats,
    StandingRoom,
    VeryCrowded,
    Full,
    NotAccepting,
    NoData,
    Unrecognized,
}

impl StatusCategory for Occupancy {
    const RULES: &'static [(&'static str, Self)] = &[
        ("EMPTY", Occupancy::Empty),
        ("MANY_SEATS", Occupancy::ManySeats),
        ("FEW_SEATS", Occupancy::FewSeats),
        // must precede STANDING_ROOM_ONLY
        ("CRUSHED", Occupancy::VeryCrowded),
        ("STANDING_ROOM_ONLY", Occupancy::StandingRoom),
        ("FULL", Occupancy::Full),
        ("NOT_ACCEPTING", Occupancy::NotAccepting),
    ];
    const ABSENT: Self = Occupancy::NoData;
    const UNRECOGNIZED: Self = Occupancy::Unrecognized;

    fn label(self) -> &'static str {
        match self {
            Occupancy::Empty => "Empty",
            Occupancy::ManySeats => "Many seats",
            Occupancy::FewSeats => "Few seats",
            Occupancy::StandingRoom => "Standing room",
            Occupancy::VeryCrowded => "Very crowded",
            Occupancy::Full => "Full",
            Occupancy::NotAccepting => "Not accepting",
            Occupancy::NoData => "No occupancy data",
            Occupancy::Unrecognized => "Unrecognized occupancy",
        }
    }
}

/// Classifies any raw code into exactly one category. Never fails.
pub fn classify<C: StatusCategory>(raw: Option<&str>) -> Classified<C> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Classified {
            category: C::ABSENT,
            label: C::ABSENT.label().to_string(),
        };
    }

    let code = raw.to_uppercase();
    match C::RULES.iter().find(|(needle, _)| code.contains(needle)) {
        Some(&(_, category)) => Classified {
            category,
            label: category.label().to_string(),
        },
        None => Classified {
            category: C::UNRECOGNIZED,
            label: raw.to_string(),
        },
    }
}

pub fn classify_current_status(raw: Option<&str>) -> Classified<VehicleStatus> {
    classify(raw)
}

pub fn classify_occupancy(raw: Option<&str>) -> Classified<Occupancy> {
    classify(raw)
}
