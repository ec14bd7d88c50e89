//! Travel mode types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an unrecognised travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised travel mode: {mode}")]
pub struct InvalidMode {
    mode: String,
}

/// A mode travelled on the street network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreetMode {
    Walk,
    Bicycle,
    Car,
    Micromobility,
}

impl StreetMode {
    /// Returns the upstream name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreetMode::Walk => "WALK",
            StreetMode::Bicycle => "BICYCLE",
            StreetMode::Car => "CAR",
            StreetMode::Micromobility => "MICROMOBILITY",
        }
    }
}

/// A scheduled public transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    Airplane,
    /// Generic transit, used when the planner does not specify further.
    Transit,
}

impl TransitMode {
    /// Returns the upstream name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Tram => "TRAM",
            TransitMode::Subway => "SUBWAY",
            TransitMode::Rail => "RAIL",
            TransitMode::Bus => "BUS",
            TransitMode::Ferry => "FERRY",
            TransitMode::CableCar => "CABLE_CAR",
            TransitMode::Gondola => "GONDOLA",
            TransitMode::Funicular => "FUNICULAR",
            TransitMode::Airplane => "AIRPLANE",
            TransitMode::Transit => "TRANSIT",
        }
    }
}

/// The mode of a leg, split by whether it runs on streets or on transit.
///
/// # Examples
///
/// ```
/// use trip_diagram::domain::{StreetMode, TransitMode, TravelMode};
///
/// assert_eq!(TravelMode::parse("WALK").unwrap(), TravelMode::Street(StreetMode::Walk));
/// assert_eq!(TravelMode::parse("BUS").unwrap(), TravelMode::Transit(TransitMode::Bus));
///
/// // Modes are matched exactly
/// assert!(TravelMode::parse("walk").is_err());
/// assert!(TravelMode::parse("HOVERCRAFT").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Street(StreetMode),
    Transit(TransitMode),
}

impl TravelMode {
    /// Parse an upstream mode string such as `"WALK"` or `"CABLE_CAR"`.
    pub fn parse(s: &str) -> Result<Self, InvalidMode> {
        let mode = match s {
            "WALK" => TravelMode::Street(StreetMode::Walk),
            "BICYCLE" => TravelMode::Street(StreetMode::Bicycle),
            "CAR" => TravelMode::Street(StreetMode::Car),
            "MICROMOBILITY" => TravelMode::Street(StreetMode::Micromobility),
            "TRAM" => TravelMode::Transit(TransitMode::Tram),
            "SUBWAY" => TravelMode::Transit(TransitMode::Subway),
            "RAIL" => TravelMode::Transit(TransitMode::Rail),
            "BUS" => TravelMode::Transit(TransitMode::Bus),
            "FERRY" => TravelMode::Transit(TransitMode::Ferry),
            "CABLE_CAR" => TravelMode::Transit(TransitMode::CableCar),
            "GONDOLA" => TravelMode::Transit(TransitMode::Gondola),
            "FUNICULAR" => TravelMode::Transit(TransitMode::Funicular),
            "AIRPLANE" => TravelMode::Transit(TransitMode::Airplane),
            "TRANSIT" => TravelMode::Transit(TransitMode::Transit),
            other => {
                return Err(InvalidMode {
                    mode: other.to_string(),
                });
            }
        };
        Ok(mode)
    }

    /// Returns the upstream name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Street(mode) => mode.as_str(),
            TravelMode::Transit(mode) => mode.as_str(),
        }
    }

    /// Returns true if this is a transit mode.
    pub fn is_transit(&self) -> bool {
        matches!(self, TravelMode::Transit(_))
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
