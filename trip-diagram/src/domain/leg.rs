//! Itinerary leg types.
//!
//! A `Leg` is one continuous single-mode part of an itinerary. The mode
//! decides which fields are meaningful, so legs carry a `LegKind` variant
//! rather than a bag of optional transit fields.

use serde::{Deserialize, Serialize};

use super::{DomainError, StreetMode, TransitMode, TravelMode};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// An encoded polyline (precision 5) as sent by the trip planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPolyline {
    /// The encoded point string
    pub points: String,

    /// Number of points, when the planner reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl EncodedPolyline {
    /// Creates a polyline with no reported length.
    pub fn new(points: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            length: None,
        }
    }
}

/// One end of a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Display name, if the planner gave one
    pub name: Option<String>,
    /// Where the endpoint is
    pub position: LatLon,
    /// Transit stop at this endpoint
    pub stop_id: Option<String>,
    /// Bike-share station at this endpoint
    pub bike_share_id: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint that is neither a stop nor a bike-share station.
    pub fn new(name: Option<String>, position: LatLon) -> Self {
        Self {
            name,
            position,
            stop_id: None,
            bike_share_id: None,
        }
    }
}

/// A transit stop visited by a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRef {
    pub stop_id: String,
    pub name: Option<String>,
    pub position: LatLon,
}

impl StopRef {
    /// Builds the stop for a transit endpoint.
    ///
    /// `role` names the endpoint in the error when it has no stop id.
    fn from_endpoint(endpoint: &Endpoint, role: &'static str) -> Result<Self, DomainError> {
        let stop_id = endpoint
            .stop_id
            .clone()
            .ok_or(DomainError::MissingStopId(role))?;
        Ok(Self {
            stop_id,
            name: endpoint.name.clone(),
            position: endpoint.position,
        })
    }
}

/// The route a transit leg runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_id: String,
    pub agency_id: Option<String>,
    /// Empty when the planner gave none
    pub short_name: String,
    /// Empty when the planner gave none
    pub long_name: String,
    pub route_type: Option<i32>,
    pub color: Option<String>,
}

/// Street-network specifics of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetLeg {
    pub mode: StreetMode,
    /// True for ride-hail car legs
    pub hailed_car: bool,
}

impl StreetLeg {
    /// Returns true if this leg should be drawn as an arc rather than along streets.
    pub fn is_hailed_car(&self) -> bool {
        self.mode == StreetMode::Car && self.hailed_car
    }
}

/// Transit specifics of a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitLeg {
    pub mode: TransitMode,
    pub route: Route,
    /// Stop where the leg is boarded
    pub board: StopRef,
    /// Stop where the leg is alighted
    pub alight: StopRef,
    /// Stops passed between boarding and alighting, in order
    pub intermediate_stops: Vec<StopRef>,
    /// Per-segment geometry between consecutive stops, possibly empty
    pub inter_stop_geometry: Vec<EncodedPolyline>,
}

impl TransitLeg {
    /// Returns true if there is exactly one geometry segment per stop gap.
    ///
    /// Any other count means the segments cannot be matched to stops and
    /// none of them should be used.
    pub fn has_inter_stop_geometry(&self) -> bool {
        self.inter_stop_geometry.len() == self.intermediate_stops.len() + 1
    }

    /// Returns the geometry leading into the `i`th intermediate stop.
    pub fn geometry_into_intermediate(&self, i: usize) -> Option<&EncodedPolyline> {
        if self.has_inter_stop_geometry() {
            self.inter_stop_geometry.get(i)
        } else {
            None
        }
    }

    /// Returns the geometry leading into the alighting stop.
    pub fn geometry_into_alight(&self) -> Option<&EncodedPolyline> {
        if self.has_inter_stop_geometry() {
            self.inter_stop_geometry.last()
        } else {
            None
        }
    }
}

/// What kind of travel a leg is.
#[derive(Debug, Clone, PartialEq)]
pub enum LegKind {
    Street(StreetLeg),
    Transit(TransitLeg),
}

/// A leg of an itinerary.
///
/// # Invariants
///
/// - Transit legs board and alight at stops with identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    from: Endpoint,
    to: Endpoint,
    geometry: EncodedPolyline,
    kind: LegKind,
}

impl Leg {
    /// Construct a street leg.
    pub fn street(
        mode: StreetMode,
        from: Endpoint,
        to: Endpoint,
        geometry: EncodedPolyline,
        hailed_car: bool,
    ) -> Self {
        Leg {
            from,
            to,
            geometry,
            kind: LegKind::Street(StreetLeg { mode, hailed_car }),
        }
    }

    /// Construct a transit leg, taking the boarding and alighting stops
    /// from the endpoints.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either endpoint has no stop id.
    pub fn transit(
        mode: TransitMode,
        from: Endpoint,
        to: Endpoint,
        geometry: EncodedPolyline,
        route: Route,
        intermediate_stops: Vec<StopRef>,
        inter_stop_geometry: Vec<EncodedPolyline>,
    ) -> Result<Self, DomainError> {
        let board = StopRef::from_endpoint(&from, "from")?;
        let alight = StopRef::from_endpoint(&to, "to")?;

        Ok(Leg {
            from,
            to,
            geometry,
            kind: LegKind::Transit(TransitLeg {
                mode,
                route,
                board,
                alight,
                intermediate_stops,
                inter_stop_geometry,
            }),
        })
    }

    /// Returns where the leg starts.
    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    /// Returns where the leg ends.
    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    /// Returns the full leg geometry.
    pub fn geometry(&self) -> &EncodedPolyline {
        &self.geometry
    }

    /// Returns the street or transit specifics.
    pub fn kind(&self) -> &LegKind {
        &self.kind
    }

    /// Returns the travel mode.
    pub fn mode(&self) -> TravelMode {
        match &self.kind {
            LegKind::Street(street) => TravelMode::Street(street.mode),
            LegKind::Transit(transit) => TravelMode::Transit(transit.mode),
        }
    }

    /// Returns true if this is a transit leg.
    pub fn is_transit(&self) -> bool {
        matches!(self.kind, LegKind::Transit(_))
    }
}
