//! Diagram output model.
//!
//! Plain data in the shape a transitive renderer consumes. Field names are
//! serialised exactly as the renderer expects them, so a `Diagram` can be
//! handed over as JSON without further mapping.

use serde::Serialize;

use crate::domain::{EncodedPolyline, StreetMode};

/// Prefix of place ids that stand for bike-share stations.
pub const BIKE_SHARE_PLACE_PREFIX: &str = "bicycle_rent_station_";

/// Place id of the itinerary origin.
pub const ORIGIN_PLACE_ID: &str = "from";

/// Place id of the itinerary destination.
pub const DESTINATION_PLACE_ID: &str = "to";

/// Id of the single journey in a diagram.
pub const JOURNEY_ID: &str = "itin";

/// A complete diagram for one itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagram {
    pub journeys: Vec<Journey>,
    #[serde(rename = "streetEdges")]
    pub street_edges: Vec<StreetEdge>,
    pub places: Vec<Place>,
    pub patterns: Vec<Pattern>,
    pub routes: Vec<DiagramRoute>,
    pub stops: Vec<DiagramStop>,
}

impl Diagram {
    /// Returns the itinerary journey.
    pub fn journey(&self) -> Option<&Journey> {
        self.journeys.first()
    }

    /// Look up a place by id.
    pub fn place(&self, place_id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.place_id == place_id)
    }

    /// Look up a pattern by id.
    pub fn pattern(&self, pattern_id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.pattern_id == pattern_id)
    }

    /// Look up a route by id.
    pub fn route(&self, route_id: &str) -> Option<&DiagramRoute> {
        self.routes.iter().find(|r| r.route_id == route_id)
    }

    /// Look up a stop by id.
    pub fn stop(&self, stop_id: &str) -> Option<&DiagramStop> {
        self.stops.iter().find(|s| s.stop_id == stop_id)
    }
}

/// A labelled point on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    pub place_lat: f64,
    pub place_lon: f64,
}

impl Place {
    /// Returns true if this place stands for a bike-share station.
    pub fn is_bike_share_station(&self) -> bool {
        self.place_id.contains(BIKE_SHARE_PLACE_PREFIX)
    }
}

/// Street geometry travelled by one street leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetEdge {
    pub edge_id: usize,
    pub geometry: EncodedPolyline,
}

/// The stops served by one transit leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub pattern_id: String,
    pub pattern_name: String,
    pub route_id: String,
    pub stops: Vec<PatternStop>,
}

/// A stop within a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternStop {
    pub stop_id: String,
    /// Encoded geometry leading into this stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

/// A route drawn on the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramRoute {
    pub agency_id: Option<String>,
    pub route_id: String,
    pub route_short_name: String,
    pub route_long_name: String,
    pub route_type: Option<i32>,
    pub route_color: Option<String>,
}

/// A stop drawn on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramStop {
    pub stop_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_name: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

/// The single journey tying the diagram's segments together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub journey_id: String,
    pub journey_name: String,
    pub segments: Vec<Segment>,
}

/// One segment per itinerary leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Street(StreetSegment),
    Transit(TransitSegment),
}

impl Segment {
    /// Returns the `type` tag the renderer sees.
    pub fn type_name(&self) -> &'static str {
        match self {
            Segment::Street(street) => street.mode.as_str(),
            Segment::Transit(_) => "TRANSIT",
        }
    }

    /// Returns the street segment, if this is one.
    pub fn as_street(&self) -> Option<&StreetSegment> {
        match self {
            Segment::Street(street) => Some(street),
            Segment::Transit(_) => None,
        }
    }

    /// Returns the transit segment, if this is one.
    pub fn as_transit(&self) -> Option<&TransitSegment> {
        match self {
            Segment::Street(_) => None,
            Segment::Transit(transit) => Some(transit),
        }
    }
}

/// A street leg, between two places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetSegment {
    #[serde(rename = "type")]
    pub mode: StreetMode,
    #[serde(rename = "streetEdges")]
    pub street_edges: Vec<usize>,
    pub from: PlaceRef,
    pub to: PlaceRef,
    /// Draw as an arc instead of along the street edge
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub arc: bool,
}

/// Reference to a place from a street segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "PLACE")]
pub struct PlaceRef {
    pub place_id: String,
}

/// A transit leg, along one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "TRANSIT")]
pub struct TransitSegment {
    pub patterns: Vec<PatternRef>,
}

/// Reference to the travelled part of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternRef {
    pub pattern_id: String,
    pub from_stop_index: usize,
    pub to_stop_index: usize,
}
