//! Trip-planner response DTOs.
//!
//! These types map directly to the planner's JSON `plan` response. They
//! use `Option` liberally because the planner omits absent fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EncodedPolyline;

/// Response from a plan request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// The plan, absent when planning failed.
    pub plan: Option<Plan>,

    /// Planner error, when no plan could be produced.
    pub error: Option<PlanError>,
}

/// Error reported by the planner in place of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanError {
    /// Numeric error id.
    pub id: Option<i32>,

    /// Human-readable message.
    pub msg: Option<String>,
}

/// A set of itineraries answering one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Requested date (epoch milliseconds).
    pub date: Option<i64>,

    /// Query origin.
    pub from: Option<PlaceDto>,

    /// Query destination.
    pub to: Option<PlaceDto>,

    /// Candidate itineraries, best first as ranked by the planner.
    #[serde(default)]
    pub itineraries: Vec<ItineraryDto>,
}

/// One itinerary option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    /// Total duration in seconds.
    #[serde(default)]
    pub duration: i64,

    /// Departure (epoch milliseconds).
    pub start_time: Option<i64>,

    /// Arrival (epoch milliseconds).
    pub end_time: Option<i64>,

    /// Seconds spent walking.
    pub walk_time: Option<i64>,

    /// Seconds spent on transit vehicles.
    pub transit_time: Option<i64>,

    /// Seconds spent waiting.
    pub waiting_time: Option<i64>,

    /// Number of transfers.
    pub transfers: Option<u32>,

    /// Legs in travel order.
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

impl ItineraryDto {
    /// Returns the departure instant, if known.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Returns the arrival instant, if known.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end_time.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Returns true if any leg is operated by the named agency.
    pub fn uses_agency(&self, agency_name: &str) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.agency_name.as_deref() == Some(agency_name))
    }

    /// Returns the route of every leg that has one, in leg order.
    pub fn routes(&self) -> Vec<String> {
        self.legs
            .iter()
            .filter_map(|leg| leg.route.as_ref())
            .filter(|route| !route.is_empty())
            .cloned()
            .collect()
    }
}

/// One leg of an itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Mode name, e.g. "WALK" or "BUS".
    pub mode: String,

    /// Where the leg starts.
    pub from: Option<PlaceDto>,

    /// Where the leg ends.
    pub to: Option<PlaceDto>,

    /// Full leg geometry.
    pub leg_geometry: Option<EncodedPolyline>,

    /// True for ride-hail car legs.
    #[serde(default)]
    pub hailed_car: bool,

    /// Leg duration in seconds.
    pub duration: Option<f64>,

    /// Route label shown to riders (usually the short name).
    pub route: Option<String>,

    /// Route identifier.
    pub route_id: Option<String>,

    /// Agency identifier.
    pub agency_id: Option<String>,

    /// Agency display name.
    pub agency_name: Option<String>,

    /// Route short name, e.g. "20".
    pub route_short_name: Option<String>,

    /// Route long name, e.g. "Burnside/Stark".
    pub route_long_name: Option<String>,

    /// GTFS route type.
    pub route_type: Option<i32>,

    /// Route colour as a hex string without '#'.
    pub route_color: Option<String>,

    /// Stops passed between boarding and alighting.
    pub intermediate_stops: Option<Vec<PlaceDto>>,

    /// Geometry between consecutive stops.
    pub inter_stop_geometry: Option<Vec<EncodedPolyline>>,
}

/// A place referenced by a leg or plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    /// Display name.
    pub name: Option<String>,

    /// Latitude.
    pub lat: Option<f64>,

    /// Longitude.
    pub lon: Option<f64>,

    /// Transit stop id, for stop places.
    pub stop_id: Option<String>,

    /// Bike-share station id, for rental places.
    pub bike_share_id: Option<String>,
}
