//! Itinerary diagrams.
//!
//! This module converts an itinerary into the places, street edges,
//! patterns, routes, stops and journey a transitive renderer draws. The
//! diagram is rebuilt from scratch for every itinerary; nothing is cached
//! between builds.

mod builder;
mod model;
mod strategy;

pub use builder::build_diagram;
pub use model::{
    BIKE_SHARE_PLACE_PREFIX, DESTINATION_PLACE_ID, Diagram, DiagramRoute, DiagramStop, JOURNEY_ID,
    Journey, ORIGIN_PLACE_ID, Pattern, PatternRef, PatternStop, Place, PlaceRef, Segment,
    StreetEdge, StreetSegment, TransitSegment,
};
pub use strategy::StopStrategy;

use crate::config::MapConfig;
use crate::otp::{ConversionError, ItineraryDto, convert_itinerary};

impl Diagram {
    /// Validate a planner itinerary and build its diagram.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the itinerary has no legs or a leg is malformed.
    pub fn from_dto(dto: &ItineraryDto, config: &MapConfig) -> Result<Self, ConversionError> {
        let itinerary = convert_itinerary(dto)?;
        Ok(build_diagram(&itinerary, config))
    }
}
