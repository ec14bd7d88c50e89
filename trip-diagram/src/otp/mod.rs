//! Trip-planner response types.
//!
//! This module provides the serde mapping of the trip planner's `plan`
//! response and the conversion of its itineraries into domain types.
//!
//! Key characteristics of the upstream data:
//! - Fields are omitted rather than sent as null, so most are optional
//! - Durations are in seconds, timestamps in epoch milliseconds
//! - Geometry is an encoded polyline of precision 5

mod convert;
mod types;

pub use convert::{ConversionError, convert_itinerary, convert_leg};
pub use types::{ItineraryDto, LegDto, Plan, PlanError, PlanResponse, PlaceDto};
