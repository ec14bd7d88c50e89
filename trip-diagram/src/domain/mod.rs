//! Domain types for itineraries.
//!
//! This module contains the validated itinerary model. Upstream responses
//! are converted into these types once (see `otp`), so code that receives
//! an `Itinerary` can trust that every leg has endpoints, a geometry and,
//! for transit legs, stop identifiers.

mod error;
mod itinerary;
mod leg;
mod mode;

pub use error::DomainError;
pub use itinerary::Itinerary;
pub use leg::{EncodedPolyline, Endpoint, LatLon, Leg, LegKind, Route, StopRef, StreetLeg, TransitLeg};
pub use mode::{InvalidMode, StreetMode, TransitMode, TravelMode};
