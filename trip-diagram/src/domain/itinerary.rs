//! Itinerary type.
//!
//! An `Itinerary` is the ordered sequence of legs from origin to
//! destination, as chosen by the trip planner.

use super::{DomainError, Endpoint, Leg};

/// A complete itinerary from origin to destination.
///
/// # Invariants
///
/// - At least one leg
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Leg>,
}

impl Itinerary {
    /// Constructs an itinerary from its legs, in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_diagram::domain::{
    ///     DomainError, EncodedPolyline, Endpoint, Itinerary, LatLon, Leg, StreetMode,
    /// };
    ///
    /// let walk = Leg::street(
    ///     StreetMode::Walk,
    ///     Endpoint::new(Some("Home".into()), LatLon::new(45.52, -122.68)),
    ///     Endpoint::new(Some("Work".into()), LatLon::new(45.51, -122.67)),
    ///     EncodedPolyline::new("_p~iF~ps|U"),
    ///     false,
    /// );
    ///
    /// let itinerary = Itinerary::new(vec![walk]).unwrap();
    /// assert_eq!(itinerary.origin().name.as_deref(), Some("Home"));
    /// assert_eq!(itinerary.destination().name.as_deref(), Some("Work"));
    ///
    /// assert_eq!(Itinerary::new(vec![]).unwrap_err(), DomainError::EmptyItinerary);
    /// ```
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        Ok(Itinerary { legs })
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns where the itinerary starts (the first leg's `from`).
    pub fn origin(&self) -> &Endpoint {
        // Non-empty: validated at construction
        self.legs[0].from()
    }

    /// Returns where the itinerary ends (the last leg's `to`).
    pub fn destination(&self) -> &Endpoint {
        self.legs[self.legs.len() - 1].to()
    }

    /// Returns the number of transit legs.
    pub fn transit_leg_count(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_transit()).count()
    }

    /// Returns the number of street legs.
    pub fn street_leg_count(&self) -> usize {
        self.legs.len() - self.transit_leg_count()
    }
}
