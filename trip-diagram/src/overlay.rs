//! The diagram drawn over the map for the active search.

use tracing::debug;

use crate::diagram::Diagram;
use crate::otp::ConversionError;
use crate::state::{OtpState, RoutingType, active_itinerary, active_search};

/// Build the diagram of the active search's selected itinerary.
///
/// Only itinerary searches with a realtime plan are drawn. Returns
/// `Ok(None)` when there is nothing to draw.
///
/// # Errors
///
/// Returns `Err` if the selected itinerary is malformed.
pub fn active_diagram(state: &OtpState) -> Result<Option<Diagram>, ConversionError> {
    let Some(search) = active_search(state) else {
        return Ok(None);
    };
    if search.query.routing_type != RoutingType::Itinerary {
        return Ok(None);
    }
    if search.response.as_ref().is_none_or(|r| r.plan.is_none()) {
        return Ok(None);
    }
    let Some(itinerary) = active_itinerary(state) else {
        debug!(
            index = search.active_itinerary,
            "No itinerary selected, nothing to draw"
        );
        return Ok(None);
    };

    Diagram::from_dto(itinerary, &state.config.map).map(Some)
}
