//! Display ordering of itineraries.
//!
//! Two deterministic steps applied to the planner's list: itineraries of a
//! preferred agency move to the front, then the list is capped. Both are
//! idempotent, so applying them to an already-ordered list changes nothing.

use std::borrow::Borrow;

use tracing::trace;

use crate::config::PlanConfig;
use crate::otp::ItineraryDto;

/// Order itineraries for display without touching the planner's list.
pub fn order_itineraries<'a>(
    itineraries: &'a [ItineraryDto],
    config: &PlanConfig,
) -> Vec<&'a ItineraryDto> {
    let mut ordered: Vec<&ItineraryDto> = itineraries.iter().collect();
    apply_plan_order(&mut ordered, config);
    ordered
}

/// Apply the configured promotion and cap to a list in place.
///
/// Works on owned itineraries as well as references.
pub fn apply_plan_order<T: Borrow<ItineraryDto>>(itineraries: &mut Vec<T>, config: &PlanConfig) {
    if let Some(agency) = config.preferred_agency() {
        promote_preferred_agency(itineraries, agency, config.preferred_agency_count);
    }
    if let Some(max) = config.max_results() {
        cap_results(itineraries, max);
    }
}

/// Move up to `count` itineraries using `agency` to the front, keeping
/// their relative order.
///
/// Slot `i` is filled with the first matching itinerary at or after `i`.
/// The scan stops at the first slot with no match.
pub fn promote_preferred_agency<T: Borrow<ItineraryDto>>(
    itineraries: &mut Vec<T>,
    agency: &str,
    count: usize,
) {
    for slot in 0..count.min(itineraries.len()) {
        let Some(offset) = itineraries[slot..]
            .iter()
            .position(|it| {
                let it: &ItineraryDto = it.borrow();
                it.uses_agency(agency)
            })
        else {
            break;
        };

        let found = slot + offset;
        if found != slot {
            trace!(agency, from = found, to = slot, "Promoting preferred itinerary");
            let itinerary = itineraries.remove(found);
            itineraries.insert(slot, itinerary);
        }
    }
}

/// Keep at most `max` itineraries, dropping from the back.
pub fn cap_results<T>(itineraries: &mut Vec<T>, max: usize) {
    itineraries.truncate(max);
}
