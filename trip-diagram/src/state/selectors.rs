//! Selectors over an [`OtpState`] snapshot.

use tracing::trace;

use super::ordering::{apply_plan_order, order_itineraries};
use super::realtime::RealtimeEffects;
use super::types::{LocationKey, OtpState, Search};
use crate::config::StopViewerConfig;
use crate::otp::{ItineraryDto, PlanResponse};

/// Returns the search being shown, if any.
pub fn active_search(state: &OtpState) -> Option<&Search> {
    state.searches.get(state.active_search_id.as_deref()?)
}

/// Returns the active search's realtime or schedule-only response, following
/// `use_realtime`. A response without a plan counts as absent.
pub fn active_response(state: &OtpState) -> Option<&PlanResponse> {
    let search = active_search(state)?;
    let response = if state.use_realtime {
        search.response.as_ref()
    } else {
        search.non_realtime_response.as_ref()
    }?;
    response.plan.is_some().then_some(response)
}

/// Returns the active response's itineraries in display order.
///
/// The preferred agency's itineraries are promoted and the list is capped as
/// configured. The response itself is left untouched; use
/// [`persist_itinerary_order`] to write the order back.
pub fn active_itineraries(state: &OtpState) -> Option<Vec<&ItineraryDto>> {
    let plan = active_response(state)?.plan.as_ref()?;
    Some(order_itineraries(&plan.itineraries, &state.config.plan))
}

/// Returns the selected itinerary of the active search.
///
/// `None` when no itinerary is selected or the selection is out of range
/// of the ordered list.
pub fn active_itinerary(state: &OtpState) -> Option<&ItineraryDto> {
    let index = usize::try_from(active_search(state)?.active_itinerary).ok()?;
    active_itineraries(state)?.get(index).copied()
}

/// Write the display order back into the active response.
///
/// Returns true if an active response with a plan was found. Applying it
/// again leaves the list as it is.
pub fn persist_itinerary_order(state: &mut OtpState) -> bool {
    let OtpState {
        active_search_id,
        searches,
        use_realtime,
        config,
        ..
    } = state;

    let Some(search) = active_search_id.as_deref().and_then(|id| searches.get_mut(id)) else {
        return false;
    };
    let response = if *use_realtime {
        search.response.as_mut()
    } else {
        search.non_realtime_response.as_mut()
    };
    let Some(plan) = response.and_then(|r| r.plan.as_mut()) else {
        return false;
    };

    trace!(
        itineraries = plan.itineraries.len(),
        realtime = *use_realtime,
        "Persisting itinerary order"
    );
    apply_plan_order(&mut plan.itineraries, &config.plan);
    true
}

/// Returns true if the current query's location at `key` has usable
/// coordinates.
pub fn has_valid_location(state: &OtpState, key: LocationKey) -> bool {
    state
        .current_query
        .location(key)
        .is_some_and(|location| location.has_coordinates())
}

/// Returns true if both ends of the current query have usable coordinates.
pub fn query_is_valid(state: &OtpState) -> bool {
    has_valid_location(state, LocationKey::From) && has_valid_location(state, LocationKey::To)
}

/// Compare the active search's realtime and schedule-only answers.
///
/// Both answers are considered regardless of `use_realtime`.
pub fn realtime_effects(state: &OtpState) -> RealtimeEffects {
    let Some(search) = active_search(state) else {
        return RealtimeEffects::unaffected();
    };
    RealtimeEffects::compare(
        search.response.as_ref(),
        search.non_realtime_response.as_ref(),
        state.config.realtime_threshold(),
    )
}

/// Returns true if the user settings panel is enabled.
pub fn show_user_settings(state: &OtpState) -> bool {
    state
        .config
        .persistence
        .as_ref()
        .is_some_and(|p| p.enabled)
}

/// Returns the stop viewer options, if configured.
pub fn stop_viewer_config(state: &OtpState) -> Option<&StopViewerConfig> {
    state.config.stop_viewer.as_ref()
}
