//! Search state and selectors.
//!
//! This module holds the application state snapshot the trip planner UI
//! keeps for its searches, and the pure selectors that derive the active
//! search, the itineraries to display and the realtime effects from it.
//!
//! Selectors never mutate state. Reordering the itinerary list for display
//! returns a new list; `persist_itinerary_order` is the explicit way to
//! write that order back.

mod ordering;
mod realtime;
mod selectors;
mod types;

pub use ordering::{apply_plan_order, cap_results, order_itineraries, promote_preferred_agency};
pub use realtime::RealtimeEffects;
pub use selectors::{
    active_itineraries, active_itinerary, active_response, active_search, has_valid_location,
    persist_itinerary_order, query_is_valid, realtime_effects, show_user_settings,
    stop_viewer_config,
};
pub use types::{LocationKey, OtpState, Query, RoutingType, Search};
