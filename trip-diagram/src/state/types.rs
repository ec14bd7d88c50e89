//! State snapshot types.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::Config;
use crate::location::Location;
use crate::otp::PlanResponse;

/// Which end of a query a location is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKey {
    From,
    To,
}

/// How a search was routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingType {
    /// Single itineraries with full leg detail
    #[default]
    Itinerary,
    /// Profile (range) routing, with option summaries instead of itineraries
    Profile,
}

/// A trip query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    pub from: Option<Location>,
    pub to: Option<Location>,
    pub routing_type: RoutingType,
}

impl Query {
    /// Returns the location at one end of the query.
    pub fn location(&self, key: LocationKey) -> Option<&Location> {
        match key {
            LocationKey::From => self.from.as_ref(),
            LocationKey::To => self.to.as_ref(),
        }
    }
}

/// One search: the query and the planner's answers to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Search {
    /// The query as submitted.
    pub query: Query,

    /// Realtime-adjusted answer.
    pub response: Option<PlanResponse>,

    /// Schedule-only answer.
    pub non_realtime_response: Option<PlanResponse>,

    /// Selected itinerary index; negative when none is selected.
    pub active_itinerary: isize,

    /// Selected leg of the active itinerary.
    pub active_leg: Option<usize>,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            query: Query::default(),
            response: None,
            non_realtime_response: None,
            active_itinerary: 0,
            active_leg: None,
        }
    }
}

/// Application state snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtpState {
    /// Key into `searches` of the search being shown.
    pub active_search_id: Option<String>,

    /// All searches made in this session, by id.
    pub searches: HashMap<String, Search>,

    /// Show realtime (true) or schedule-only (false) results.
    pub use_realtime: bool,

    /// The query currently being edited.
    pub current_query: Query,

    /// Client configuration.
    pub config: Config,
}

impl Default for OtpState {
    fn default() -> Self {
        Self {
            active_search_id: None,
            searches: HashMap::new(),
            use_realtime: true,
            current_query: Query::default(),
            config: Config::default(),
        }
    }
}
