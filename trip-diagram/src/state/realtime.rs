//! Realtime impact on a search's results.

use chrono::Duration;

use crate::otp::{ItineraryDto, PlanResponse};

/// How realtime data changed the best itinerary of a search.
///
/// A search counts as affected only when both a realtime and a
/// schedule-only plan exist and their first itineraries differ in duration.
/// When unaffected, every other field is empty, zero or false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeEffects {
    pub is_affected_by_realtime_data: bool,
    /// Routes of the first schedule-only itinerary, in leg order.
    pub normal_routes: Vec<String>,
    /// Routes of the first realtime itinerary, in leg order.
    pub realtime_routes: Vec<String>,
    pub routes_differ: bool,
    pub normal_duration: Duration,
    pub realtime_duration: Duration,
    /// Whether the duration change is at least the display threshold.
    pub exceeds_threshold: bool,
}

impl RealtimeEffects {
    /// Effects of a search realtime data did not change.
    pub fn unaffected() -> Self {
        Self {
            is_affected_by_realtime_data: false,
            normal_routes: Vec::new(),
            realtime_routes: Vec::new(),
            routes_differ: false,
            normal_duration: Duration::zero(),
            realtime_duration: Duration::zero(),
            exceeds_threshold: false,
        }
    }

    /// Compare the first itinerary of a realtime plan with the first
    /// itinerary of a schedule-only plan.
    pub fn compare(
        realtime: Option<&PlanResponse>,
        scheduled: Option<&PlanResponse>,
        threshold: Duration,
    ) -> Self {
        let (Some(realtime), Some(normal)) = (first_itinerary(realtime), first_itinerary(scheduled))
        else {
            return Self::unaffected();
        };
        if realtime.duration == normal.duration {
            return Self::unaffected();
        }

        let normal_routes = normal.routes();
        let realtime_routes = realtime.routes();
        let normal_duration = Duration::seconds(normal.duration);
        let realtime_duration = Duration::seconds(realtime.duration);

        Self {
            is_affected_by_realtime_data: true,
            routes_differ: normal_routes != realtime_routes,
            normal_routes,
            realtime_routes,
            normal_duration,
            realtime_duration,
            exceeds_threshold: (normal_duration - realtime_duration).abs() >= threshold,
        }
    }

    /// Returns how much longer (positive) or shorter the realtime itinerary is.
    pub fn duration_change(&self) -> Duration {
        self.realtime_duration - self.normal_duration
    }
}

fn first_itinerary(response: Option<&PlanResponse>) -> Option<&ItineraryDto> {
    response?.plan.as_ref()?.itineraries.first()
}
