//! Intermediate-stop strategies for transit patterns.
//!
//! A pattern's stops between boarding and alighting come either from the
//! planner's intermediate stops, or from the points of the leg geometry when
//! the planner's inter-stop geometry cannot be trusted.

use geo_types::LineString;
use tracing::debug;

use crate::config::MapConfig;
use crate::domain::{EncodedPolyline, LatLon, StopRef, TransitLeg};

/// Coordinate precision of planner polylines.
const POLYLINE_PRECISION: u32 = 5;

/// How a transit leg's intermediate pattern stops are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopStrategy {
    /// Use the leg's intermediate stops, each with the geometry leading into it.
    Explicit,
    /// Synthesize one stop per point of the decoded leg geometry.
    DecodedPolyline,
}

impl StopStrategy {
    /// Select the strategy for a diagram build.
    pub fn from_config(config: &MapConfig) -> Self {
        if config.fix_inter_stop_geometry {
            StopStrategy::DecodedPolyline
        } else {
            StopStrategy::Explicit
        }
    }

    /// Produce the stops between boarding and alighting, paired with the
    /// geometry to attach to each pattern entry.
    pub(crate) fn intermediate_stops<'a>(
        &self,
        transit: &'a TransitLeg,
        leg_geometry: &EncodedPolyline,
    ) -> Vec<(StopRef, Option<&'a EncodedPolyline>)> {
        match self {
            StopStrategy::Explicit => transit
                .intermediate_stops
                .iter()
                .enumerate()
                .map(|(i, stop)| (stop.clone(), transit.geometry_into_intermediate(i)))
                .collect(),
            StopStrategy::DecodedPolyline => {
                let Some(line) = decode(leg_geometry) else {
                    return Vec::new();
                };
                line.coords()
                    .enumerate()
                    .map(|(i, coord)| {
                        let stop_id = format!("{}:{}", transit.board.stop_id, i);
                        let stop = StopRef {
                            name: Some(stop_id.clone()),
                            stop_id,
                            position: LatLon::new(coord.y, coord.x),
                        };
                        // Only the first synthesized stop carries geometry
                        let geometry = if i == 0 {
                            transit.geometry_into_alight()
                        } else {
                            None
                        };
                        (stop, geometry)
                    })
                    .collect()
            }
        }
    }
}

/// Decode a planner polyline. Undecodable geometry yields `None`.
fn decode(polyline: &EncodedPolyline) -> Option<LineString<f64>> {
    match polyline::decode_polyline(&polyline.points, POLYLINE_PRECISION) {
        Ok(line) => Some(line),
        Err(e) => {
            debug!(
                points = %polyline.points,
                error = %e,
                "Failed to decode leg geometry, synthesizing no stops"
            );
            None
        }
    }
}
