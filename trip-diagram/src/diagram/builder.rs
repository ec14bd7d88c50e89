//! Itinerary to diagram conversion.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::config::MapConfig;
use crate::domain::{Endpoint, Itinerary, Leg, LegKind, StopRef, StreetLeg, TransitLeg};

use super::model::{
    BIKE_SHARE_PLACE_PREFIX, DESTINATION_PLACE_ID, Diagram, DiagramRoute, DiagramStop, JOURNEY_ID,
    Journey, ORIGIN_PLACE_ID, Pattern, PatternRef, PatternStop, Place, PlaceRef, Segment,
    StreetEdge, StreetSegment, TransitSegment,
};
use super::strategy::StopStrategy;

const JOURNEY_NAME: &str = "Itinerary-derived Journey";

/// Build the diagram for an itinerary.
///
/// Produces one street edge per street leg, one pattern per transit leg and
/// one journey segment per leg, in leg order. Routes and stops shared by
/// several legs appear once.
///
/// # Examples
///
/// ```
/// use trip_diagram::config::MapConfig;
/// use trip_diagram::diagram::build_diagram;
/// use trip_diagram::domain::{EncodedPolyline, Endpoint, Itinerary, LatLon, Leg, StreetMode};
///
/// let walk = Leg::street(
///     StreetMode::Walk,
///     Endpoint::new(Some("Home".into()), LatLon::new(45.52, -122.68)),
///     Endpoint::new(Some("Work".into()), LatLon::new(45.51, -122.67)),
///     EncodedPolyline::new("_p~iF~ps|U"),
///     false,
/// );
/// let itinerary = Itinerary::new(vec![walk]).unwrap();
///
/// let diagram = build_diagram(&itinerary, &MapConfig::default());
/// assert_eq!(diagram.street_edges.len(), 1);
/// assert!(diagram.patterns.is_empty());
/// assert_eq!(diagram.journey().unwrap().segments.len(), 1);
/// assert!(diagram.place("itin_street_0_to").is_some());
/// ```
pub fn build_diagram(itinerary: &Itinerary, config: &MapConfig) -> Diagram {
    let mut builder = DiagramBuilder::new(StopStrategy::from_config(config));

    builder.add_place(ORIGIN_PLACE_ID.to_string(), None, itinerary.origin());
    builder.add_place(
        DESTINATION_PLACE_ID.to_string(),
        None,
        itinerary.destination(),
    );

    for leg in itinerary.legs() {
        match leg.kind() {
            LegKind::Street(street) => builder.add_street_leg(leg, street),
            LegKind::Transit(transit) => builder.add_transit_leg(leg, transit),
        }
    }

    builder.finish()
}

/// Accumulates diagram parts for a single build.
struct DiagramBuilder {
    strategy: StopStrategy,
    places: Vec<Place>,
    place_index: HashMap<String, usize>,
    street_edges: Vec<StreetEdge>,
    patterns: Vec<Pattern>,
    routes: BTreeMap<String, DiagramRoute>,
    stops: BTreeMap<String, DiagramStop>,
    segments: Vec<Segment>,
}

impl DiagramBuilder {
    fn new(strategy: StopStrategy) -> Self {
        Self {
            strategy,
            places: Vec::new(),
            place_index: HashMap::new(),
            street_edges: Vec::new(),
            patterns: Vec::new(),
            routes: BTreeMap::new(),
            stops: BTreeMap::new(),
            segments: Vec::new(),
        }
    }

    /// Add a place, or update the existing place with the same id.
    ///
    /// A later entry moves the place but never removes its name.
    fn add_place(&mut self, place_id: String, name: Option<String>, endpoint: &Endpoint) {
        if let Some(&idx) = self.place_index.get(&place_id) {
            let place = &mut self.places[idx];
            place.place_lat = endpoint.position.lat;
            place.place_lon = endpoint.position.lon;
            if name.is_some() {
                place.place_name = name;
            }
            return;
        }

        self.place_index.insert(place_id.clone(), self.places.len());
        self.places.push(Place {
            place_id,
            place_name: name,
            place_lat: endpoint.position.lat,
            place_lon: endpoint.position.lon,
        });
    }

    fn add_stop(&mut self, stop: &StopRef) {
        self.stops.insert(
            stop.stop_id.clone(),
            DiagramStop {
                stop_id: stop.stop_id.clone(),
                stop_name: stop.name.clone(),
                stop_lat: stop.position.lat,
                stop_lon: stop.position.lon,
            },
        );
    }

    fn add_street_leg(&mut self, leg: &Leg, street: &StreetLeg) {
        let edge_id = self.street_edges.len();
        let from_id = street_place_id(leg.from(), edge_id, "from");
        let to_id = street_place_id(leg.to(), edge_id, "to");

        self.segments.push(Segment::Street(StreetSegment {
            mode: street.mode,
            street_edges: vec![edge_id],
            from: PlaceRef {
                place_id: from_id.clone(),
            },
            to: PlaceRef {
                place_id: to_id.clone(),
            },
            arc: street.is_hailed_car(),
        }));

        self.street_edges.push(StreetEdge {
            edge_id,
            geometry: leg.geometry().clone(),
        });

        // The from place stays unlabelled: it usually coincides with the
        // previous leg's labelled to place.
        self.add_place(from_id, None, leg.from());
        self.add_place(to_id, leg.to().name.clone(), leg.to());
    }

    fn add_transit_leg(&mut self, leg: &Leg, transit: &TransitLeg) {
        let pattern_idx = self.patterns.len();
        let pattern_id = format!("ptn_{pattern_idx}");

        let mut stops = Vec::with_capacity(transit.intermediate_stops.len() + 2);

        self.add_stop(&transit.board);
        stops.push(PatternStop {
            stop_id: transit.board.stop_id.clone(),
            geometry: None,
        });

        for (stop, geometry) in self.strategy.intermediate_stops(transit, leg.geometry()) {
            self.add_stop(&stop);
            stops.push(PatternStop {
                stop_id: stop.stop_id,
                geometry: geometry.map(|g| g.points.clone()),
            });
        }

        self.add_stop(&transit.alight);
        stops.push(PatternStop {
            stop_id: transit.alight.stop_id.clone(),
            geometry: transit.geometry_into_alight().map(|g| g.points.clone()),
        });

        let route = &transit.route;
        self.routes.insert(
            route.route_id.clone(),
            DiagramRoute {
                agency_id: route.agency_id.clone(),
                route_id: route.route_id.clone(),
                route_short_name: route.short_name.clone(),
                route_long_name: route.long_name.clone(),
                route_type: route.route_type,
                route_color: route.color.clone(),
            },
        );

        let to_stop_index = stops.len() - 1;
        trace!(
            pattern = %pattern_id,
            route = %route.route_id,
            stops = stops.len(),
            "Added transit pattern"
        );

        self.patterns.push(Pattern {
            pattern_id: pattern_id.clone(),
            pattern_name: format!("Pattern {pattern_idx}"),
            route_id: route.route_id.clone(),
            stops,
        });

        self.segments.push(Segment::Transit(TransitSegment {
            patterns: vec![PatternRef {
                pattern_id,
                from_stop_index: 0,
                to_stop_index,
            }],
        }));
    }

    fn finish(self) -> Diagram {
        Diagram {
            journeys: vec![Journey {
                journey_id: JOURNEY_ID.to_string(),
                journey_name: JOURNEY_NAME.to_string(),
                segments: self.segments,
            }],
            street_edges: self.street_edges,
            places: self.places,
            patterns: self.patterns,
            routes: self.routes.into_values().collect(),
            stops: self.stops.into_values().collect(),
        }
    }
}

/// Place id for a street leg endpoint. Bike-share stations keep their own id;
/// an empty station id counts as none.
fn street_place_id(endpoint: &Endpoint, edge_id: usize, end: &str) -> String {
    match endpoint.bike_share_id.as_deref().filter(|id| !id.is_empty()) {
        Some(station) => format!("{BIKE_SHARE_PLACE_PREFIX}{station}"),
        None => format!("itin_street_{edge_id}_{end}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EncodedPolyline, LatLon, Route, StreetMode, TransitMode};

    fn place(name: &str, lat: f64, lon: f64) -> Endpoint {
        Endpoint::new(Some(name.to_string()), LatLon::new(lat, lon))
    }

    fn stop(id: &str, lat: f64, lon: f64) -> Endpoint {
        Endpoint {
            stop_id: Some(id.to_string()),
            ..place(&format!("Stop {id}"), lat, lon)
        }
    }

    fn intermediate(id: &str) -> StopRef {
        StopRef {
            stop_id: id.to_string(),
            name: Some(format!("Stop {id}")),
            position: LatLon::new(45.0, -122.0),
        }
    }

    fn route(id: &str) -> Route {
        Route {
            route_id: id.to_string(),
            agency_id: Some("TRIMET".into()),
            short_name: format!("{id} short"),
            long_name: String::new(),
            route_type: Some(3),
            color: Some("FF0000".into()),
        }
    }

    fn walk(from: Endpoint, to: Endpoint) -> Leg {
        Leg::street(
            StreetMode::Walk,
            from,
            to,
            EncodedPolyline::new("walkgeom"),
            false,
        )
    }

    fn bus(route_id: &str, from: Endpoint, to: Endpoint, via: &[&str], segments: usize) -> Leg {
        Leg::transit(
            TransitMode::Bus,
            from,
            to,
            EncodedPolyline::new("_p~iF~ps|U_ulLnnqC_mqNvxq`@"),
            route(route_id),
            via.iter().map(|id| intermediate(id)).collect(),
            (0..segments)
                .map(|i| EncodedPolyline::new(format!("seg{i}")))
                .collect(),
        )
        .unwrap()
    }

    /// WALK, BUS (2 intermediate stops, matching geometry), WALK
    fn walk_bus_walk() -> Itinerary {
        Itinerary::new(vec![
            walk(place("Origin", 45.1, -122.1), stop("A", 45.2, -122.2)),
            bus(
                "R1",
                stop("A", 45.2, -122.2),
                stop("D", 45.5, -122.5),
                &["B", "C"],
                3,
            ),
            walk(stop("D", 45.5, -122.5), place("Destination", 45.6, -122.6)),
        ])
        .unwrap()
    }

    #[test]
    fn walk_bus_walk_diagram() {
        let diagram = build_diagram(&walk_bus_walk(), &MapConfig::default());

        let edge_ids: Vec<_> = diagram.street_edges.iter().map(|e| e.edge_id).collect();
        assert_eq!(edge_ids, vec![0, 1]);

        assert_eq!(diagram.patterns.len(), 1);
        let pattern = &diagram.patterns[0];
        assert_eq!(pattern.pattern_id, "ptn_0");
        assert_eq!(pattern.route_id, "R1");
        let stop_ids: Vec<_> = pattern.stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(stop_ids, vec!["A", "B", "C", "D"]);

        // The boarding stop has nothing leading into it
        assert!(pattern.stops[0].geometry.is_none());
        let geometry: Vec<_> = pattern.stops[1..]
            .iter()
            .map(|s| s.geometry.as_deref())
            .collect();
        assert_eq!(geometry, vec![Some("seg0"), Some("seg1"), Some("seg2")]);

        assert_eq!(diagram.routes.len(), 1);
        assert!(diagram.route("R1").is_some());
        assert_eq!(diagram.stops.len(), 4);

        let journey = diagram.journey().unwrap();
        assert_eq!(journey.journey_id, "itin");
        let types: Vec<_> = journey.segments.iter().map(Segment::type_name).collect();
        assert_eq!(types, vec!["WALK", "TRANSIT", "WALK"]);
        assert_eq!(
            journey.segments[1],
            Segment::Transit(TransitSegment {
                patterns: vec![PatternRef {
                    pattern_id: "ptn_0".into(),
                    from_stop_index: 0,
                    to_stop_index: 3,
                }],
            })
        );
    }

    #[test]
    fn endpoint_places() {
        let diagram = build_diagram(&walk_bus_walk(), &MapConfig::default());

        let origin = diagram.place("from").unwrap();
        assert_eq!((origin.place_lat, origin.place_lon), (45.1, -122.1));
        let destination = diagram.place("to").unwrap();
        assert_eq!((destination.place_lat, destination.place_lon), (45.6, -122.6));

        let ids: Vec<_> = diagram.places.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "from",
                "to",
                "itin_street_0_from",
                "itin_street_0_to",
                "itin_street_1_from",
                "itin_street_1_to",
            ]
        );
    }

    #[test]
    fn street_from_places_are_unlabelled() {
        let diagram = build_diagram(&walk_bus_walk(), &MapConfig::default());

        assert_eq!(diagram.place("itin_street_0_from").unwrap().place_name, None);
        assert_eq!(
            diagram.place("itin_street_0_to").unwrap().place_name.as_deref(),
            Some("Stop A")
        );
        assert_eq!(diagram.place("itin_street_1_from").unwrap().place_name, None);
        assert_eq!(
            diagram.place("itin_street_1_to").unwrap().place_name.as_deref(),
            Some("Destination")
        );
    }

    #[test]
    fn street_segments_reference_their_places() {
        let diagram = build_diagram(&walk_bus_walk(), &MapConfig::default());
        let journey = diagram.journey().unwrap();

        let last = journey.segments[2].as_street().unwrap();
        assert_eq!(last.street_edges, vec![1]);
        assert_eq!(last.from.place_id, "itin_street_1_from");
        assert_eq!(last.to.place_id, "itin_street_1_to");
        assert!(!last.arc);
        assert_eq!(diagram.street_edges[1].geometry.points, "walkgeom");
    }

    #[test]
    fn mismatched_geometry_suppressed() {
        let itinerary = Itinerary::new(vec![bus(
            "R1",
            stop("A", 1.0, 1.0),
            stop("D", 2.0, 2.0),
            &["B", "C"],
            2,
        )])
        .unwrap();
        let diagram = build_diagram(&itinerary, &MapConfig::default());

        let pattern = &diagram.patterns[0];
        assert_eq!(pattern.stops.len(), 4);
        assert!(pattern.stops.iter().all(|s| s.geometry.is_none()));
    }

    #[test]
    fn shared_route_and_stop_deduplicated() {
        let itinerary = Itinerary::new(vec![
            bus("R1", stop("A", 1.0, 1.0), stop("B", 2.0, 2.0), &[], 1),
            walk(stop("B", 2.0, 2.0), stop("C", 2.1, 2.1)),
            bus("R1", stop("C", 2.1, 2.1), stop("A", 1.0, 1.0), &["B"], 0),
        ])
        .unwrap();
        let diagram = build_diagram(&itinerary, &MapConfig::default());

        assert_eq!(diagram.routes.len(), 1);
        assert_eq!(diagram.patterns.len(), 2);
        assert_eq!(diagram.patterns[1].pattern_id, "ptn_1");
        let mut stop_ids: Vec<_> = diagram.stops.iter().map(|s| s.stop_id.as_str()).collect();
        stop_ids.sort();
        assert_eq!(stop_ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn later_route_wins() {
        let first = bus("R1", stop("A", 1.0, 1.0), stop("B", 2.0, 2.0), &[], 0);
        let mut second_route = route("R1");
        second_route.color = Some("00FF00".into());
        let second = Leg::transit(
            TransitMode::Bus,
            stop("B", 2.0, 2.0),
            stop("C", 3.0, 3.0),
            EncodedPolyline::new(""),
            second_route,
            vec![],
            vec![],
        )
        .unwrap();

        let diagram = build_diagram(
            &Itinerary::new(vec![first, second]).unwrap(),
            &MapConfig::default(),
        );
        assert_eq!(diagram.routes.len(), 1);
        assert_eq!(diagram.routes[0].route_color.as_deref(), Some("00FF00"));
    }

    #[test]
    fn route_names_default_to_empty() {
        let mut bare = route("R9");
        bare.short_name = String::new();
        let leg = Leg::transit(
            TransitMode::Ferry,
            stop("A", 1.0, 1.0),
            stop("B", 2.0, 2.0),
            EncodedPolyline::new(""),
            bare,
            vec![],
            vec![],
        )
        .unwrap();
        let diagram = build_diagram(&Itinerary::new(vec![leg]).unwrap(), &MapConfig::default());

        let json = serde_json::to_value(&diagram.routes[0]).unwrap();
        assert_eq!(json["route_short_name"], "");
        assert_eq!(json["route_long_name"], "");
    }

    #[test]
    fn bike_share_places_override_street_ids() {
        let mut dock = place("Dock 7", 1.5, 1.5);
        dock.bike_share_id = Some("7".into());
        let mut other_dock = place("Dock 9", 1.8, 1.8);
        other_dock.bike_share_id = Some("9".into());

        let itinerary = Itinerary::new(vec![
            walk(place("Origin", 1.0, 1.0), dock.clone()),
            Leg::street(
                StreetMode::Bicycle,
                dock,
                other_dock.clone(),
                EncodedPolyline::new("ride"),
                false,
            ),
            walk(other_dock, place("Destination", 2.0, 2.0)),
        ])
        .unwrap();
        let diagram = build_diagram(&itinerary, &MapConfig::default());

        let ride = diagram.journey().unwrap().segments[1].as_street().unwrap();
        assert_eq!(ride.mode, StreetMode::Bicycle);
        assert_eq!(ride.from.place_id, "bicycle_rent_station_7");
        assert_eq!(ride.to.place_id, "bicycle_rent_station_9");

        let first = diagram.journey().unwrap().segments[0].as_street().unwrap();
        assert_eq!(first.from.place_id, "itin_street_0_from");
        assert_eq!(first.to.place_id, "bicycle_rent_station_7");

        // Each station appears once and keeps its label
        let station = diagram.place("bicycle_rent_station_7").unwrap();
        assert_eq!(station.place_name.as_deref(), Some("Dock 7"));
        assert!(station.is_bike_share_station());
        let count = diagram
            .places
            .iter()
            .filter(|p| p.place_id == "bicycle_rent_station_7")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn empty_bike_share_id_uses_street_ids() {
        let mut dock = place("Dock", 1.5, 1.5);
        dock.bike_share_id = Some(String::new());
        let itinerary = Itinerary::new(vec![walk(place("Origin", 1.0, 1.0), dock)]).unwrap();
        let diagram = build_diagram(&itinerary, &MapConfig::default());

        let segment = diagram.journey().unwrap().segments[0].as_street().unwrap();
        assert_eq!(segment.to.place_id, "itin_street_0_to");
        assert!(diagram.places.iter().all(|p| !p.is_bike_share_station()));
    }

    #[test]
    fn hailed_car_draws_arc() {
        let itinerary = Itinerary::new(vec![Leg::street(
            StreetMode::Car,
            place("Pickup", 1.0, 1.0),
            place("Dropoff", 2.0, 2.0),
            EncodedPolyline::new("car"),
            true,
        )])
        .unwrap();
        let diagram = build_diagram(&itinerary, &MapConfig::default());

        let segment = diagram.journey().unwrap().segments[0].as_street().unwrap();
        assert!(segment.arc);
        let json = serde_json::to_value(&diagram).unwrap();
        assert_eq!(json["journeys"][0]["segments"][0]["arc"], true);
    }

    #[test]
    fn decoded_polyline_stops() {
        let itinerary = Itinerary::new(vec![bus(
            "R1",
            stop("A", 38.5, -120.2),
            stop("D", 43.252, -126.453),
            &["B", "C"],
            3,
        )])
        .unwrap();
        let config = MapConfig {
            fix_inter_stop_geometry: true,
        };
        let diagram = build_diagram(&itinerary, &config);

        let pattern = &diagram.patterns[0];
        let stop_ids: Vec<_> = pattern.stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(stop_ids, vec!["A", "A:0", "A:1", "A:2", "D"]);

        let geometry: Vec<_> = pattern.stops.iter().map(|s| s.geometry.as_deref()).collect();
        assert_eq!(
            geometry,
            vec![None, Some("seg2"), None, None, Some("seg2")]
        );

        // Explicit intermediate stops are not registered in this mode
        assert!(diagram.stop("B").is_none());
        assert_eq!(diagram.stop("A:1").unwrap().stop_name.as_deref(), Some("A:1"));

        let transit = diagram.journey().unwrap().segments[0].as_transit().unwrap();
        assert_eq!(transit.patterns[0].to_stop_index, 4);
    }

    #[test]
    fn rebuild_is_identical() {
        let itinerary = walk_bus_walk();
        let config = MapConfig::default();
        assert_eq!(
            build_diagram(&itinerary, &config),
            build_diagram(&itinerary, &config)
        );
    }
}
