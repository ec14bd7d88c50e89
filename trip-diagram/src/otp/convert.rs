//! Conversion from planner DTOs to domain types.
//!
//! This module validates the loosely-typed planner response once, so the
//! diagram builder can work with legs that are known to be complete.

use tracing::debug;

use crate::domain::{
    DomainError, EncodedPolyline, Endpoint, InvalidMode, Itinerary, LatLon, Leg, Route, StopRef,
    TravelMode,
};

use super::types::{ItineraryDto, LegDto, PlaceDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Place without latitude or longitude
    #[error("place '{0}' has no coordinates")]
    MissingCoordinates(&'static str),

    /// Mode string not recognised
    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),

    /// Domain validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A specific leg failed to convert
    #[error("leg {index}: {source}")]
    InLeg {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },
}

/// Convert an itinerary DTO into a validated itinerary.
///
/// Fails on the first malformed leg rather than producing a partial
/// itinerary.
pub fn convert_itinerary(dto: &ItineraryDto) -> Result<Itinerary, ConversionError> {
    let legs = dto
        .legs
        .iter()
        .enumerate()
        .map(|(index, leg)| {
            convert_leg(leg).map_err(|e| {
                debug!(index, mode = %leg.mode, error = %e, "Rejecting malformed leg");
                ConversionError::InLeg {
                    index,
                    source: Box::new(e),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Itinerary::new(legs)?)
}

/// Convert a single leg DTO.
pub fn convert_leg(dto: &LegDto) -> Result<Leg, ConversionError> {
    let mode = TravelMode::parse(&dto.mode)?;
    let from = endpoint(dto.from.as_ref(), "from")?;
    let to = endpoint(dto.to.as_ref(), "to")?;

    match mode {
        TravelMode::Street(mode) => {
            let geometry = dto
                .leg_geometry
                .clone()
                .ok_or(ConversionError::MissingField("legGeometry"))?;
            Ok(Leg::street(mode, from, to, geometry, dto.hailed_car))
        }
        TravelMode::Transit(mode) => {
            // Transit legs are drawn from their stops; geometry is optional
            let geometry = dto
                .leg_geometry
                .clone()
                .unwrap_or_else(|| EncodedPolyline::new(""));
            let route = route(dto)?;
            let intermediate_stops = dto
                .intermediate_stops
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(intermediate_stop)
                .collect::<Result<Vec<_>, _>>()?;
            let inter_stop_geometry: Vec<EncodedPolyline> =
                dto.inter_stop_geometry.clone().unwrap_or_default();

            Ok(Leg::transit(
                mode,
                from,
                to,
                geometry,
                route,
                intermediate_stops,
                inter_stop_geometry,
            )?)
        }
    }
}

fn endpoint(place: Option<&PlaceDto>, role: &'static str) -> Result<Endpoint, ConversionError> {
    let place = place.ok_or(ConversionError::MissingField(role))?;
    Ok(Endpoint {
        name: place.name.clone(),
        position: position(place, role)?,
        stop_id: place.stop_id.clone(),
        bike_share_id: place.bike_share_id.clone(),
    })
}

fn position(place: &PlaceDto, role: &'static str) -> Result<LatLon, ConversionError> {
    match (place.lat, place.lon) {
        (Some(lat), Some(lon)) => Ok(LatLon::new(lat, lon)),
        _ => Err(ConversionError::MissingCoordinates(role)),
    }
}

fn intermediate_stop(place: &PlaceDto) -> Result<StopRef, ConversionError> {
    let stop_id = place
        .stop_id
        .clone()
        .ok_or(DomainError::MissingStopId("intermediate"))?;
    Ok(StopRef {
        stop_id,
        name: place.name.clone(),
        position: position(place, "intermediate")?,
    })
}

fn route(dto: &LegDto) -> Result<Route, ConversionError> {
    let route_id = dto
        .route_id
        .clone()
        .ok_or(ConversionError::MissingField("routeId"))?;
    Ok(Route {
        route_id,
        agency_id: dto.agency_id.clone(),
        short_name: dto.route_short_name.clone().unwrap_or_default(),
        long_name: dto.route_long_name.clone().unwrap_or_default(),
        route_type: dto.route_type,
        color: dto.route_color.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegKind, StreetMode, TransitMode};

    fn place(name: &str, stop_id: Option<&str>) -> PlaceDto {
        PlaceDto {
            name: Some(name.to_string()),
            lat: Some(45.5),
            lon: Some(-122.6),
            stop_id: stop_id.map(str::to_string),
            bike_share_id: None,
        }
    }

    fn walk_dto() -> LegDto {
        LegDto {
            mode: "WALK".into(),
            from: Some(place("Origin", None)),
            to: Some(place("Stop A", Some("A"))),
            leg_geometry: Some(EncodedPolyline::new("walk")),
            ..Default::default()
        }
    }

    fn bus_dto() -> LegDto {
        LegDto {
            mode: "BUS".into(),
            from: Some(place("Stop A", Some("A"))),
            to: Some(place("Stop B", Some("B"))),
            leg_geometry: Some(EncodedPolyline::new("bus")),
            route_id: Some("R20".into()),
            agency_id: Some("TRIMET".into()),
            route_type: Some(3),
            intermediate_stops: Some(vec![place("Mid", Some("M"))]),
            inter_stop_geometry: Some(vec![
                EncodedPolyline::new("s0"),
                EncodedPolyline::new("s1"),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn converts_street_leg() {
        let mut dto = walk_dto();
        dto.mode = "CAR".into();
        dto.hailed_car = true;
        let leg = convert_leg(&dto).unwrap();

        let LegKind::Street(street) = leg.kind() else {
            panic!("expected a street leg");
        };
        assert_eq!(street.mode, StreetMode::Car);
        assert!(street.is_hailed_car());
        assert_eq!(leg.to().stop_id.as_deref(), Some("A"));
    }

    #[test]
    fn converts_transit_leg() {
        let leg = convert_leg(&bus_dto()).unwrap();

        let LegKind::Transit(transit) = leg.kind() else {
            panic!("expected a transit leg");
        };
        assert_eq!(transit.mode, TransitMode::Bus);
        assert_eq!(transit.route.route_id, "R20");
        assert_eq!(transit.route.short_name, "");
        assert_eq!(transit.route.long_name, "");
        assert_eq!(transit.intermediate_stops.len(), 1);
        assert_eq!(transit.intermediate_stops[0].stop_id, "M");
        assert!(transit.has_inter_stop_geometry());
    }

    #[test]
    fn transit_leg_without_optional_lists() {
        let mut dto = bus_dto();
        dto.intermediate_stops = None;
        dto.inter_stop_geometry = None;
        let leg = convert_leg(&dto).unwrap();

        let LegKind::Transit(transit) = leg.kind() else {
            panic!("expected a transit leg");
        };
        assert!(transit.intermediate_stops.is_empty());
        assert!(!transit.has_inter_stop_geometry());
    }

    #[test]
    fn rejects_missing_endpoint() {
        let mut dto = walk_dto();
        dto.from = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::MissingField("from")
        );

        let mut dto = walk_dto();
        dto.to.as_mut().unwrap().lon = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::MissingCoordinates("to")
        );
    }

    #[test]
    fn transit_leg_geometry_is_optional() {
        let mut dto = bus_dto();
        dto.leg_geometry = None;
        let leg = convert_leg(&dto).unwrap();
        assert!(leg.geometry().points.is_empty());
        assert!(leg.is_transit());

        let mut dto = walk_dto();
        dto.leg_geometry = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::MissingField("legGeometry")
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let mut dto = walk_dto();
        dto.mode = "TELEPORT".into();
        assert!(matches!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::InvalidMode(_)
        ));
    }

    #[test]
    fn rejects_transit_without_route_or_stop() {
        let mut dto = bus_dto();
        dto.route_id = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::MissingField("routeId")
        );

        let mut dto = bus_dto();
        dto.intermediate_stops.as_mut().unwrap()[0].stop_id = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::Domain(DomainError::MissingStopId("intermediate"))
        );

        let mut dto = bus_dto();
        dto.from.as_mut().unwrap().stop_id = None;
        assert_eq!(
            convert_leg(&dto).unwrap_err(),
            ConversionError::Domain(DomainError::MissingStopId("from"))
        );
    }

    #[test]
    fn itinerary_reports_failing_leg() {
        let mut broken = walk_dto();
        broken.leg_geometry = None;
        let dto = ItineraryDto {
            legs: vec![bus_dto(), broken],
            ..Default::default()
        };

        let err = convert_itinerary(&dto).unwrap_err();
        assert_eq!(err.to_string(), "leg 1: missing required field: legGeometry");
    }

    #[test]
    fn itinerary_requires_legs() {
        let err = convert_itinerary(&ItineraryDto::default()).unwrap_err();
        assert_eq!(err, ConversionError::Domain(DomainError::EmptyItinerary));
    }

    #[test]
    fn itinerary_keeps_leg_order() {
        let dto = ItineraryDto {
            legs: vec![walk_dto(), bus_dto(), walk_dto()],
            ..Default::default()
        };
        let itinerary = convert_itinerary(&dto).unwrap();
        let modes: Vec<_> = itinerary.legs().iter().map(|l| l.mode().as_str()).collect();
        assert_eq!(modes, vec!["WALK", "BUS", "WALK"]);
    }
}
