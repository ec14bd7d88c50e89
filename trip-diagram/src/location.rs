//! Query locations and coordinate text helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::LatLon;

/// Error returned when a coordinate list cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {value:?}")]
pub struct InvalidCoords {
    value: String,
}

/// What kind of stored place a location is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Home,
    Work,
    /// A transit stop, identified by `Location::id`
    Stop,
    /// A recently used place, stamped with `Location::timestamp`
    Recent,
    #[serde(other)]
    Other,
}

/// A location entered or picked for a query.
///
/// Coordinates are optional because a location may have been typed but not
/// yet geocoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Kind of stored place, if this location was saved by the user.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,

    /// Stop id, for stop locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When a recent place was last used (epoch milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Location {
    /// A location named after its own coordinates, as created by clicking
    /// on the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_diagram::location::Location;
    ///
    /// let location = Location::from_lat_lng(45.523, -122.676);
    /// assert_eq!(location.name.as_deref(), Some("45.52300, -122.67600"));
    /// assert!(location.has_coordinates());
    /// ```
    pub fn from_lat_lng(lat: f64, lon: f64) -> Self {
        Self {
            name: Some(latlng_to_string(LatLon::new(lat, lon))),
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        }
    }

    /// Returns the position, if both coordinates are present.
    pub fn position(&self) -> Option<LatLon> {
        Some(LatLon::new(self.lat?, self.lon?))
    }

    /// Returns true if both coordinates are set to usable values.
    ///
    /// Zero and NaN count as unset; no real query location sits exactly on
    /// the equator or the prime meridian.
    pub fn has_coordinates(&self) -> bool {
        let usable = |c: Option<f64>| c.is_some_and(|v| v != 0.0 && !v.is_nan());
        usable(self.lat) && usable(self.lon)
    }
}

/// Display name of a stored place.
///
/// Home and work places show as "Home" and "Work"; everything else shows
/// its own name. With `with_details`, the [`detail_text`] follows in
/// parentheses.
///
/// # Examples
///
/// ```
/// use trip_diagram::location::{Location, LocationType, format_stored_place_name};
///
/// let home = Location {
///     name: Some("123 Main St".into()),
///     location_type: Some(LocationType::Home),
///     ..Default::default()
/// };
/// assert_eq!(format_stored_place_name(&home, true), "Home (123 Main St)");
/// assert_eq!(format_stored_place_name(&home, false), "Home");
/// ```
pub fn format_stored_place_name(location: &Location, with_details: bool) -> String {
    let detail = if with_details {
        detail_text(location)
    } else {
        None
    };
    display_name(location, detail)
}

/// Secondary text for a stored place, relative to the current time.
pub fn detail_text(location: &Location) -> Option<String> {
    detail_text_at(location, Utc::now())
}

/// Secondary text for a stored place, with recent places described
/// relative to `now`.
///
/// Home and work places give their name, stops their id, and recent places
/// how long ago they were used.
pub fn detail_text_at(location: &Location, now: DateTime<Utc>) -> Option<String> {
    let detail = match location.location_type? {
        LocationType::Home | LocationType::Work => location.name.clone(),
        LocationType::Stop => location.id.clone(),
        LocationType::Recent => location
            .timestamp
            .filter(|&ts| ts != 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|then| relative_time(then, now)),
        LocationType::Other => None,
    };
    detail.filter(|d| !d.is_empty())
}

/// [`format_stored_place_name`] with details taken relative to `now`.
pub fn format_stored_place_name_at(location: &Location, now: DateTime<Utc>) -> String {
    display_name(location, detail_text_at(location, now))
}

fn display_name(location: &Location, detail: Option<String>) -> String {
    let name = match location.location_type {
        Some(LocationType::Home) => "Home".to_string(),
        Some(LocationType::Work) => "Work".to_string(),
        _ => location.name.clone().unwrap_or_default(),
    };
    match detail {
        Some(detail) => format!("{name} ({detail})"),
        None => name,
    }
}

/// Describe `then` relative to `now`, e.g. "5 minutes ago" or "in 2 days".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = then.signed_duration_since(now);
    let past = delta <= chrono::Duration::zero();
    let seconds = delta.num_seconds().unsigned_abs() as f64;

    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3600.0).round();
    let days = (seconds / 86400.0).round();

    let amount = if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if days < 46.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round())
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round())
    };

    if past {
        format!("{amount} ago")
    } else {
        format!("in {amount}")
    }
}

/// Format a position as `"lat, lon"` with five decimal places.
pub fn latlng_to_string(position: LatLon) -> String {
    format!("{:.5}, {:.5}", position.lat, position.lon)
}

/// Format a coordinate list as comma-separated values with five decimal
/// places. Returns `None` for an empty list.
pub fn coords_to_string(coords: &[f64]) -> Option<String> {
    if coords.is_empty() {
        return None;
    }
    Some(
        coords
            .iter()
            .map(|c| format!("{c:.5}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Parse a comma-separated coordinate list. An empty string is an empty list.
pub fn string_to_coords(s: &str) -> Result<Vec<f64>, InvalidCoords> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| InvalidCoords {
                value: part.to_string(),
            })
        })
        .collect()
}

/// Returns true if two locations share coordinates. Two absent locations
/// match; an absent and a present one do not.
pub fn match_lat_lon(a: Option<&Location>, b: Option<&Location>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.lat == b.lat && a.lon == b.lon,
        (None, None) => true,
        _ => false,
    }
}
