//! Application configuration.
//!
//! Mirrors the keys of the trip planner's client configuration that the
//! diagram and selector code reads. Every field has a default, so a partial
//! (or empty) JSON document is a valid configuration.

use std::path::Path;

use chrono::Duration;
use serde::Deserialize;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Map rendering options.
    pub map: MapConfig,

    /// Itinerary list options.
    pub plan: PlanConfig,

    /// Minimum realtime duration change worth showing (seconds).
    pub realtime_effects_display_threshold: i64,

    /// Local persistence options.
    pub persistence: Option<PersistenceConfig>,

    /// Stop viewer options.
    pub stop_viewer: Option<StopViewerConfig>,
}

impl Config {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Returns the realtime display threshold as a Duration.
    pub fn realtime_threshold(&self) -> Duration {
        Duration::seconds(self.realtime_effects_display_threshold)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            plan: PlanConfig::default(),
            realtime_effects_display_threshold: 120, // 2 minutes
            persistence: None,
            stop_viewer: None,
        }
    }
}

/// Map rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Replace intermediate stops with points decoded from the leg geometry.
    /// Works around planners whose inter-stop geometry is unreliable.
    pub fix_inter_stop_geometry: bool,
}

/// Itinerary list options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanConfig {
    /// Agency whose itineraries are moved to the front of the list.
    pub preferred_agency: Option<String>,

    /// How many itineraries of the preferred agency to move up.
    pub preferred_agency_count: usize,

    /// Maximum number of itineraries to show. 0 = unlimited.
    pub max_number_of_iterations: usize,
}

impl PlanConfig {
    /// Returns the preferred agency, if one is set and non-empty.
    pub fn preferred_agency(&self) -> Option<&str> {
        self.preferred_agency
            .as_deref()
            .filter(|agency| !agency.is_empty())
    }

    /// Returns the result cap, or `None` for unlimited.
    pub fn max_results(&self) -> Option<usize> {
        (self.max_number_of_iterations > 0).then_some(self.max_number_of_iterations)
    }
}

/// Local persistence options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistenceConfig {
    /// Whether user settings are stored (and the settings panel shown).
    pub enabled: bool,
}

/// Stop viewer options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopViewerConfig {
    /// Departures shown per pattern.
    pub number_of_departures: Option<u32>,

    /// How far ahead to look for departures (seconds).
    pub time_range: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert!(!config.map.fix_inter_stop_geometry);
        assert_eq!(config.plan.preferred_agency(), None);
        assert_eq!(config.plan.preferred_agency_count, 0);
        assert_eq!(config.plan.max_results(), None);
        assert_eq!(config.realtime_effects_display_threshold, 120);
        assert!(config.persistence.is_none());
        assert!(config.stop_viewer.is_none());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_json_str(
            r#"{
                "map": {"fixInterStopGeometry": true},
                "plan": {
                    "preferredAgency": "Acme",
                    "preferredAgencyCount": 2,
                    "maxNumberOfIterations": 3
                },
                "realtimeEffectsDisplayThreshold": 300,
                "persistence": {"enabled": true},
                "stopViewer": {"numberOfDepartures": 3, "timeRange": 345600},
                "title": "ignored"
            }"#,
        )
        .unwrap();

        assert!(config.map.fix_inter_stop_geometry);
        assert_eq!(config.plan.preferred_agency(), Some("Acme"));
        assert_eq!(config.plan.preferred_agency_count, 2);
        assert_eq!(config.plan.max_results(), Some(3));
        assert_eq!(config.realtime_threshold(), Duration::minutes(5));
        assert_eq!(config.persistence, Some(PersistenceConfig { enabled: true }));
        assert_eq!(
            config.stop_viewer.unwrap().number_of_departures,
            Some(3)
        );
    }

    #[test]
    fn empty_preferred_agency_is_unset() {
        let plan = PlanConfig {
            preferred_agency: Some(String::new()),
            preferred_agency_count: 1,
            max_number_of_iterations: 0,
        };
        assert_eq!(plan.preferred_agency(), None);
    }

    #[test]
    fn invalid_json_rejected() {
        let err = Config::from_json_str(r#"{"plan": {"preferredAgencyCount": "two"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"map": {{"fixInterStopGeometry": true}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.map.fix_inter_stop_geometry);
        assert_eq!(config.realtime_effects_display_threshold, 120);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
