//! Locations and travel time
//!
//! The combat calculator only needs "how many minutes from A to B", so
//! travel is a trait. `LocationCatalog` answers it from map coordinates.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::config::TravelConfig;
use crate::core::error::Result;

/// Source of travel times between two location ids
pub trait TravelTimeProvider {
    /// Minutes needed to travel `from` → `to`; must never fail
    fn travel_minutes(&self, from: &str, to: &str, difficulty: u32, squad_level: u32) -> f64;

    /// Display name for a location, if known
    fn location_name(&self, _id: &str) -> Option<&str> {
        None
    }
}

/// Constant travel time, regardless of endpoints
///
/// Held to the same default floor as `LocationCatalog` trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTravelTime(pub f64);

impl TravelTimeProvider for FixedTravelTime {
    fn travel_minutes(&self, _from: &str, _to: &str, _difficulty: u32, _squad_level: u32) -> f64 {
        self.0.max(TravelConfig::default().min_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn distance(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    locations: AHashMap<String, Location>,
    config: TravelConfig,
}

impl LocationCatalog {
    pub fn new(config: TravelConfig) -> Self {
        Self {
            locations: AHashMap::new(),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::with_default_map(TravelConfig::default())
    }

    /// Built-in map with custom travel settings
    pub fn with_default_map(config: TravelConfig) -> Self {
        let mut catalog = Self::new(config);
        let places = [
            ("vault", "Vault Outpost", 0.0, 0.0),
            ("dry_valley", "Dry Valley", 6.0, 8.0),
            ("red_rock_canyon", "Red Rock Canyon", 12.0, -5.0),
            ("old_city_ruins", "Old City Ruins", -20.0, 15.0),
            ("glowing_desert", "Glowing Desert", 30.0, 30.0),
            ("pine_forest", "Pine Forest", -8.0, -6.0),
            ("iron_mountain", "Iron Mountain", 25.0, -25.0),
        ];
        for (id, name, x, y) in places {
            catalog.add(Location {
                id: id.into(),
                name: name.into(),
                x,
                y,
            });
        }
        catalog
    }

    /// Parse a JSON array of locations
    pub fn from_json_str(json: &str, config: TravelConfig) -> Result<Self> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        let mut catalog = Self::new(config);
        for location in locations {
            catalog.add(location);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path, config: TravelConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, config)
    }

    pub fn add(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }
}

impl TravelTimeProvider for LocationCatalog {
    fn travel_minutes(&self, from: &str, to: &str, difficulty: u32, squad_level: u32) -> f64 {
        let (Some(a), Some(b)) = (self.get(from), self.get(to)) else {
            tracing::trace!(from, to, "unresolved travel endpoint, using default travel time");
            return self.config.default_minutes;
        };

        // Harder regions slow the approach; veteran squads move faster.
        let terrain_factor = 1.0 + 0.1 * (difficulty.max(1) - 1) as f64;
        let squad_factor = 1.0 + 0.05 * (squad_level.max(1) - 1) as f64;
        let minutes = a.distance(b) * self.config.minutes_per_unit * terrain_factor / squad_factor;

        minutes.max(self.config.min_minutes)
    }

    fn location_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|l| l.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location_uses_default() {
        let catalog = LocationCatalog::with_defaults();
        assert_eq!(catalog.travel_minutes("vault", "atlantis", 1, 1), 30.0);
    }

    #[test]
    fn test_distance_based_travel() {
        let catalog = LocationCatalog::with_defaults();
        // vault (0,0) -> dry_valley (6,8): distance 10, 2 min per unit
        assert!((catalog.travel_minutes("vault", "dry_valley", 1, 1) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_location_hits_floor() {
        let catalog = LocationCatalog::with_defaults();
        assert_eq!(catalog.travel_minutes("vault", "vault", 1, 1), 5.0);
    }

    #[test]
    fn test_difficulty_slows_and_level_speeds() {
        let catalog = LocationCatalog::with_defaults();
        let base = catalog.travel_minutes("vault", "glowing_desert", 1, 1);
        assert!(catalog.travel_minutes("vault", "glowing_desert", 3, 1) > base);
        assert!(catalog.travel_minutes("vault", "glowing_desert", 1, 5) < base);
    }

    #[test]
    fn test_location_name_lookup() {
        let catalog = LocationCatalog::with_defaults();
        assert_eq!(catalog.location_name("dry_valley"), Some("Dry Valley"));
        assert_eq!(FixedTravelTime(3.0).location_name("dry_valley"), None);
    }

    #[test]
    fn test_fixed_travel_respects_floor() {
        assert_eq!(FixedTravelTime(0.0).travel_minutes("a", "b", 1, 1), 5.0);
        assert_eq!(FixedTravelTime(-3.0).travel_minutes("a", "b", 1, 1), 5.0);
        assert_eq!(FixedTravelTime(f64::NAN).travel_minutes("a", "b", 1, 1), 5.0);
        assert_eq!(FixedTravelTime(12.0).travel_minutes("a", "b", 1, 1), 12.0);
    }
}
