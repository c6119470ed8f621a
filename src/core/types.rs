//! Core type definitions used throughout the codebase

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a squad member
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a mission
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for generated events
///
/// Built from the injected RNG so seeded runs produce the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

/// Wall-clock milliseconds since the Unix epoch
pub type TimestampMs = i64;

/// Presentation-only timestamp attached to offline events
///
/// Jittered inside the elapsed window to give a summary screen a pleasant
/// ordering. It says nothing about when (or in which order) the underlying
/// effects actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayTime(pub TimestampMs);

pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Convert a millisecond span to fractional hours; negative spans count as zero
pub fn hours_from_ms(elapsed_ms: i64) -> f64 {
    elapsed_ms.max(0) as f64 / MS_PER_HOUR
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Relic,
}

impl Rarity {
    /// Parse a loosely formatted rarity name; unknown names read as common
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "relic" | "mythic" => Rarity::Relic,
            _ => Rarity::Common,
        }
    }
}

/// Stockpiled resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Food,
    Water,
    TechFragments,
    Scrap,
    Caps,
    Medicine,
    Ammo,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Water => "water",
            Resource::TechFragments => "tech fragments",
            Resource::Scrap => "scrap",
            Resource::Caps => "caps",
            Resource::Medicine => "medicine",
            Resource::Ammo => "ammo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Relic > Rarity::Legendary);
        assert!(Rarity::Uncommon > Rarity::Common);
    }

    #[test]
    fn test_rarity_parse_lenient() {
        assert_eq!(Rarity::parse_lenient(" Rare "), Rarity::Rare);
        assert_eq!(Rarity::parse_lenient("mythic"), Rarity::Relic);
        assert_eq!(Rarity::parse_lenient("???"), Rarity::Common);
    }

    #[test]
    fn test_hours_from_negative_span_is_zero() {
        assert_eq!(hours_from_ms(-5_000), 0.0);
        assert_eq!(hours_from_ms(7_200_000), 2.0);
    }

    #[test]
    fn test_event_ids_follow_seed() {
        let a = EventId::generate(&mut seeded(9));
        let b = EventId::generate(&mut seeded(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_resource_serializes_snake_case() {
        let json = serde_json::to_string(&Resource::TechFragments).unwrap();
        assert_eq!(json, "\"tech_fragments\"");
    }
}
