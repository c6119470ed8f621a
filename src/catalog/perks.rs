//! Perk catalog - named stat modifiers

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;

fn one() -> f64 {
    1.0
}

/// Effect deltas carried by a perk
///
/// Multipliers default to 1.0, additive fields to 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkEffects {
    #[serde(default = "one")]
    pub damage_mult: f64,
    #[serde(default = "one")]
    pub fire_rate_mult: f64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub morale: f64,
    #[serde(default)]
    pub intelligence: f64,
    #[serde(default)]
    pub stealth: f64,
}

impl Default for PerkEffects {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            fire_rate_mult: 1.0,
            accuracy: 0.0,
            defense: 0.0,
            health: 0.0,
            morale: 0.0,
            intelligence: 0.0,
            stealth: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub effects: PerkEffects,
}

#[derive(Debug, Clone, Default)]
pub struct PerkCatalog {
    perks: AHashMap<String, PerkDef>,
}

impl PerkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        let mut add = |id: &str, name: &str, effects: PerkEffects| {
            catalog.add(PerkDef {
                id: id.into(),
                name: name.into(),
                effects,
            });
        };

        add("bloody_mess", "Bloody Mess", PerkEffects { damage_mult: 1.05, ..Default::default() });
        add("rifleman", "Rifleman", PerkEffects { damage_mult: 1.2, ..Default::default() });
        add("commando", "Commando", PerkEffects { fire_rate_mult: 1.15, ..Default::default() });
        add("gunslinger", "Gunslinger", PerkEffects { accuracy: 10.0, ..Default::default() });
        add("toughness", "Toughness", PerkEffects { defense: 5.0, ..Default::default() });
        add("lifegiver", "Lifegiver", PerkEffects { health: 20.0, ..Default::default() });
        add("inspirational", "Inspirational", PerkEffects { morale: 10.0, ..Default::default() });
        add("sneak", "Sneak", PerkEffects { stealth: 2.0, ..Default::default() });
        add("educated", "Educated", PerkEffects { intelligence: 1.0, ..Default::default() });
        add(
            "berserker",
            "Berserker",
            PerkEffects {
                damage_mult: 1.3,
                defense: -3.0,
                ..Default::default()
            },
        );

        catalog
    }

    /// Parse a JSON array of perk definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let defs: Vec<PerkDef> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            catalog.add(def);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn add(&mut self, perk: PerkDef) {
        self.perks.insert(perk.id.clone(), perk);
    }

    pub fn get(&self, id: &str) -> Option<&PerkDef> {
        self.perks.get(id)
    }

    /// Perk ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.perks.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.perks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perks.is_empty()
    }
}
