//! Item catalog - read-only item definitions
//!
//! Items arrive from content files with loosely populated stat blocks.
//! Every numeric stat is optional; consumers fall back to their own
//! baselines when a field is missing.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::Rarity;

/// Broad item classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Material,
    Misc,
}

/// Optional numeric fields of an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub damage: Option<f64>,
    /// Rounds per minute for guns, swings per minute for melee weapons
    pub fire_rate: Option<f64>,
    pub accuracy: Option<f64>,
    pub durability: Option<f64>,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub rarity: Rarity,
    /// Optional explicit weapon category ("pistol", "knife", "melee", ...)
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stats: ItemStats,
}

impl ItemDef {
    pub fn is_weapon(&self) -> bool {
        self.item_type == ItemType::Weapon
    }
}

/// Catalog of all known items, keyed by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: AHashMap<String, ItemDef>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in starter content
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        let guns: [(&str, &str, Rarity, f64, f64, f64); 8] = [
            ("10mm_pistol", "10mm Pistol", Rarity::Common, 12.0, 45.0, 70.0),
            ("pipe_rifle", "Pipe Rifle", Rarity::Common, 14.0, 30.0, 60.0),
            ("hunting_rifle", "Hunting Rifle", Rarity::Uncommon, 28.0, 20.0, 80.0),
            ("combat_shotgun", "Combat Shotgun", Rarity::Uncommon, 40.0, 24.0, 55.0),
            ("submachine_gun", "Submachine Gun", Rarity::Rare, 9.0, 120.0, 50.0),
            ("sniper_rifle", "Sniper Rifle", Rarity::Epic, 60.0, 12.0, 92.0),
            ("laser_rifle", "Laser Rifle", Rarity::Rare, 26.0, 40.0, 85.0),
            ("minigun", "Minigun", Rarity::Legendary, 10.0, 600.0, 40.0),
        ];
        for (id, name, rarity, damage, rpm, accuracy) in guns {
            catalog.add(ItemDef {
                id: id.into(),
                name: name.into(),
                item_type: ItemType::Weapon,
                rarity,
                category: None,
                stats: ItemStats {
                    damage: Some(damage),
                    fire_rate: Some(rpm),
                    accuracy: Some(accuracy),
                    durability: None,
                },
            });
        }

        let melee: [(&str, &str, Rarity, f64, f64); 7] = [
            ("combat_knife", "Combat Knife", Rarity::Common, 10.0, 60.0),
            ("machete", "Machete", Rarity::Common, 16.0, 45.0),
            ("baseball_bat", "Baseball Bat", Rarity::Common, 14.0, 35.0),
            ("sledgehammer", "Sledgehammer", Rarity::Uncommon, 32.0, 22.0),
            ("power_fist", "Power Fist", Rarity::Rare, 28.0, 50.0),
            ("ripper", "Ripper Chainsaw", Rarity::Epic, 22.0, 80.0),
            ("mutant_claws", "Mutant Claws", Rarity::Relic, 30.0, 65.0),
        ];
        for (id, name, rarity, damage, swings) in melee {
            catalog.add(ItemDef {
                id: id.into(),
                name: name.into(),
                item_type: ItemType::Weapon,
                rarity,
                category: None,
                stats: ItemStats {
                    damage: Some(damage),
                    fire_rate: Some(swings),
                    accuracy: None,
                    durability: Some(100.0),
                },
            });
        }

        catalog.add(ItemDef {
            id: "stimpak".into(),
            name: "Stimpak".into(),
            item_type: ItemType::Consumable,
            rarity: Rarity::Uncommon,
            category: None,
            stats: ItemStats::default(),
        });
        catalog.add(ItemDef {
            id: "leather_armor".into(),
            name: "Leather Armor".into(),
            item_type: ItemType::Armor,
            rarity: Rarity::Common,
            category: None,
            stats: ItemStats {
                durability: Some(80.0),
                ..ItemStats::default()
            },
        });

        catalog
    }

    /// Parse a JSON array of item definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let defs: Vec<ItemDef> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            catalog.add(def);
        }
        Ok(catalog)
    }

    /// Load a JSON array of item definitions from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Add an item; a later definition with the same id replaces the earlier one
    pub fn add(&mut self, item: ItemDef) {
        self.items.insert(item.id.clone(), item);
    }

    /// Get an item by id
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// All items, sorted by id so callers that draw randomly stay reproducible
    pub fn sorted(&self) -> Vec<&ItemDef> {
        let mut items: Vec<&ItemDef> = self.items.values().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_weapons_and_gear() {
        let catalog = ItemCatalog::with_defaults();
        assert!(catalog.get("10mm_pistol").unwrap().is_weapon());
        assert!(!catalog.get("stimpak").unwrap().is_weapon());
        assert!(catalog.get("plasma_caster").is_none());
    }

    #[test]
    fn test_sorted_is_stable() {
        let catalog = ItemCatalog::with_defaults();
        let ids: Vec<&str> = catalog.sorted().iter().map(|i| i.id.as_str()).collect();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_from_json_with_sparse_fields() {
        let json = r#"[
            {"id": "rusty_shiv", "name": "Rusty Shiv", "item_type": "weapon"},
            {"id": "bottlecap", "name": "Bottle Cap", "item_type": "misc", "rarity": "common"}
        ]"#;
        let catalog = ItemCatalog::from_json_str(json).unwrap();
        let shiv = catalog.get("rusty_shiv").unwrap();
        assert_eq!(shiv.rarity, Rarity::Common);
        assert_eq!(shiv.stats.damage, None);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ItemCatalog::from_json_str("{not json").is_err());
    }
}
