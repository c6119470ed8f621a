//! Weapon normalization
//!
//! Catalog items describe weapons loosely: a name, a rarity and whatever
//! stat fields the content author filled in. Everything downstream works on
//! a `WeaponProfile`, which is always fully populated and clamped.
//!
//! Classification is keyword based. Gun keywords are checked before melee
//! keywords so that e.g. "Pipe Rifle" is a rifle and not a pipe.

use serde::{Deserialize, Serialize};

use crate::catalog::items::{ItemCatalog, ItemDef};
use crate::combat::constants::*;
use crate::core::types::Rarity;

/// Firearm sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GunClass {
    Pistol,
    Rifle,
    Shotgun,
    Smg,
    Sniper,
    Energy,
    Heavy,
}

impl GunClass {
    /// Fallback (damage, rounds per minute, accuracy) when the item has no stats
    pub fn baseline(&self) -> (f64, f64, f64) {
        match self {
            GunClass::Pistol => (12.0, 45.0, 70.0),
            GunClass::Rifle => (18.0, 30.0, 75.0),
            GunClass::Shotgun => (35.0, 20.0, 55.0),
            GunClass::Smg => (9.0, 110.0, 50.0),
            GunClass::Sniper => (55.0, 12.0, 90.0),
            GunClass::Energy => (24.0, 40.0, 85.0),
            GunClass::Heavy => (12.0, 300.0, 40.0),
        }
    }

    fn reliability_adjustment(&self) -> f64 {
        match self {
            GunClass::Energy => ENERGY_RELIABILITY_BONUS,
            GunClass::Heavy => -HEAVY_RELIABILITY_PENALTY,
            _ => 0.0,
        }
    }
}

/// Melee sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeleeClass {
    Knife,
    Machete,
    Bat,
    Hammer,
    Gauntlet,
    Chainsaw,
    Claws,
    Generic,
}

impl MeleeClass {
    /// Fallback (damage, swings per minute, accuracy) when the item has no stats
    pub fn baseline(&self) -> (f64, f64, f64) {
        match self {
            MeleeClass::Knife => (10.0, 60.0, 85.0),
            MeleeClass::Machete => (16.0, 45.0, 80.0),
            MeleeClass::Bat => (14.0, 35.0, 75.0),
            MeleeClass::Hammer => (30.0, 22.0, 70.0),
            MeleeClass::Gauntlet => (24.0, 50.0, 80.0),
            MeleeClass::Chainsaw => (22.0, 80.0, 70.0),
            MeleeClass::Claws => (28.0, 65.0, 80.0),
            MeleeClass::Generic => (12.0, 40.0, 75.0),
        }
    }

    pub fn size(&self) -> SizeClass {
        match self {
            MeleeClass::Knife | MeleeClass::Gauntlet | MeleeClass::Claws => SizeClass::Small,
            MeleeClass::Machete | MeleeClass::Bat | MeleeClass::Generic => SizeClass::Medium,
            MeleeClass::Hammer | MeleeClass::Chainsaw => SizeClass::Large,
        }
    }
}

/// Physical size of a melee weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GunProfile {
    pub class: GunClass,
    pub damage: f64,
    pub rounds_per_minute: f64,
    pub accuracy: f64,
    pub reliability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeleeProfile {
    pub class: MeleeClass,
    pub damage: f64,
    pub swings_per_minute: f64,
    pub accuracy: f64,
    pub reliability: f64,
    pub size: SizeClass,
    pub durability: f64,
}

/// Normalized weapon, ready for combat math
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum WeaponProfile {
    Gun(GunProfile),
    Melee(MeleeProfile),
}

impl WeaponProfile {
    pub fn damage(&self) -> f64 {
        match self {
            WeaponProfile::Gun(g) => g.damage,
            WeaponProfile::Melee(m) => m.damage,
        }
    }

    /// Rounds or swings per minute
    pub fn attacks_per_minute(&self) -> f64 {
        match self {
            WeaponProfile::Gun(g) => g.rounds_per_minute,
            WeaponProfile::Melee(m) => m.swings_per_minute,
        }
    }

    pub fn accuracy(&self) -> f64 {
        match self {
            WeaponProfile::Gun(g) => g.accuracy,
            WeaponProfile::Melee(m) => m.accuracy,
        }
    }

    pub fn reliability(&self) -> f64 {
        match self {
            WeaponProfile::Gun(g) => g.reliability,
            WeaponProfile::Melee(m) => m.reliability,
        }
    }

    pub fn is_melee(&self) -> bool {
        matches!(self, WeaponProfile::Melee(_))
    }

    /// Expected damage per second: damage × attacks/s × hit chance × reliability × multiplier
    pub fn sustained_dps(&self, damage_multiplier: f64) -> f64 {
        self.damage()
            * (self.attacks_per_minute() / 60.0)
            * (self.accuracy() / 100.0)
            * (self.reliability() / 100.0)
            * damage_multiplier
    }
}

/// Reliability percentage for a rarity tier
pub fn rarity_reliability(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 70.0,
        Rarity::Uncommon => 78.0,
        Rarity::Rare => 85.0,
        Rarity::Epic => 90.0,
        Rarity::Legendary => 93.0,
        Rarity::Relic => 95.0,
    }
}

const GUN_CLASS_KEYWORDS: &[(GunClass, &[&str])] = &[
    (GunClass::Energy, &["laser", "plasma", "gauss", "energy", "blaster"]),
    (GunClass::Heavy, &["minigun", "gatling", "launcher", "flamer", "heavy"]),
    (GunClass::Sniper, &["sniper", "marksman"]),
    (GunClass::Shotgun, &["shotgun", "scattergun"]),
    (GunClass::Smg, &["smg", "submachine", "tommy"]),
    (GunClass::Pistol, &["pistol", "revolver", "handgun", "magnum", "10mm"]),
    (GunClass::Rifle, &["rifle", "carbine"]),
];

/// Words that mark a firearm without naming its class
const GENERIC_GUN_KEYWORDS: &[&str] = &["gun", "firearm", "ranged"];

const MELEE_CLASS_KEYWORDS: &[(MeleeClass, &[&str])] = &[
    (MeleeClass::Knife, &["knife", "dagger", "shiv"]),
    (MeleeClass::Machete, &["machete", "sword", "blade", "katana"]),
    (MeleeClass::Bat, &["bat", "club", "pipe"]),
    (MeleeClass::Hammer, &["hammer", "sledge", "mallet"]),
    (MeleeClass::Gauntlet, &["gauntlet", "knuckle", "fist"]),
    (MeleeClass::Chainsaw, &["chainsaw", "ripper"]),
    (MeleeClass::Claws, &["claw"]),
    (MeleeClass::Generic, &["axe", "spear", "crowbar", "wrench", "melee"]),
];

/// Short keywords only match whole words ("bat" must not match "combat")
fn text_has_keyword(words: &[&str], keyword: &str) -> bool {
    if keyword.len() <= 3 {
        words.iter().any(|w| *w == keyword)
    } else {
        words.iter().any(|w| w.contains(keyword))
    }
}

fn words_of(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn gun_class_of(words: &[&str]) -> Option<GunClass> {
    GUN_CLASS_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text_has_keyword(words, k)))
        .map(|(class, _)| *class)
        .or_else(|| {
            GENERIC_GUN_KEYWORDS
                .iter()
                .any(|k| text_has_keyword(words, k))
                .then_some(GunClass::Rifle)
        })
}

fn melee_class_of(words: &[&str]) -> Option<MeleeClass> {
    MELEE_CLASS_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text_has_keyword(words, k)))
        .map(|(class, _)| *class)
}

/// Weapon family and sub-type, before numbers are attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponClass {
    Gun(GunClass),
    Melee(MeleeClass),
}

/// Classify an item by its explicit category (if any), then by id and name
pub fn classify(item: &ItemDef) -> WeaponClass {
    let text = format!("{} {}", item.id, item.name).to_ascii_lowercase();
    let words = words_of(&text);

    if let Some(category) = &item.category {
        let category = category.to_ascii_lowercase();
        let hint = words_of(&category);
        if let Some(class) = melee_class_of(&hint) {
            // "melee" alone says nothing about the sub-type; let the name refine it
            if class == MeleeClass::Generic {
                return WeaponClass::Melee(melee_class_of(&words).unwrap_or(MeleeClass::Generic));
            }
            return WeaponClass::Melee(class);
        }
        if let Some(class) = gun_class_of(&hint) {
            if GENERIC_GUN_KEYWORDS.iter().any(|k| text_has_keyword(&hint, k)) {
                return WeaponClass::Gun(gun_class_of(&words).unwrap_or(GunClass::Rifle));
            }
            return WeaponClass::Gun(class);
        }
    }

    if let Some(class) = gun_class_of(&words) {
        return WeaponClass::Gun(class);
    }
    if let Some(class) = melee_class_of(&words) {
        return WeaponClass::Melee(class);
    }
    // Unrecognized weapons are treated as rifles
    WeaponClass::Gun(GunClass::Rifle)
}

fn stat_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Build the profile for a weapon item; the caller has already checked it is a weapon
pub fn profile_for(item: &ItemDef) -> WeaponProfile {
    let base_reliability = rarity_reliability(item.rarity);
    let stats = &item.stats;

    match classify(item) {
        WeaponClass::Gun(class) => {
            let (damage, rpm, accuracy) = class.baseline();
            let reliability = (base_reliability + class.reliability_adjustment())
                .clamp(MIN_RELIABILITY, MAX_RELIABILITY);
            WeaponProfile::Gun(GunProfile {
                class,
                damage: stat_or(stats.damage, damage).clamp(0.0, MAX_DAMAGE),
                rounds_per_minute: stat_or(stats.fire_rate, rpm).clamp(0.0, MAX_ROUNDS_PER_MINUTE),
                accuracy: stat_or(stats.accuracy, accuracy).clamp(0.0, MAX_ACCURACY),
                reliability,
            })
        }
        WeaponClass::Melee(class) => {
            let (damage, swings, accuracy) = class.baseline();
            WeaponProfile::Melee(MeleeProfile {
                class,
                damage: stat_or(stats.damage, damage).clamp(0.0, MAX_DAMAGE),
                swings_per_minute: stat_or(stats.fire_rate, swings).clamp(0.0, MAX_SWINGS_PER_MINUTE),
                accuracy: stat_or(stats.accuracy, accuracy).clamp(0.0, MAX_ACCURACY),
                reliability: base_reliability.clamp(MIN_RELIABILITY, MAX_RELIABILITY),
                size: class.size(),
                durability: stat_or(stats.durability, MAX_DURABILITY).clamp(0.0, MAX_DURABILITY),
            })
        }
    }
}

/// Resolve an item reference into a weapon profile
///
/// Returns None for a missing id, an id the catalog does not know, or an
/// item that is not a weapon. Callers fall back to unarmed numbers.
pub fn normalize_weapon(item_id: Option<&str>, items: &ItemCatalog) -> Option<WeaponProfile> {
    let id = item_id?;
    let Some(item) = items.get(id) else {
        tracing::trace!(item_id = id, "unknown weapon reference");
        return None;
    };
    if !item.is_weapon() {
        return None;
    }
    Some(profile_for(item))
}
