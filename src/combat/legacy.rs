//! Legacy duration formula
//!
//! Older save data was balanced against a power-sum model where each side is
//! scored by `damage × fire_rate × accuracy + health/10 + defense/2`. It is
//! kept as a selectable compatibility mode. Its constants live here and are
//! not shared with the universal formula.

use serde::{Deserialize, Serialize};

use crate::catalog::items::ItemCatalog;
use crate::catalog::locations::TravelTimeProvider;
use crate::catalog::perks::PerkCatalog;
use crate::combat::duration::{
    classify_power_ratio, difficulty_modifier, CombatDurationResult, DurationFormula,
    EngagementRequest, Opponent,
};
use crate::combat::perks::{apply_perks, CombatStatBundle};
use crate::combat::stats::Combatant;
use crate::combat::weapons::normalize_weapon;

pub const LEGACY_MIN_POWER: f64 = 0.5;
pub const LEGACY_ENEMY_DEFAULT_DEFENSE: f64 = 3.0;
pub const LEGACY_UNARMED_DAMAGE: f64 = 5.0;
pub const LEGACY_UNARMED_FIRE_RATE: f64 = 1.0;
pub const LEGACY_UNARMED_ACCURACY: f64 = 50.0;
pub const LEGACY_ENEMY_DAMAGE: f64 = 5.0;
pub const LEGACY_ENEMY_RPM: f64 = 30.0;
pub const LEGACY_ENEMY_ACCURACY: f64 = 60.0;

/// Travel slowdown by terrain keyword, first match wins
const TERRAIN_MULTIPLIERS: &[(&str, f64)] = &[
    ("valley", 1.2),
    ("forest", 1.25),
    ("city", 1.3),
    ("ruins", 1.3),
    ("desert", 1.4),
    ("mountain", 1.5),
];

/// One side's fighter in legacy terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyCombatant {
    pub damage: f64,
    /// Attacks per second
    pub fire_rate: f64,
    pub accuracy: f64,
    pub health: f64,
    pub defense: f64,
}

impl LegacyCombatant {
    pub fn unarmed(health: f64, defense: f64) -> Self {
        Self {
            damage: LEGACY_UNARMED_DAMAGE,
            fire_rate: LEGACY_UNARMED_FIRE_RATE,
            accuracy: LEGACY_UNARMED_ACCURACY,
            health,
            defense,
        }
    }

    pub fn power(&self) -> f64 {
        self.damage * self.fire_rate * self.accuracy / 100.0 + self.health / 10.0 + self.defense / 2.0
    }

    /// Fold perks into this fighter; fire rate stays in attacks per second
    pub fn with_perks<S: AsRef<str>>(self, perk_ids: &[S], perks: &PerkCatalog) -> Self {
        let base = CombatStatBundle {
            damage: self.damage,
            fire_rate: self.fire_rate,
            accuracy: self.accuracy,
            defense: self.defense,
            health: self.health,
            morale: 0.0,
            intelligence: 0.0,
            stealth: 0.0,
        };
        let sheet = apply_perks(&base, perk_ids, perks);
        Self {
            damage: sheet.damage,
            fire_rate: sheet.fire_rate,
            accuracy: sheet.accuracy,
            health: sheet.health,
            defense: sheet.defense,
        }
    }

    pub fn from_combatant(combatant: &dyn Combatant, items: &ItemCatalog, perks: &PerkCatalog) -> Self {
        let fighter = match normalize_weapon(combatant.equipped_weapon(), items) {
            Some(weapon) => Self {
                damage: weapon.damage(),
                fire_rate: weapon.attacks_per_minute() / 60.0,
                accuracy: weapon.accuracy(),
                health: combatant.health(),
                defense: combatant.defense(),
            },
            None => Self::unarmed(combatant.health(), combatant.defense()),
        };
        fighter.with_perks(combatant.perks(), perks)
    }

    pub fn from_opponent(opponent: &Opponent, items: &ItemCatalog) -> Self {
        let defense = opponent.defense.unwrap_or(LEGACY_ENEMY_DEFAULT_DEFENSE);
        match normalize_weapon(opponent.weapon.as_deref(), items) {
            Some(weapon) => Self {
                damage: weapon.damage(),
                fire_rate: weapon.attacks_per_minute() / 60.0,
                accuracy: weapon.accuracy(),
                health: opponent.health,
                defense,
            },
            None => Self {
                damage: opponent.damage.unwrap_or(LEGACY_ENEMY_DAMAGE),
                fire_rate: opponent.fire_rate.unwrap_or(LEGACY_ENEMY_RPM) / 60.0,
                accuracy: opponent.accuracy.unwrap_or(LEGACY_ENEMY_ACCURACY),
                health: opponent.health,
                defense,
            },
        }
    }
}

/// Terrain multiplier from keywords in a location id or name
pub fn legacy_travel_multiplier(location_text: &str) -> f64 {
    let text = location_text.to_ascii_lowercase();
    TERRAIN_MULTIPLIERS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, mult)| *mult)
        .unwrap_or(1.0)
}

/// Legacy formula over already-converted fighters
pub fn legacy_engagement(
    squad: &[LegacyCombatant],
    enemies: &[LegacyCombatant],
    difficulty: u32,
    location_text: &str,
) -> CombatDurationResult {
    let squad_power = squad.iter().map(LegacyCombatant::power).sum::<f64>().max(LEGACY_MIN_POWER);
    let enemy_power = enemies.iter().map(LegacyCombatant::power).sum::<f64>().max(LEGACY_MIN_POWER);
    let enemy_health: f64 = enemies.iter().map(|e| e.health.max(0.0)).sum();

    let squad_size = squad.len().max(1) as f64;
    let base_seconds = enemy_health / (squad_power / squad_size);

    let ratio = squad_power / enemy_power;
    let balance = classify_power_ratio(ratio);
    let modifier = difficulty_modifier(difficulty);
    let terrain = legacy_travel_multiplier(location_text);

    CombatDurationResult {
        formula: DurationFormula::Legacy,
        duration_seconds: base_seconds * modifier * balance.multiplier() * terrain,
        power_ratio: ratio,
        squad_dps: squad_power,
        enemy_dps: enemy_power,
        difficulty_modifier: modifier,
        balance,
        travel_seconds: 0.0,
    }
}

/// Legacy formula for a full engagement request
///
/// Travel enters as a terrain multiplier matched against the destination id
/// and its display name; the provider's minutes are not used.
pub fn legacy_duration(
    request: &EngagementRequest<'_>,
    items: &ItemCatalog,
    perks: &PerkCatalog,
    travel: &dyn TravelTimeProvider,
) -> CombatDurationResult {
    let squad: Vec<LegacyCombatant> = request
        .squad
        .iter()
        .map(|c| LegacyCombatant::from_combatant(*c, items, perks))
        .collect();
    let enemies: Vec<LegacyCombatant> = request
        .enemies
        .iter()
        .map(|o| LegacyCombatant::from_opponent(o, items))
        .collect();

    let location_text = match travel.location_name(request.location_id) {
        Some(name) => format!("{} {}", request.location_id, name),
        None => request.location_id.to_string(),
    };

    legacy_engagement(&squad, &enemies, request.difficulty, &location_text)
}
