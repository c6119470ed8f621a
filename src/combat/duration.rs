//! Combat engagement duration
//!
//! Estimates how long a squad needs to clear a set of opponents, including
//! travel. Two formulas share this entry point: the universal one below and
//! the legacy compatibility formula in `combat::legacy`.

use serde::{Deserialize, Serialize};

use crate::catalog::items::ItemCatalog;
use crate::catalog::locations::TravelTimeProvider;
use crate::catalog::perks::PerkCatalog;
use crate::combat::constants::*;
use crate::combat::legacy;
use crate::combat::perks::{apply_perks, CombatStatBundle};
use crate::combat::stats::{average_level, map_stats, Combatant};
use crate::combat::weapons::normalize_weapon;

/// Which duration formula to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationFormula {
    #[default]
    Universal,
    Legacy,
}

/// Squad strength relative to the opposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerBalance {
    Overpowered,
    Balanced,
    Underpowered,
}

impl PowerBalance {
    /// Duration multiplier for this balance
    pub fn multiplier(&self) -> f64 {
        match self {
            PowerBalance::Overpowered => OVERPOWERED_MULTIPLIER,
            PowerBalance::Balanced => BALANCED_MULTIPLIER,
            PowerBalance::Underpowered => UNDERPOWERED_MULTIPLIER,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerBalance::Overpowered => "overpowered",
            PowerBalance::Balanced => "balanced",
            PowerBalance::Underpowered => "underpowered",
        }
    }
}

pub fn classify_power_ratio(ratio: f64) -> PowerBalance {
    if ratio > OVERPOWERED_RATIO {
        PowerBalance::Overpowered
    } else if ratio < UNDERPOWERED_RATIO {
        PowerBalance::Underpowered
    } else {
        PowerBalance::Balanced
    }
}

/// Enemy as seen by the duration calculators
///
/// A weapon reference wins over the inline numbers when it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub health: f64,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub damage: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Rounds per minute
    #[serde(default)]
    pub fire_rate: Option<f64>,
    #[serde(default)]
    pub defense: Option<f64>,
}

impl Opponent {
    pub fn new(name: impl Into<String>, health: f64) -> Self {
        Self {
            name: name.into(),
            health,
            weapon: None,
            damage: None,
            accuracy: None,
            fire_rate: None,
            defense: None,
        }
    }

    pub fn with_weapon(mut self, item_id: impl Into<String>) -> Self {
        self.weapon = Some(item_id.into());
        self
    }

    pub fn with_inline(mut self, damage: f64, accuracy: f64, fire_rate: f64) -> Self {
        self.damage = Some(damage);
        self.accuracy = Some(accuracy);
        self.fire_rate = Some(fire_rate);
        self
    }
}

/// Everything one duration estimate looks at
#[derive(Clone, Copy)]
pub struct EngagementRequest<'a> {
    pub squad: &'a [&'a dyn Combatant],
    pub enemies: &'a [Opponent],
    pub difficulty: u32,
    pub origin_id: &'a str,
    pub location_id: &'a str,
}

impl<'a> EngagementRequest<'a> {
    pub fn squad_level(&self) -> u32 {
        average_level(self.squad.iter().map(|c| c.level()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatDurationResult {
    pub formula: DurationFormula,
    pub duration_seconds: f64,
    pub power_ratio: f64,
    /// Squad damage per second (legacy: squad power)
    pub squad_dps: f64,
    /// Enemy damage per second (legacy: enemy power)
    pub enemy_dps: f64,
    pub difficulty_modifier: f64,
    pub balance: PowerBalance,
    /// Travel component already included in `duration_seconds`
    pub travel_seconds: f64,
}

impl CombatDurationResult {
    pub fn duration_ms(&self) -> i64 {
        (self.duration_seconds * 1000.0).round() as i64
    }
}

/// Scale factor from a perked sheet, 1.0 on any non-positive base value
fn perk_ratio(base: f64, perked: f64) -> f64 {
    if base > 0.0 {
        perked / base
    } else {
        1.0
    }
}

/// Expected damage per second of one squad member or the player
///
/// The combatant's perks adjust damage, fire rate and accuracy before the
/// weapon's reliability and the stat multiplier apply. Unarmed DPS is scaled
/// by the same relative changes.
pub fn member_dps(combatant: &dyn Combatant, items: &ItemCatalog, perks: &PerkCatalog) -> f64 {
    let canonical = map_stats(combatant);
    let multiplier = canonical.combat_damage_multiplier;
    let base = CombatStatBundle::for_combatant(combatant, items);
    let sheet = apply_perks(&base, combatant.perks(), perks);

    match normalize_weapon(combatant.equipped_weapon(), items) {
        Some(weapon) => {
            sheet.damage
                * (sheet.fire_rate / 60.0)
                * (sheet.accuracy / 100.0)
                * (weapon.reliability() / 100.0)
                * multiplier
        }
        None => {
            (UNARMED_BASE_DPS + UNARMED_DPS_PER_COMBAT_LEVEL * canonical.combat_level as f64)
                * multiplier
                * perk_ratio(base.damage, sheet.damage)
                * perk_ratio(base.fire_rate, sheet.fire_rate)
                * perk_ratio(base.accuracy, sheet.accuracy)
        }
    }
}

pub fn squad_dps(squad: &[&dyn Combatant], items: &ItemCatalog, perks: &PerkCatalog) -> f64 {
    squad
        .iter()
        .map(|c| member_dps(*c, items, perks))
        .sum::<f64>()
        .max(MIN_SIDE_DPS)
}

pub fn opponent_dps(opponent: &Opponent, items: &ItemCatalog) -> f64 {
    if let Some(weapon) = normalize_weapon(opponent.weapon.as_deref(), items) {
        return weapon.sustained_dps(1.0);
    }

    let damage = opponent.damage.unwrap_or(ENEMY_DEFAULT_DAMAGE).max(0.0);
    let rpm = opponent.fire_rate.unwrap_or(ENEMY_DEFAULT_RPM).max(0.0);
    let accuracy = opponent
        .accuracy
        .unwrap_or(ENEMY_DEFAULT_ACCURACY)
        .clamp(0.0, MAX_ACCURACY);

    damage * (rpm / 60.0) * (accuracy / 100.0) * (ENEMY_DEFAULT_RELIABILITY / 100.0)
}

pub fn enemy_dps(enemies: &[Opponent], items: &ItemCatalog) -> f64 {
    enemies
        .iter()
        .map(|e| opponent_dps(e, items))
        .sum::<f64>()
        .max(MIN_SIDE_DPS)
}

/// Scaled health pool the squad has to chew through
pub fn total_enemy_health(enemies: &[Opponent]) -> f64 {
    enemies
        .iter()
        .map(|e| e.health.max(0.0) * ENEMY_HEALTH_SCALE)
        .sum()
}

/// `difficulty^1.5`, difficulty floored at 1
pub fn difficulty_modifier(difficulty: u32) -> f64 {
    (difficulty.max(1) as f64).powf(DIFFICULTY_EXPONENT)
}

/// Estimate engagement duration with the chosen formula
///
/// Pure: identical inputs always give identical results.
pub fn calculate_duration(
    request: &EngagementRequest<'_>,
    formula: DurationFormula,
    items: &ItemCatalog,
    perks: &PerkCatalog,
    travel: &dyn TravelTimeProvider,
) -> CombatDurationResult {
    let result = match formula {
        DurationFormula::Universal => universal_duration(request, items, perks, travel),
        DurationFormula::Legacy => legacy::legacy_duration(request, items, perks, travel),
    };

    tracing::debug!(
        formula = ?formula,
        squad = request.squad.len(),
        enemies = request.enemies.len(),
        difficulty = request.difficulty,
        ratio = result.power_ratio,
        balance = result.balance.label(),
        seconds = result.duration_seconds,
        "combat duration estimated"
    );

    result
}

fn universal_duration(
    request: &EngagementRequest<'_>,
    items: &ItemCatalog,
    perks: &PerkCatalog,
    travel: &dyn TravelTimeProvider,
) -> CombatDurationResult {
    let squad = squad_dps(request.squad, items, perks);
    let enemy = enemy_dps(request.enemies, items);
    let ratio = squad / enemy;
    let balance = classify_power_ratio(ratio);
    let modifier = difficulty_modifier(request.difficulty);

    let base_seconds = total_enemy_health(request.enemies) / squad;
    let travel_seconds = travel.travel_minutes(
        request.origin_id,
        request.location_id,
        request.difficulty,
        request.squad_level(),
    ) * 60.0;

    CombatDurationResult {
        formula: DurationFormula::Universal,
        duration_seconds: base_seconds * modifier * balance.multiplier() + travel_seconds,
        power_ratio: ratio,
        squad_dps: squad,
        enemy_dps: enemy,
        difficulty_modifier: modifier,
        balance,
        travel_seconds,
    }
}
