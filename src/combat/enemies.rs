//! Procedural enemy rosters for missions
//!
//! All randomness comes from the caller's RNG. Draws happen in a fixed order
//! per enemy (stats, weapon, name, perks) so a seed always rebuilds the same
//! roster from the same catalogs.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::items::{ItemCatalog, ItemDef};
use crate::catalog::perks::PerkCatalog;
use crate::combat::constants::*;
use crate::combat::duration::Opponent;
use crate::combat::perks::{apply_perks, CombatStatBundle};
use crate::combat::stats::average_level;
use crate::combat::weapons::{classify, profile_for, WeaponClass};
use crate::core::types::Rarity;
use crate::state::character::SquadMember;
use crate::state::mission::{EnemyTemplate, Mission};

const ARCHETYPES: &[&str] = &[
    "Raider",
    "Scavenger",
    "Feral Ghoul",
    "Mutant Brute",
    "Rogue Robot",
    "Radroach Swarm",
    "Cultist",
    "Slaver",
];

/// Raw enemy stats, same axes as a squad sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub combat: u32,
    pub stealth: u32,
    pub tech: u32,
    pub charisma: u32,
    pub intelligence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEnemy {
    pub name: String,
    pub level: u32,
    pub stats: EnemyStats,
    pub health: f64,
    pub damage: f64,
    pub accuracy: f64,
    pub defense: f64,
    /// Attacks per minute
    pub fire_rate: f64,
    pub weapon: Option<String>,
    pub perks: Vec<String>,
}

impl GeneratedEnemy {
    /// Combat sheet with the slotted perks folded in
    pub fn effective_stats(&self, perks: &PerkCatalog) -> CombatStatBundle {
        let base = CombatStatBundle {
            damage: self.damage,
            fire_rate: self.fire_rate,
            accuracy: self.accuracy,
            defense: self.defense,
            health: self.health,
            morale: 50.0,
            intelligence: self.stats.intelligence as f64,
            stealth: self.stats.stealth as f64,
        };
        apply_perks(&base, self.perks.as_slice(), perks)
    }

    /// Opponent for the duration calculators, slotted perks applied
    ///
    /// The generated numbers already include the weapon, so they go in as
    /// inline stats.
    pub fn to_opponent(&self, perks: &PerkCatalog) -> Opponent {
        let sheet = self.effective_stats(perks);
        Opponent {
            name: self.name.clone(),
            health: sheet.health,
            weapon: None,
            damage: Some(sheet.damage),
            accuracy: Some(sheet.accuracy),
            fire_rate: Some(sheet.fire_rate),
            defense: Some(sheet.defense),
        }
    }
}

/// Low-tier firearms enemies may carry, in catalog id order
fn armory(items: &ItemCatalog) -> Vec<&ItemDef> {
    items
        .sorted()
        .into_iter()
        .filter(|item| item.is_weapon())
        .filter(|item| matches!(item.rarity, Rarity::Common | Rarity::Uncommon))
        .filter(|item| matches!(classify(item), WeaponClass::Gun(_)))
        .collect()
}

fn roll_stats(difficulty: u32, rng: &mut impl Rng) -> EnemyStats {
    let mut roll = || rng.gen_range(difficulty..=difficulty.saturating_add(1));
    EnemyStats {
        combat: roll(),
        stealth: roll(),
        tech: roll(),
        charisma: roll(),
        intelligence: roll(),
    }
}

fn roll_name(template: Option<&EnemyTemplate>, rng: &mut impl Rng) -> String {
    if let Some(name) = template.and_then(|t| t.name.as_ref().or(t.kind.as_ref())) {
        return name.clone();
    }
    ARCHETYPES.choose(rng).copied().unwrap_or("Raider").to_string()
}

fn build_enemy(
    template: Option<&EnemyTemplate>,
    difficulty: u32,
    level: u32,
    armory: &[&ItemDef],
    perks: &PerkCatalog,
    rng: &mut impl Rng,
) -> GeneratedEnemy {
    let stats = roll_stats(difficulty, rng);
    let weapon = armory.choose(rng).copied();
    let name = roll_name(template, rng);

    let slots = if level >= PERK_SLOT_MIN_LEVEL { MAX_PERK_SLOTS } else { 0 };
    let perk_ids: Vec<String> = perks
        .ids()
        .choose_multiple(rng, slots)
        .map(|id| id.to_string())
        .collect();

    let combat = stats.combat as f64;
    let intelligence = stats.intelligence as f64;

    let (damage, accuracy, fire_rate) = match weapon.map(profile_for) {
        Some(profile) => (
            (profile.damage() + combat).floor().max(ENEMY_MIN_DAMAGE),
            (profile.accuracy() + intelligence)
                .floor()
                .clamp(ENEMY_MIN_ACCURACY, ENEMY_MAX_ACCURACY),
            profile.attacks_per_minute(),
        ),
        None => (
            UNARMED_ENEMY_BASE_DAMAGE + UNARMED_ENEMY_DAMAGE_PER_COMBAT * combat,
            (UNARMED_ENEMY_BASE_ACCURACY + UNARMED_ENEMY_ACCURACY_PER_INT * intelligence)
                .min(ENEMY_MAX_ACCURACY),
            ENEMY_DEFAULT_RPM,
        ),
    };

    GeneratedEnemy {
        name,
        level,
        health: ENEMY_BASE_HEALTH + (stats.combat + stats.tech) as f64 * ENEMY_HEALTH_PER_STAT,
        damage,
        accuracy,
        defense: (ENEMY_DEFENSE_PER_STAT * (stats.tech + stats.combat) as f64).floor(),
        fire_rate,
        weapon: weapon.map(|w| w.id.clone()),
        perks: perk_ids,
        stats,
    }
}

/// Generate the opposition for a mission
///
/// One enemy per template, or `max(2, difficulty + 1)` generic enemies when
/// the mission has no templates. Difficulty is clamped to
/// `1..=MAX_ENEMY_DIFFICULTY` first. Enemy level tracks the squad's mean level.
pub fn generate_enemies(
    mission: &Mission,
    squad: &[SquadMember],
    items: &ItemCatalog,
    perks: &PerkCatalog,
    rng: &mut impl Rng,
) -> Vec<GeneratedEnemy> {
    let difficulty = mission.difficulty.clamp(1, MAX_ENEMY_DIFFICULTY);
    let level = average_level(squad.iter().map(|m| m.level));
    let armory = armory(items);

    let roster: Vec<GeneratedEnemy> = if mission.enemy_templates.is_empty() {
        let count = (difficulty as usize + 1).max(MIN_UNTEMPLATED_ROSTER);
        (0..count)
            .map(|_| build_enemy(None, difficulty, level, &armory, perks, rng))
            .collect()
    } else {
        mission
            .enemy_templates
            .iter()
            .map(|t| build_enemy(Some(t), difficulty, level, &armory, perks, rng))
            .collect()
    };

    tracing::debug!(
        mission = %mission.id,
        enemies = roster.len(),
        level,
        armed = roster.iter().filter(|e| e.weapon.is_some()).count(),
        "enemy roster generated"
    );

    roster
}
