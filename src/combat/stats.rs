//! Stat mapping onto the canonical 0-10 scale
//!
//! Squad members and the player describe themselves with different stat
//! sheets. Both go through an intermediate `RawCombatStats` (1-20 scale)
//! and then the same downstream formulas.

use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::state::character::{PlayerCharacter, SpecialStats, SquadMember, SquadStats, DEFAULT_RAW_STAT};

/// Which stat sheet a combatant carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatBlock<'a> {
    Special(&'a SpecialStats),
    Squad(&'a SquadStats),
}

/// Read-only view of a combat participant
pub trait Combatant {
    fn stat_block(&self) -> StatBlock<'_>;

    fn equipped_weapon(&self) -> Option<&str>;

    fn level(&self) -> u32;

    /// Perk ids folded into combat numbers
    fn perks(&self) -> &[String] {
        &[]
    }

    fn health(&self) -> f64 {
        100.0
    }

    fn defense(&self) -> f64 {
        0.0
    }
}

impl Combatant for SquadMember {
    fn stat_block(&self) -> StatBlock<'_> {
        StatBlock::Squad(&self.stats)
    }

    fn equipped_weapon(&self) -> Option<&str> {
        self.equipped_weapon.as_deref()
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn perks(&self) -> &[String] {
        &self.perks
    }

    fn health(&self) -> f64 {
        self.health
    }

    fn defense(&self) -> f64 {
        self.defense
    }
}

impl Combatant for PlayerCharacter {
    fn stat_block(&self) -> StatBlock<'_> {
        StatBlock::Special(&self.special)
    }

    fn equipped_weapon(&self) -> Option<&str> {
        self.equipped_weapon.as_deref()
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn perks(&self) -> &[String] {
        &self.perks
    }

    fn health(&self) -> f64 {
        self.health
    }
}

/// Intermediate stats on the 1-20 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCombatStats {
    pub combat: f64,
    pub stealth: f64,
    pub tech: f64,
    pub charisma: f64,
    pub intelligence: f64,
}

/// Four-axis 0-10 bundle plus the derived damage multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalStats {
    pub intelligence: u8,
    pub survival: u8,
    pub combat_level: u8,
    pub charisma: u8,
    pub combat_damage_multiplier: f64,
}

impl CanonicalStats {
    pub fn new(intelligence: u8, survival: u8, combat_level: u8, charisma: u8) -> Self {
        let combat_level = combat_level.min(CANONICAL_MAX as u8);
        Self {
            intelligence: intelligence.min(CANONICAL_MAX as u8),
            survival: survival.min(CANONICAL_MAX as u8),
            combat_level,
            charisma: charisma.min(CANONICAL_MAX as u8),
            combat_damage_multiplier: damage_multiplier(combat_level),
        }
    }
}

/// `1 + 0.25 × combat_level`
pub fn damage_multiplier(combat_level: u8) -> f64 {
    1.0 + DAMAGE_MULT_PER_COMBAT_LEVEL * combat_level as f64
}

fn clamp_raw(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_RAW_STAT;
    }
    value.clamp(RAW_STAT_MIN, RAW_STAT_MAX)
}

fn to_canonical(value: f64) -> u8 {
    value.round().clamp(0.0, CANONICAL_MAX) as u8
}

/// Player SPECIAL sheet → raw combat stats
pub fn special_to_raw(special: &SpecialStats) -> RawCombatStats {
    let strength = special.strength as f64;
    let perception = special.perception as f64;
    let agility = special.agility as f64;

    let tech = clamp_raw(special.intelligence as f64);
    RawCombatStats {
        combat: clamp_raw((0.6 * strength + 0.4 * perception).round()),
        stealth: clamp_raw((0.8 * agility + 0.2 * perception).round()),
        tech,
        charisma: clamp_raw(special.charisma as f64),
        intelligence: tech,
    }
}

/// Squad sheet → raw combat stats; missing values read as 10,
/// missing intelligence falls back to tech first
pub fn squad_to_raw(stats: &SquadStats) -> RawCombatStats {
    let read = |value: Option<f64>| clamp_raw(value.unwrap_or(DEFAULT_RAW_STAT));
    RawCombatStats {
        combat: read(stats.combat),
        stealth: read(stats.stealth),
        tech: read(stats.tech),
        charisma: read(stats.charisma),
        intelligence: read(stats.intelligence.or(stats.tech)),
    }
}

/// Raw 1-20 stats → canonical 0-10 bundle
pub fn raw_to_canonical(raw: &RawCombatStats) -> CanonicalStats {
    CanonicalStats::new(
        to_canonical(raw.intelligence / 2.0),
        to_canonical((raw.stealth + raw.tech) / 4.0),
        to_canonical(raw.combat / 2.0),
        to_canonical(raw.charisma / 2.0),
    )
}

pub fn raw_stats<C: Combatant + ?Sized>(combatant: &C) -> RawCombatStats {
    match combatant.stat_block() {
        StatBlock::Special(special) => special_to_raw(special),
        StatBlock::Squad(stats) => squad_to_raw(stats),
    }
}

/// Canonical stats for any combatant
pub fn map_stats<C: Combatant + ?Sized>(combatant: &C) -> CanonicalStats {
    raw_to_canonical(&raw_stats(combatant))
}

/// Rounded mean level, never below 1
pub fn average_level(levels: impl IntoIterator<Item = u32>) -> u32 {
    let (sum, count) = levels
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), level| (sum + level as u64, count + 1));
    if count == 0 {
        return 1;
    }
    ((sum as f64 / count as f64).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_path() {
        let special = SpecialStats {
            strength: 8,
            perception: 6,
            endurance: 5,
            charisma: 4,
            intelligence: 7,
            agility: 9,
            luck: 5,
        };
        let raw = special_to_raw(&special);
        // 0.6*8 + 0.4*6 = 7.2 -> 7 ; 0.8*9 + 0.2*6 = 8.4 -> 8
        assert_eq!(raw.combat, 7.0);
        assert_eq!(raw.stealth, 8.0);
        assert_eq!(raw.tech, 7.0);
        assert_eq!(raw.intelligence, 7.0);

        let canonical = raw_to_canonical(&raw);
        assert_eq!(canonical.combat_level, 4); // round(3.5)
        assert_eq!(canonical.survival, 4); // round(15/4 = 3.75)
        assert_eq!(canonical.intelligence, 4); // round(3.5)
        assert_eq!(canonical.charisma, 2);
        assert_eq!(canonical.combat_damage_multiplier, 2.0);
    }

    #[test]
    fn test_squad_path_defaults() {
        let stats = SquadStats {
            combat: Some(12.0),
            stealth: None,
            tech: Some(6.0),
            charisma: None,
            intelligence: None,
        };
        let raw = squad_to_raw(&stats);
        assert_eq!(raw.stealth, 10.0);
        assert_eq!(raw.intelligence, 6.0);

        let raw = squad_to_raw(&SquadStats::default());
        assert_eq!(raw.intelligence, 10.0);
    }

    #[test]
    fn test_raw_values_clamped() {
        let stats = SquadStats {
            combat: Some(400.0),
            stealth: Some(-3.0),
            tech: Some(f64::NAN),
            charisma: Some(20.0),
            intelligence: Some(0.0),
        };
        let raw = squad_to_raw(&stats);
        assert_eq!(raw.combat, 20.0);
        assert_eq!(raw.stealth, 1.0);
        assert_eq!(raw.tech, 10.0);
        assert_eq!(raw.intelligence, 1.0);

        let canonical = raw_to_canonical(&raw);
        assert_eq!(canonical.combat_level, 10);
        assert_eq!(canonical.combat_damage_multiplier, 3.5);
    }

    #[test]
    fn test_special_extremes_clamped() {
        let special = SpecialStats {
            strength: 99,
            perception: 99,
            intelligence: -4,
            ..Default::default()
        };
        let raw = special_to_raw(&special);
        assert_eq!(raw.combat, 20.0);
        assert_eq!(raw.tech, 1.0);
    }

    #[test]
    fn test_map_stats_dispatches_by_schema() {
        let member = SquadMember::new("m1", "Kit", SquadStats::new(8.0, 4.0, 4.0, 6.0));
        let canonical = map_stats(&member);
        assert_eq!(canonical.combat_level, 4);
        assert_eq!(canonical.survival, 2);

        let player = PlayerCharacter::default();
        let canonical = map_stats(&player);
        // all SPECIAL 5: combat 5, stealth 5, tech 5
        assert_eq!(canonical.combat_level, 3); // round(2.5)
        assert_eq!(canonical.survival, 3); // round(2.5)
    }

    #[test]
    fn test_map_stats_does_not_touch_input() {
        let member = SquadMember::new("m1", "Kit", SquadStats::default());
        let before = member.clone();
        let _ = map_stats(&member);
        assert_eq!(member, before);
    }

    #[test]
    fn test_average_level() {
        assert_eq!(average_level([1, 2, 2]), 2);
        assert_eq!(average_level([3, 4]), 4); // 3.5 rounds up
        assert_eq!(average_level(Vec::<u32>::new()), 1);
        assert_eq!(average_level([0, 0]), 1);
    }
}
