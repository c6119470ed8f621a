//! Perk effect application
//!
//! Multipliers (damage, fire rate) stack by product; flat bonuses stack by sum.

use serde::{Deserialize, Serialize};

use crate::catalog::items::ItemCatalog;
use crate::catalog::perks::PerkCatalog;
use crate::combat::constants::MAX_ACCURACY;
use crate::combat::stats::{map_stats, raw_stats, Combatant};
use crate::combat::weapons::normalize_weapon;

/// Numeric combat sheet that perks adjust
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStatBundle {
    pub damage: f64,
    /// Attacks per minute
    pub fire_rate: f64,
    pub accuracy: f64,
    pub defense: f64,
    pub health: f64,
    pub morale: f64,
    pub intelligence: f64,
    pub stealth: f64,
}

impl CombatStatBundle {
    /// Sheet for a combatant from its weapon and mapped stats (before perks)
    pub fn for_combatant<C: Combatant + ?Sized>(combatant: &C, items: &ItemCatalog) -> Self {
        let canonical = map_stats(combatant);
        let raw = raw_stats(combatant);
        let (damage, fire_rate, accuracy) = match normalize_weapon(combatant.equipped_weapon(), items) {
            Some(weapon) => (weapon.damage(), weapon.attacks_per_minute(), weapon.accuracy()),
            None => (1.0 + canonical.combat_level as f64, 40.0, 60.0),
        };
        Self {
            damage,
            fire_rate,
            accuracy,
            defense: combatant.defense(),
            health: combatant.health(),
            morale: 50.0 + 5.0 * canonical.charisma as f64,
            intelligence: canonical.intelligence as f64,
            stealth: raw.stealth,
        }
    }
}

/// Fold perks into a stat sheet; unknown ids are skipped
pub fn apply_perks<S: AsRef<str>>(
    base: &CombatStatBundle,
    perk_ids: &[S],
    catalog: &PerkCatalog,
) -> CombatStatBundle {
    let mut damage_mult = 1.0;
    let mut fire_rate_mult = 1.0;
    let mut bonus = CombatStatBundle {
        damage: 0.0,
        fire_rate: 0.0,
        accuracy: 0.0,
        defense: 0.0,
        health: 0.0,
        morale: 0.0,
        intelligence: 0.0,
        stealth: 0.0,
    };
    let mut resolved = 0;

    for id in perk_ids {
        let id = id.as_ref();
        let Some(perk) = catalog.get(id) else {
            tracing::trace!(perk_id = id, "skipping unknown perk");
            continue;
        };
        resolved += 1;

        let fx = &perk.effects;
        damage_mult *= fx.damage_mult;
        fire_rate_mult *= fx.fire_rate_mult;
        bonus.accuracy += fx.accuracy;
        bonus.defense += fx.defense;
        bonus.health += fx.health;
        bonus.morale += fx.morale;
        bonus.intelligence += fx.intelligence;
        bonus.stealth += fx.stealth;
    }

    if resolved == 0 {
        return base.clone();
    }

    CombatStatBundle {
        damage: (base.damage * damage_mult).floor().max(1.0),
        fire_rate: base.fire_rate * fire_rate_mult,
        accuracy: (base.accuracy + bonus.accuracy).min(MAX_ACCURACY),
        defense: base.defense + bonus.defense,
        health: base.health + bonus.health,
        morale: base.morale + bonus.morale,
        intelligence: base.intelligence + bonus.intelligence,
        stealth: base.stealth + bonus.stealth,
    }
}
