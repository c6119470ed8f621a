//! Combat integration tests
//!
//! End-to-end checks of the duration calculator over real catalogs: the
//! reference engagements for both formulas, purity and difficulty scaling.

use wasteland_core::catalog::{FixedTravelTime, ItemCatalog, LocationCatalog, PerkCatalog};
use wasteland_core::combat::duration::member_dps;
use wasteland_core::combat::legacy::{legacy_engagement, LegacyCombatant};
use wasteland_core::combat::{
    calculate_duration, generate_enemies, Combatant, DurationFormula, EngagementRequest,
    GeneratedEnemy, Opponent, PowerBalance,
};
use wasteland_core::core::rng::seeded;
use wasteland_core::state::{Mission, SquadMember, SquadStats};

fn veteran_squad() -> Vec<SquadMember> {
    vec![
        SquadMember::new("a", "Ada", SquadStats::new(14.0, 8.0, 6.0, 5.0))
            .with_level(3)
            .with_weapon("hunting_rifle"),
        SquadMember::new("b", "Bo", SquadStats::new(12.0, 10.0, 4.0, 7.0))
            .with_level(2)
            .with_weapon("combat_shotgun"),
        SquadMember::new("c", "Cy", SquadStats::new(8.0, 12.0, 12.0, 9.0)).with_level(2),
    ]
}

/// Three riflemen against two raiders at difficulty 2 in a valley
#[test]
fn test_legacy_reference_engagement() {
    let rifleman = LegacyCombatant {
        damage: 8.0,
        fire_rate: 1.5,
        accuracy: 45.0,
        health: 100.0,
        defense: 0.0,
    };
    let raider = LegacyCombatant {
        damage: 10.0,
        fire_rate: 2.0,
        accuracy: 50.0,
        health: 30.0,
        defense: 3.0,
    };

    let result = legacy_engagement(&[rifleman; 3], &[raider; 2], 2, "dry_valley Dry Valley");

    assert!((result.squad_dps - 46.2).abs() < 1e-9);
    assert!((result.enemy_dps - 29.0).abs() < 1e-9);
    assert!((result.power_ratio - 1.593).abs() < 0.001);
    assert_eq!(result.balance, PowerBalance::Balanced);
    assert!((result.duration_seconds - 15.87).abs() < 0.01);
    assert_eq!(result.formula, DurationFormula::Legacy);
}

#[test]
fn test_legacy_formula_through_request_uses_location_name() {
    let items = ItemCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let members = veteran_squad();
    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let enemies = vec![Opponent::new("Raider", 30.0), Opponent::new("Raider", 30.0)];

    let valley_request = EngagementRequest {
        squad: &squad,
        enemies: &enemies,
        difficulty: 2,
        origin_id: "vault",
        location_id: "dry_valley",
    };
    let vault_request = EngagementRequest {
        location_id: "vault",
        ..valley_request
    };

    let perks = PerkCatalog::with_defaults();
    let valley = calculate_duration(&valley_request, DurationFormula::Legacy, &items, &perks, &locations);
    let vault = calculate_duration(&vault_request, DurationFormula::Legacy, &items, &perks, &locations);
    assert!((valley.duration_seconds / vault.duration_seconds - 1.2).abs() < 1e-9);
    assert_eq!(valley.travel_seconds, 0.0);
}

#[test]
fn test_unarmed_combat_level_four() {
    let items = ItemCatalog::with_defaults();
    let member = SquadMember::new("m", "Kit", SquadStats::new(8.0, 5.0, 5.0, 5.0));
    assert!((member_dps(&member, &items, &PerkCatalog::with_defaults()) - 2.4).abs() < 1e-9);
}

#[test]
fn test_duration_is_pure() {
    let items = ItemCatalog::with_defaults();
    let perks = PerkCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let members = veteran_squad();
    let before = members.clone();
    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let enemies = vec![
        Opponent::new("Raider", 60.0).with_weapon("pipe_rifle"),
        Opponent::new("Ghoul", 45.0).with_inline(9.0, 55.0, 40.0),
    ];
    let request = EngagementRequest {
        squad: &squad,
        enemies: &enemies,
        difficulty: 3,
        origin_id: "vault",
        location_id: "old_city_ruins",
    };

    for formula in [DurationFormula::Universal, DurationFormula::Legacy] {
        let first = calculate_duration(&request, formula, &items, &perks, &locations);
        let second = calculate_duration(&request, formula, &items, &perks, &locations);
        assert_eq!(first.duration_seconds.to_bits(), second.duration_seconds.to_bits());
        assert_eq!(first, second);
    }
    assert_eq!(members, before);
}

#[test]
fn test_duration_grows_with_difficulty() {
    let items = ItemCatalog::with_defaults();
    let perks = PerkCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let members = veteran_squad();
    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let enemies = vec![Opponent::new("Raider", 50.0).with_weapon("10mm_pistol")];

    for formula in [DurationFormula::Universal, DurationFormula::Legacy] {
        let mut previous = 0.0;
        for difficulty in 1..=8 {
            let request = EngagementRequest {
                squad: &squad,
                enemies: &enemies,
                difficulty,
                origin_id: "vault",
                location_id: "glowing_desert",
            };
            let result = calculate_duration(&request, formula, &items, &perks, &locations);
            assert!(
                result.duration_seconds > previous,
                "{:?} difficulty {} did not increase duration",
                formula,
                difficulty
            );
            previous = result.duration_seconds;
        }
    }
}

#[test]
fn test_policy_applied_once() {
    let items = ItemCatalog::with_defaults();
    let members = veteran_squad();
    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let enemies = vec![Opponent::new("Radroach", 5.0)];
    let request = EngagementRequest {
        squad: &squad,
        enemies: &enemies,
        difficulty: 1,
        origin_id: "vault",
        location_id: "vault",
    };

    let result = calculate_duration(
        &request,
        DurationFormula::Universal,
        &items,
        &PerkCatalog::with_defaults(),
        &FixedTravelTime(0.0),
    );
    assert_eq!(result.balance, PowerBalance::Overpowered);
    // a zero fixed trip still takes the 5 minute floor
    assert_eq!(result.travel_seconds, 300.0);
    let base = 5.0 * 30.0 / result.squad_dps;
    assert!((result.duration_seconds - (base * 0.6 + 300.0)).abs() < 1e-9);
}

#[test]
fn test_generated_roster_feeds_calculator() {
    let items = ItemCatalog::with_defaults();
    let perks = PerkCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let members = veteran_squad();
    let mission = Mission::new("m1", "Clear the Ruins", 3).at_location("old_city_ruins");

    let roster = generate_enemies(&mission, &members, &items, &perks, &mut seeded(2024));
    let opponents: Vec<Opponent> = roster.iter().map(|e| e.to_opponent(&perks)).collect();
    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let request = EngagementRequest {
        squad: &squad,
        enemies: &opponents,
        difficulty: mission.difficulty,
        origin_id: "vault",
        location_id: &mission.location_id,
    };

    let result = calculate_duration(&request, DurationFormula::Universal, &items, &perks, &locations);
    assert_eq!(opponents.len(), 4);
    assert!(result.duration_seconds > result.travel_seconds);
    assert!(result.travel_seconds >= 5.0 * 60.0);

    let replay = generate_enemies(&mission, &members, &items, &perks, &mut seeded(2024));
    assert_eq!(roster, replay);
}

#[test]
fn test_damage_perks_shorten_the_fight() {
    let items = ItemCatalog::with_defaults();
    let perks = PerkCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let plain = veteran_squad();
    let perked: Vec<SquadMember> = plain
        .iter()
        .cloned()
        .map(|m| m.with_perks(["rifleman", "commando", "bloody_mess"]))
        .collect();
    let enemies = vec![Opponent::new("Raider", 60.0), Opponent::new("Raider", 60.0)];

    for formula in [DurationFormula::Universal, DurationFormula::Legacy] {
        let durations: Vec<f64> = [&plain, &perked]
            .iter()
            .map(|members| {
                let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
                let request = EngagementRequest {
                    squad: &squad,
                    enemies: &enemies,
                    difficulty: 2,
                    origin_id: "vault",
                    location_id: "dry_valley",
                };
                calculate_duration(&request, formula, &items, &perks, &locations).duration_seconds
            })
            .collect();
        assert!(
            durations[1] < durations[0],
            "{:?}: perked {} not shorter than plain {}",
            formula,
            durations[1],
            durations[0]
        );
    }
}

#[test]
fn test_enemy_perks_lengthen_the_fight() {
    let items = ItemCatalog::with_defaults();
    let perks = PerkCatalog::with_defaults();
    let locations = LocationCatalog::with_defaults();
    let members = veteran_squad();
    let mission = Mission::new("m1", "Clear the Ruins", 2).at_location("old_city_ruins");

    let mut roster = generate_enemies(&mission, &members, &items, &perks, &mut seeded(7));
    for enemy in &mut roster {
        enemy.perks.clear();
    }
    let mut hardened = roster.clone();
    for enemy in &mut hardened {
        enemy.perks = vec!["lifegiver".into()];
    }

    let squad: Vec<&dyn Combatant> = members.iter().map(|m| m as &dyn Combatant).collect();
    let estimate = |enemies: &[GeneratedEnemy]| {
        let opponents: Vec<Opponent> = enemies.iter().map(|e| e.to_opponent(&perks)).collect();
        let request = EngagementRequest {
            squad: &squad,
            enemies: &opponents,
            difficulty: mission.difficulty,
            origin_id: "vault",
            location_id: &mission.location_id,
        };
        calculate_duration(&request, DurationFormula::Universal, &items, &perks, &locations).duration_seconds
    };

    assert!(estimate(&hardened) > estimate(&roster));
}
