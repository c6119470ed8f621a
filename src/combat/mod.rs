pub mod constants;
pub mod duration;
pub mod enemies;
pub mod legacy;
pub mod perks;
pub mod stats;
pub mod weapons;

pub use duration::{
    calculate_duration, CombatDurationResult, DurationFormula, EngagementRequest, Opponent,
    PowerBalance,
};
pub use enemies::{generate_enemies, GeneratedEnemy};
pub use perks::{apply_perks, CombatStatBundle};
pub use stats::{map_stats, CanonicalStats, Combatant, StatBlock};
pub use weapons::{normalize_weapon, WeaponProfile};
