//! Combat system constants - all tunable values in one place
//!
//! Legacy duration constants are kept apart in `combat::legacy`.

// Weapon normalization caps
pub const MAX_DAMAGE: f64 = 150.0;
pub const MAX_ROUNDS_PER_MINUTE: f64 = 900.0;
pub const MAX_SWINGS_PER_MINUTE: f64 = 120.0;
pub const MAX_ACCURACY: f64 = 95.0;
pub const MAX_DURABILITY: f64 = 100.0;

// Reliability (percent)
pub const MIN_RELIABILITY: f64 = 40.0;
pub const MAX_RELIABILITY: f64 = 100.0;
pub const ENERGY_RELIABILITY_BONUS: f64 = 5.0;
pub const HEAVY_RELIABILITY_PENALTY: f64 = 10.0;

// Stat mapping
pub const RAW_STAT_MIN: f64 = 1.0;
pub const RAW_STAT_MAX: f64 = 20.0;
pub const CANONICAL_MAX: f64 = 10.0;
pub const DAMAGE_MULT_PER_COMBAT_LEVEL: f64 = 0.25;

// Universal duration formula
pub const UNARMED_BASE_DPS: f64 = 0.2;
pub const UNARMED_DPS_PER_COMBAT_LEVEL: f64 = 0.25;
pub const MIN_SIDE_DPS: f64 = 0.5;
pub const ENEMY_HEALTH_SCALE: f64 = 30.0;
pub const DIFFICULTY_EXPONENT: f64 = 1.5;

// Inline enemy weapon defaults
pub const ENEMY_DEFAULT_DAMAGE: f64 = 5.0;
pub const ENEMY_DEFAULT_ACCURACY: f64 = 60.0;
pub const ENEMY_DEFAULT_RPM: f64 = 30.0;
pub const ENEMY_DEFAULT_RELIABILITY: f64 = 75.0;

// Power-ratio policy
pub const OVERPOWERED_RATIO: f64 = 2.0;
pub const UNDERPOWERED_RATIO: f64 = 0.5;
pub const OVERPOWERED_MULTIPLIER: f64 = 0.6;
pub const UNDERPOWERED_MULTIPLIER: f64 = 2.5;
pub const BALANCED_MULTIPLIER: f64 = 1.2;

// Enemy generation
/// Mission difficulty is clamped to this before rolling enemies
pub const MAX_ENEMY_DIFFICULTY: u32 = 20;
pub const ENEMY_BASE_HEALTH: f64 = 40.0;
pub const ENEMY_HEALTH_PER_STAT: f64 = 5.0;
pub const ENEMY_MIN_DAMAGE: f64 = 4.0;
pub const ENEMY_MIN_ACCURACY: f64 = 35.0;
pub const ENEMY_MAX_ACCURACY: f64 = 95.0;
pub const UNARMED_ENEMY_BASE_DAMAGE: f64 = 6.0;
pub const UNARMED_ENEMY_DAMAGE_PER_COMBAT: f64 = 2.0;
pub const UNARMED_ENEMY_BASE_ACCURACY: f64 = 45.0;
pub const UNARMED_ENEMY_ACCURACY_PER_INT: f64 = 3.0;
pub const ENEMY_DEFENSE_PER_STAT: f64 = 1.5;
pub const MIN_UNTEMPLATED_ROSTER: usize = 2;
pub const PERK_SLOT_MIN_LEVEL: u32 = 2;
pub const MAX_PERK_SLOTS: usize = 2;
