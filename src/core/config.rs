//! Engine configuration with documented constants
//!
//! Tunable rates are collected here with notes on how they interact.
//! Fixed formula constants (caps, policy multipliers) live next to the
//! formulas in `combat::constants` and `combat::legacy` instead.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::duration::DurationFormula;
use crate::core::error::{Result, SimError};

/// Top-level configuration, usually loaded from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub combat: CombatConfig,
    pub travel: TravelConfig,
    pub offline: OfflineConfig,
}

/// Combat calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Formula used when a caller does not pick one explicitly
    pub default_formula: DurationFormula,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            default_formula: DurationFormula::Universal,
        }
    }
}

/// Travel-time settings for the built-in location catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Minutes of travel per map unit at difficulty 1 with a level 1 squad
    pub minutes_per_unit: f64,

    /// Lower bound for any resolved trip
    ///
    /// Keeps a mission next door from finishing instantly.
    pub min_minutes: f64,

    /// Used when either endpoint is not in the catalog
    pub default_minutes: f64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            minutes_per_unit: 2.0,
            min_minutes: 5.0,
            default_minutes: 30.0,
        }
    }
}

/// Offline catch-up rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    // === NEEDS ===
    /// Hunger lost per hour away (needs run 100 = sated .. 0 = starving)
    ///
    /// At 2.0 a full stomach empties in a little over two days.
    pub hunger_per_hour: f64,

    /// Thirst lost per hour away
    ///
    /// Faster than hunger so water production matters more.
    pub thirst_per_hour: f64,

    /// Sleep lost per hour away (player only)
    pub sleep_per_hour: f64,

    /// Radiation gained per hour away (player only, capped at 1000)
    pub radiation_per_hour: f64,

    // === FLAVOR EVENTS ===
    /// Windfall chance contributed by each hour away
    pub flavor_chance_per_hour: f64,

    /// Windfall chance never exceeds this
    pub flavor_chance_cap: f64,

    // === REPORTING ===
    /// Needs at or below this value produce a warning notification
    pub low_need_threshold: f64,

    /// Player radiation at or above this value produces a warning
    ///
    /// Well under the 1000 cap so there is time to find RadAway.
    pub radiation_warning: f64,

    /// Maximum number of events kept in `GameState::event_log`
    ///
    /// Oldest entries are dropped first.
    pub event_log_limit: usize,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            hunger_per_hour: 2.0,
            thirst_per_hour: 3.0,
            sleep_per_hour: 1.5,
            radiation_per_hour: 0.5,

            flavor_chance_per_hour: 0.1,
            flavor_chance_cap: 0.8,

            low_need_threshold: 20.0,
            radiation_warning: 600.0,
            event_log_limit: 200,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let offline = &self.offline;
        let rates = [
            ("hunger_per_hour", offline.hunger_per_hour),
            ("thirst_per_hour", offline.thirst_per_hour),
            ("sleep_per_hour", offline.sleep_per_hour),
            ("radiation_per_hour", offline.radiation_per_hour),
            ("flavor_chance_per_hour", offline.flavor_chance_per_hour),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }

        if !(0.0..=1.0).contains(&offline.flavor_chance_cap) {
            return Err(SimError::InvalidConfig(format!(
                "flavor_chance_cap ({}) must be within 0..=1",
                offline.flavor_chance_cap
            )));
        }

        if !(0.0..=1000.0).contains(&offline.radiation_warning) {
            return Err(SimError::InvalidConfig(format!(
                "radiation_warning ({}) must be within 0..=1000",
                offline.radiation_warning
            )));
        }

        let travel = &self.travel;
        if travel.min_minutes <= 0.0 || travel.default_minutes < travel.min_minutes {
            return Err(SimError::InvalidConfig(format!(
                "travel minutes must satisfy 0 < min_minutes ({}) <= default_minutes ({})",
                travel.min_minutes, travel.default_minutes
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
