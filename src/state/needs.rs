//! Survival needs for the player and squad members
//!
//! Needs run from 100 (fully satisfied) down to 0 (desperate).
//! Radiation is the exception: it accumulates from 0 up to 1000.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NEED_MAX: f64 = 100.0;
pub const RADIATION_MAX: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Need {
    Hunger,
    Thirst,
    Sleep,
    Radiation,
}

impl Need {
    pub fn label(&self) -> &'static str {
        match self {
            Need::Hunger => "hunger",
            Need::Thirst => "thirst",
            Need::Sleep => "sleep",
            Need::Radiation => "radiation",
        }
    }
}

/// Amount each need changes by; positive means "worse"
pub type NeedDeltas = BTreeMap<Need, f64>;

/// Player needs, including radiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerNeeds {
    pub hunger: f64,
    pub thirst: f64,
    pub sleep: f64,
    pub radiation: f64,
}

impl Default for PlayerNeeds {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            thirst: NEED_MAX,
            sleep: NEED_MAX,
            radiation: 0.0,
        }
    }
}

impl PlayerNeeds {
    pub fn get(&self, need: Need) -> f64 {
        match need {
            Need::Hunger => self.hunger,
            Need::Thirst => self.thirst,
            Need::Sleep => self.sleep,
            Need::Radiation => self.radiation,
        }
    }

    /// Lowest of hunger/thirst/sleep
    pub fn most_pressing(&self) -> (Need, f64) {
        [
            (Need::Hunger, self.hunger),
            (Need::Thirst, self.thirst),
            (Need::Sleep, self.sleep),
        ]
        .into_iter()
        .fold((Need::Hunger, f64::INFINITY), |acc, n| if n.1 < acc.1 { n } else { acc })
    }

    /// New needs after applying decay, clamped to their valid ranges
    pub fn after_decay(&self, deltas: &NeedDeltas) -> Self {
        let delta = |need: Need| deltas.get(&need).copied().unwrap_or(0.0);
        Self {
            hunger: clamp_need(self.hunger - delta(Need::Hunger)),
            thirst: clamp_need(self.thirst - delta(Need::Thirst)),
            sleep: clamp_need(self.sleep - delta(Need::Sleep)),
            radiation: clamp_radiation(self.radiation + delta(Need::Radiation)),
        }
    }
}

/// Squad members only track food and water
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadNeeds {
    pub hunger: f64,
    pub thirst: f64,
}

impl Default for SquadNeeds {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            thirst: NEED_MAX,
        }
    }
}

impl SquadNeeds {
    pub fn after_decay(&self, deltas: &NeedDeltas) -> Self {
        let delta = |need: Need| deltas.get(&need).copied().unwrap_or(0.0);
        Self {
            hunger: clamp_need(self.hunger - delta(Need::Hunger)),
            thirst: clamp_need(self.thirst - delta(Need::Thirst)),
        }
    }
}

fn clamp_need(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, NEED_MAX)
}

fn clamp_radiation(value: f64) -> f64 {
    if value.is_nan() {
        return RADIATION_MAX;
    }
    value.clamp(0.0, RADIATION_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_clamps_at_zero() {
        let needs = PlayerNeeds {
            hunger: 10.0,
            ..Default::default()
        };
        let deltas = NeedDeltas::from([(Need::Hunger, 100.0), (Need::Radiation, 5000.0)]);
        let after = needs.after_decay(&deltas);
        assert_eq!(after.hunger, 0.0);
        assert_eq!(after.thirst, 100.0);
        assert_eq!(after.radiation, RADIATION_MAX);
    }

    #[test]
    fn test_most_pressing() {
        let needs = PlayerNeeds {
            hunger: 70.0,
            thirst: 30.0,
            sleep: 50.0,
            radiation: 900.0,
        };
        assert_eq!(needs.most_pressing(), (Need::Thirst, 30.0));
    }

    #[test]
    fn test_squad_needs_ignore_player_only_deltas() {
        let needs = SquadNeeds::default();
        let deltas = NeedDeltas::from([(Need::Sleep, 40.0), (Need::Thirst, 12.0)]);
        let after = needs.after_decay(&deltas);
        assert_eq!(after.hunger, 100.0);
        assert_eq!(after.thirst, 88.0);
    }
}
