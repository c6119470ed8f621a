//! Squad members and the player character
//!
//! The two carry different stat schemas: squad members use raw
//! combat/stealth/tech/charisma/intelligence values, the player uses the
//! seven SPECIAL attributes. `combat::stats` maps both onto one scale.

use serde::{Deserialize, Serialize};

use crate::catalog::modules::WorkerStat;
use crate::core::types::MemberId;
use crate::state::needs::{PlayerNeeds, SquadNeeds};

/// Fallback for any missing squad stat
pub const DEFAULT_RAW_STAT: f64 = 10.0;

/// Seven-axis player attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialStats {
    pub strength: i32,
    pub perception: i32,
    pub endurance: i32,
    pub charisma: i32,
    pub intelligence: i32,
    pub agility: i32,
    pub luck: i32,
}

impl Default for SpecialStats {
    fn default() -> Self {
        Self {
            strength: 5,
            perception: 5,
            endurance: 5,
            charisma: 5,
            intelligence: 5,
            agility: 5,
            luck: 5,
        }
    }
}

/// Raw squad-member stats as they appear in saved data; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadStats {
    pub combat: Option<f64>,
    pub stealth: Option<f64>,
    pub tech: Option<f64>,
    pub charisma: Option<f64>,
    pub intelligence: Option<f64>,
}

impl SquadStats {
    pub fn new(combat: f64, stealth: f64, tech: f64, charisma: f64) -> Self {
        Self {
            combat: Some(combat),
            stealth: Some(stealth),
            tech: Some(tech),
            charisma: Some(charisma),
            intelligence: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Available,
    OnMission,
    Injured,
}

fn default_level() -> u32 {
    1
}

fn default_health() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadMember {
    pub id: MemberId,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub stats: SquadStats,
    /// Some recruits come with full SPECIAL sheets; used for base work
    #[serde(default)]
    pub special: Option<SpecialStats>,
    #[serde(default)]
    pub equipped_weapon: Option<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default = "default_health")]
    pub health: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default)]
    pub needs: SquadNeeds,
}

impl SquadMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: SquadStats) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
            level: 1,
            stats,
            special: None,
            equipped_weapon: None,
            perks: Vec::new(),
            health: default_health(),
            defense: 0.0,
            status: MemberStatus::Available,
            needs: SquadNeeds::default(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_weapon(mut self, item_id: impl Into<String>) -> Self {
        self.equipped_weapon = Some(item_id.into());
        self
    }

    pub fn with_perks<S: Into<String>>(mut self, perks: impl IntoIterator<Item = S>) -> Self {
        self.perks = perks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_special(mut self, special: SpecialStats) -> Self {
        self.special = Some(special);
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == MemberStatus::Available
    }

    /// Attribute used when this member staffs a base module
    ///
    /// SPECIAL sheets are used directly; otherwise agility comes from
    /// stealth, perception from intelligence (then tech), strength from combat.
    pub fn worker_stat(&self, stat: WorkerStat) -> f64 {
        if let Some(special) = &self.special {
            let value = match stat {
                WorkerStat::Agility => special.agility,
                WorkerStat::Perception => special.perception,
                WorkerStat::Strength => special.strength,
            };
            return value.max(0) as f64;
        }

        let raw = match stat {
            WorkerStat::Agility => self.stats.stealth,
            WorkerStat::Perception => self.stats.intelligence.or(self.stats.tech),
            WorkerStat::Strength => self.stats.combat,
        };
        raw.filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_RAW_STAT)
            .max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub special: SpecialStats,
    #[serde(default)]
    pub equipped_weapon: Option<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default = "default_health")]
    pub health: f64,
    #[serde(default)]
    pub needs: PlayerNeeds,
}

impl Default for PlayerCharacter {
    fn default() -> Self {
        Self {
            name: "Wanderer".into(),
            level: 1,
            special: SpecialStats::default(),
            equipped_weapon: None,
            perks: Vec::new(),
            health: default_health(),
            needs: PlayerNeeds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_stat_prefers_special() {
        let member = SquadMember::new("m1", "Rosa", SquadStats::new(4.0, 6.0, 8.0, 5.0)).with_special(
            SpecialStats {
                agility: 9,
                ..Default::default()
            },
        );
        assert_eq!(member.worker_stat(WorkerStat::Agility), 9.0);
        assert_eq!(member.worker_stat(WorkerStat::Strength), 5.0);
    }

    #[test]
    fn test_worker_stat_from_raw_stats() {
        let member = SquadMember::new("m1", "Rosa", SquadStats::new(4.0, 6.0, 8.0, 5.0));
        assert_eq!(member.worker_stat(WorkerStat::Agility), 6.0);
        assert_eq!(member.worker_stat(WorkerStat::Strength), 4.0);
        // no intelligence on file: falls back to tech
        assert_eq!(member.worker_stat(WorkerStat::Perception), 8.0);
    }

    #[test]
    fn test_worker_stat_missing_everything() {
        let member = SquadMember::new("m1", "Ghost", SquadStats::default());
        assert_eq!(member.worker_stat(WorkerStat::Perception), DEFAULT_RAW_STAT);
    }

    #[test]
    fn test_member_deserializes_from_sparse_json() {
        let member: SquadMember =
            serde_json::from_str(r#"{"id": "m7", "name": "Dex", "stats": {"combat": 12}}"#).unwrap();
        assert_eq!(member.level, 1);
        assert_eq!(member.health, 100.0);
        assert_eq!(member.stats.combat, Some(12.0));
        assert_eq!(member.stats.tech, None);
        assert!(member.is_available());
    }
}
