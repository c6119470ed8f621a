//! Missions - squad deployments with a fixed timer and a reward bundle

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{MemberId, MissionId, Resource, TimestampMs};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Active,
    Succeeded,
    Failed,
}

/// Optional per-enemy hint used by the enemy factory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplate {
    pub name: Option<String>,
    pub kind: Option<String>,
}

fn default_difficulty() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// None until the squad actually departs
    #[serde(default)]
    pub start_time_ms: Option<TimestampMs>,
    #[serde(default)]
    pub duration_ms: i64,
    #[serde(default)]
    pub assigned_members: Vec<MemberId>,
    #[serde(default)]
    pub rewards: BTreeMap<Resource, i64>,
    #[serde(default)]
    pub enemy_templates: Vec<EnemyTemplate>,
    #[serde(default)]
    pub status: MissionStatus,
    #[serde(default)]
    pub completed_at_ms: Option<TimestampMs>,
}

impl Mission {
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: u32) -> Self {
        Self {
            id: MissionId::new(id),
            name: name.into(),
            location_id: String::new(),
            difficulty,
            start_time_ms: None,
            duration_ms: 0,
            assigned_members: Vec::new(),
            rewards: BTreeMap::new(),
            enemy_templates: Vec::new(),
            status: MissionStatus::Active,
            completed_at_ms: None,
        }
    }

    pub fn at_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = location_id.into();
        self
    }

    pub fn with_reward(mut self, resource: Resource, amount: i64) -> Self {
        *self.rewards.entry(resource).or_insert(0) += amount;
        self
    }

    pub fn with_templates(mut self, templates: Vec<EnemyTemplate>) -> Self {
        self.enemy_templates = templates;
        self
    }

    /// Mark as departed at `start` with the given timer
    pub fn started(mut self, start: TimestampMs, duration_ms: i64) -> Self {
        self.start_time_ms = Some(start);
        self.duration_ms = duration_ms.max(0);
        self
    }

    /// When the timer runs out, if the mission has started
    pub fn ends_at(&self) -> Option<TimestampMs> {
        self.start_time_ms
            .map(|start| start.saturating_add(self.duration_ms.max(0)))
    }

    /// Whether the timer has run out by `now`
    pub fn is_due(&self, now: TimestampMs) -> bool {
        self.status == MissionStatus::Active && self.ends_at().is_some_and(|end| end <= now)
    }
}
