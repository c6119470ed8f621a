//! Game-state snapshot owned by the caller
//!
//! The simulation reads this snapshot and returns new ones; it never keeps a
//! reference to it. Loading and saving are left to the host application; the
//! JSON helpers here exist for tooling and tests.

pub mod character;
pub mod mission;
pub mod needs;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::modules::ModuleKind;
use crate::combat::duration::CombatDurationResult;
use crate::core::error::{Result, SimError};
use crate::core::types::{MemberId, MissionId, Resource, TimestampMs};
use crate::offline::events::OfflineEvent;

pub use character::{MemberStatus, PlayerCharacter, SpecialStats, SquadMember, SquadStats};
pub use mission::{EnemyTemplate, Mission, MissionStatus};
pub use needs::{Need, NeedDeltas, PlayerNeeds, SquadNeeds};

/// A production or support module in the player's base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModule {
    pub id: String,
    pub kind: ModuleKind,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub assigned_worker: Option<MemberId>,
}

fn default_active() -> bool {
    true
}

impl BaseModule {
    pub fn new(id: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            id: id.into(),
            kind,
            active: true,
            assigned_worker: None,
        }
    }

    pub fn staffed_by(mut self, member: MemberId) -> Self {
        self.assigned_worker = Some(member);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// Moment the player was last active; offline windows start here
    pub last_seen_ms: TimestampMs,
    pub player: PlayerCharacter,
    pub squad: Vec<SquadMember>,
    pub modules: Vec<BaseModule>,
    pub active_missions: Vec<Mission>,
    pub completed_missions: Vec<Mission>,
    pub resources: BTreeMap<Resource, i64>,
    /// Audit trail of applied offline events, oldest first
    pub event_log: Vec<OfflineEvent>,
}

impl GameState {
    pub fn new(last_seen_ms: TimestampMs) -> Self {
        Self {
            last_seen_ms,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn member(&self, id: &MemberId) -> Option<&SquadMember> {
        self.squad.iter().find(|m| &m.id == id)
    }

    pub fn active_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.active_missions.iter().find(|m| &m.id == id)
    }

    pub fn resource(&self, resource: Resource) -> i64 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    /// Members assigned to a mission, in assignment order; unknown ids are skipped
    pub fn mission_squad(&self, mission: &Mission) -> Vec<&SquadMember> {
        mission
            .assigned_members
            .iter()
            .filter_map(|id| self.member(id))
            .collect()
    }

    /// Send available members on a mission whose timer comes from a duration estimate
    ///
    /// Members that are unknown or busy are left out. Returns the ids that
    /// were actually assigned.
    pub fn launch_mission(
        &mut self,
        mission_id: &MissionId,
        members: &[MemberId],
        now: TimestampMs,
        estimate: &CombatDurationResult,
    ) -> Result<Vec<MemberId>> {
        let mission_idx = self
            .active_missions
            .iter()
            .position(|m| &m.id == mission_id)
            .ok_or_else(|| SimError::MissionNotFound(mission_id.to_string()))?;

        let mut assigned = Vec::new();
        for member in self.squad.iter_mut() {
            if members.contains(&member.id) && member.is_available() {
                member.status = MemberStatus::OnMission;
                assigned.push(member.id.clone());
            }
        }

        let mission = &mut self.active_missions[mission_idx];
        mission.assigned_members = assigned.clone();
        mission.start_time_ms = Some(now);
        mission.duration_ms = estimate.duration_ms();

        tracing::debug!(
            mission = %mission_id,
            squad = assigned.len(),
            duration_ms = mission.duration_ms,
            "mission launched"
        );

        Ok(assigned)
    }
}
