//! Events produced while the player was away

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{DisplayTime, EventId, MissionId, Resource};

/// One thing that happened during an offline window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineEvent {
    pub id: EventId,
    pub display_time: DisplayTime,
    pub kind: OfflineEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfflineEventKind {
    Production {
        module_id: String,
        resource: Resource,
        amount: i64,
    },
    MissionCompleted {
        mission_id: MissionId,
        mission_name: String,
        rewards: BTreeMap<Resource, i64>,
    },
    Windfall {
        title: String,
        resource: Resource,
        amount: i64,
    },
}

impl OfflineEventKind {
    /// One-line description for banners and logs
    pub fn summary(&self) -> String {
        match self {
            OfflineEventKind::Production {
                module_id,
                resource,
                amount,
            } => format!("{} produced {} {}", module_id, amount, resource.label()),
            OfflineEventKind::MissionCompleted {
                mission_name,
                rewards,
                ..
            } => {
                if rewards.is_empty() {
                    format!("Mission complete: {}", mission_name)
                } else {
                    format!("Mission complete: {} ({})", mission_name, describe_rewards(rewards))
                }
            }
            OfflineEventKind::Windfall {
                title,
                resource,
                amount,
            } => format!("{}: +{} {}", title, amount, resource.label()),
        }
    }
}

pub fn describe_rewards(rewards: &BTreeMap<Resource, i64>) -> String {
    rewards
        .iter()
        .map(|(resource, amount)| format!("+{} {}", amount, resource.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A windfall the wasteland may throw the player's way
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlavorEvent {
    pub title: &'static str,
    pub resource: Resource,
    pub amount: i64,
}

pub const FLAVOR_EVENTS: &[FlavorEvent] = &[
    FlavorEvent {
        title: "Scavengers left a cache",
        resource: Resource::Scrap,
        amount: 15,
    },
    FlavorEvent {
        title: "Rainwater collected",
        resource: Resource::Water,
        amount: 10,
    },
    FlavorEvent {
        title: "A trader paid an old debt",
        resource: Resource::Caps,
        amount: 25,
    },
    FlavorEvent {
        title: "Wild crops ripened",
        resource: Resource::Food,
        amount: 8,
    },
    FlavorEvent {
        title: "Medical supplies found",
        resource: Resource::Medicine,
        amount: 2,
    },
];
