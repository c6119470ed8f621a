//! Player-facing summaries of offline progress

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::config::OfflineConfig;
use crate::core::types::{DisplayTime, Resource};
use crate::offline::events::{describe_rewards, OfflineEventKind};
use crate::offline::progress::{OfflineProgress, OfflineSimulator};
use crate::state::needs::Need;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: String,
    pub display_time: Option<DisplayTime>,
}

/// Human-readable span, e.g. "3h 20m" or "2d 5h"
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let minutes = elapsed_ms.max(0) / 60_000;
    if minutes < 1 {
        return "less than a minute".to_string();
    }
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Welcome-back summary followed by one banner per event
pub fn build_notifications(progress: &OfflineProgress) -> Vec<Notification> {
    let mut notifications = Vec::with_capacity(progress.events.len() + 1);

    let gains: BTreeMap<Resource, i64> = progress
        .resource_deltas
        .iter()
        .filter(|(_, amount)| **amount != 0)
        .map(|(r, a)| (*r, *a))
        .collect();
    let mut body = format!("You were away for {}.", format_elapsed(progress.elapsed_ms));
    if !gains.is_empty() {
        body.push_str(&format!(" Gathered: {}.", describe_rewards(&gains)));
    }
    if !progress.completed_missions.is_empty() {
        body.push_str(&format!(" Missions completed: {}.", progress.completed_missions.len()));
    }
    notifications.push(Notification {
        severity: Severity::Info,
        title: "Welcome back".to_string(),
        body,
        display_time: None,
    });

    for event in &progress.events {
        let (severity, title) = match &event.kind {
            OfflineEventKind::Production { .. } => (Severity::Info, "Production"),
            OfflineEventKind::MissionCompleted { .. } => (Severity::Success, "Mission complete"),
            OfflineEventKind::Windfall { .. } => (Severity::Success, "Windfall"),
        };
        notifications.push(Notification {
            severity,
            title: title.to_string(),
            body: event.kind.summary(),
            display_time: Some(event.display_time),
        });
    }

    notifications
}

/// Warnings for the player's and squad's low needs in an updated snapshot
///
/// Thresholds come from `low_need_threshold` and `radiation_warning`.
pub fn need_warnings(state: &GameState, config: &OfflineConfig) -> Vec<Notification> {
    let threshold = config.low_need_threshold;
    let mut warnings = Vec::new();
    let mut warn = |body: String| {
        warnings.push(Notification {
            severity: Severity::Warning,
            title: "Needs attention".to_string(),
            body,
            display_time: None,
        })
    };

    let needs = &state.player.needs;
    for need in [Need::Hunger, Need::Thirst, Need::Sleep] {
        let value = needs.get(need);
        if value <= threshold {
            warn(format!("{} {} is at {:.0}", state.player.name, need.label(), value));
        }
    }
    if needs.radiation >= config.radiation_warning {
        warn(format!("{} radiation is at {:.0}", state.player.name, needs.radiation));
    }

    for member in &state.squad {
        for (need, value) in [(Need::Hunger, member.needs.hunger), (Need::Thirst, member.needs.thirst)] {
            if value <= threshold {
                warn(format!("{} {} is at {:.0}", member.name, need.label(), value));
            }
        }
    }

    warnings
}

impl OfflineSimulator<'_> {
    /// Banners for a progress report plus warnings for the snapshot it produced
    pub fn notifications(&self, progress: &OfflineProgress, updated: &GameState) -> Vec<Notification> {
        let mut notifications = build_notifications(progress);
        notifications.extend(need_warnings(updated, self.config()));
        notifications
    }
}
