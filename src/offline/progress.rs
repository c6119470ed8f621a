//! Offline catch-up: what happened while the player was away
//!
//! `compute` looks at a snapshot and an elapsed span and describes the
//! consequences; `apply` folds that description into a new snapshot. Neither
//! touches the input state.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::modules::ModuleCatalog;
use crate::core::config::OfflineConfig;
use crate::core::types::{
    hours_from_ms, DisplayTime, EventId, MemberId, MissionId, Resource, TimestampMs,
};
use crate::offline::events::{OfflineEvent, OfflineEventKind, FLAVOR_EVENTS};
use crate::state::mission::MissionStatus;
use crate::state::needs::{Need, NeedDeltas, NEED_MAX, RADIATION_MAX};
use crate::state::GameState;
use crate::state::MemberStatus;

/// Need losses over the window, per character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeedsDecay {
    pub player: NeedDeltas,
    pub squad: BTreeMap<MemberId, NeedDeltas>,
}

/// Result of an offline computation, ready to be applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineProgress {
    pub elapsed_ms: i64,
    pub started_at: TimestampMs,
    pub resource_deltas: BTreeMap<Resource, i64>,
    pub needs_decay: NeedsDecay,
    /// Ordered by display time
    pub events: Vec<OfflineEvent>,
    pub completed_missions: Vec<MissionId>,
}

impl OfflineProgress {
    pub fn ended_at(&self) -> TimestampMs {
        self.started_at.saturating_add(self.elapsed_ms)
    }

    pub fn hours(&self) -> f64 {
        hours_from_ms(self.elapsed_ms)
    }

    pub fn delta(&self, resource: Resource) -> i64 {
        self.resource_deltas.get(&resource).copied().unwrap_or(0)
    }
}

pub struct OfflineSimulator<'a> {
    modules: &'a ModuleCatalog,
    config: OfflineConfig,
}

impl<'a> OfflineSimulator<'a> {
    pub fn new(modules: &'a ModuleCatalog, config: OfflineConfig) -> Self {
        Self { modules, config }
    }

    pub fn config(&self) -> &OfflineConfig {
        &self.config
    }

    /// Describe everything that happened during `elapsed_ms` away
    ///
    /// Negative spans count as zero. RNG draws: windfall roll, windfall pick,
    /// then a display time and an id per event in production, mission,
    /// windfall order.
    pub fn compute(&self, state: &GameState, elapsed_ms: i64, rng: &mut impl Rng) -> OfflineProgress {
        let elapsed_ms = elapsed_ms.max(0);
        let hours = hours_from_ms(elapsed_ms);
        let started_at = state.last_seen_ms;
        let ended_at = started_at.saturating_add(elapsed_ms);

        let mut deltas: BTreeMap<Resource, i64> = BTreeMap::new();
        let mut kinds: Vec<OfflineEventKind> = Vec::new();

        // === PRODUCTION ===
        for module in state.modules.iter().filter(|m| m.active) {
            let Some(worker_id) = &module.assigned_worker else {
                continue;
            };
            let Some(worker) = state.member(worker_id) else {
                tracing::trace!(module = %module.id, worker = %worker_id, "module staffed by unknown worker");
                continue;
            };
            let Some(definition) = self.modules.get(module.kind) else {
                continue;
            };
            let Some(resource) = definition.resource else {
                continue;
            };

            let amount = definition
                .production(hours, worker.worker_stat(definition.worker_stat))
                .floor() as i64;
            if amount <= 0 {
                continue;
            }
            *deltas.entry(resource).or_insert(0) += amount;
            kinds.push(OfflineEventKind::Production {
                module_id: module.id.clone(),
                resource,
                amount,
            });
        }

        // === MISSIONS ===
        let mut completed_missions = Vec::new();
        for mission in state.active_missions.iter().filter(|m| m.is_due(ended_at)) {
            for (resource, amount) in &mission.rewards {
                *deltas.entry(*resource).or_insert(0) += amount;
            }
            completed_missions.push(mission.id.clone());
            kinds.push(OfflineEventKind::MissionCompleted {
                mission_id: mission.id.clone(),
                mission_name: mission.name.clone(),
                rewards: mission.rewards.clone(),
            });
        }

        // === WINDFALL ===
        let chance = (hours * self.config.flavor_chance_per_hour).min(self.config.flavor_chance_cap);
        if rng.gen::<f64>() < chance {
            if let Some(flavor) = FLAVOR_EVENTS.choose(rng) {
                *deltas.entry(flavor.resource).or_insert(0) += flavor.amount;
                kinds.push(OfflineEventKind::Windfall {
                    title: flavor.title.to_string(),
                    resource: flavor.resource,
                    amount: flavor.amount,
                });
            }
        }

        let mut events: Vec<OfflineEvent> = kinds
            .into_iter()
            .map(|kind| {
                let offset = if elapsed_ms > 0 { rng.gen_range(0..=elapsed_ms) } else { 0 };
                OfflineEvent {
                    display_time: DisplayTime(started_at.saturating_add(offset)),
                    id: EventId::generate(rng),
                    kind,
                }
            })
            .collect();
        events.sort_by_key(|e| e.display_time);

        let needs_decay = self.needs_decay(state, hours);

        tracing::debug!(
            hours,
            events = events.len(),
            completed = completed_missions.len(),
            "offline progress computed"
        );

        OfflineProgress {
            elapsed_ms,
            started_at,
            resource_deltas: deltas,
            needs_decay,
            events,
            completed_missions,
        }
    }

    fn needs_decay(&self, state: &GameState, hours: f64) -> NeedsDecay {
        let loss = |rate: f64| (hours * rate).floor().min(NEED_MAX);
        let cfg = &self.config;

        let mut player = NeedDeltas::new();
        player.insert(Need::Hunger, loss(cfg.hunger_per_hour));
        player.insert(Need::Thirst, loss(cfg.thirst_per_hour));
        player.insert(Need::Sleep, loss(cfg.sleep_per_hour));
        player.insert(Need::Radiation, (hours * cfg.radiation_per_hour).min(RADIATION_MAX));

        let squad = state
            .squad
            .iter()
            .map(|member| {
                let mut deltas = NeedDeltas::new();
                deltas.insert(Need::Hunger, loss(cfg.hunger_per_hour));
                deltas.insert(Need::Thirst, loss(cfg.thirst_per_hour));
                (member.id.clone(), deltas)
            })
            .collect();

        NeedsDecay { player, squad }
    }

    /// Fold computed progress into a new snapshot
    ///
    /// Applying the same progress twice applies it twice.
    pub fn apply(&self, state: &GameState, progress: &OfflineProgress) -> GameState {
        let mut next = state.clone();

        for (resource, delta) in &progress.resource_deltas {
            let total = next.resources.entry(*resource).or_insert(0);
            *total = total.saturating_add(*delta).max(0);
        }

        next.player.needs = next.player.needs.after_decay(&progress.needs_decay.player);
        for member in next.squad.iter_mut() {
            if let Some(deltas) = progress.needs_decay.squad.get(&member.id) {
                member.needs = member.needs.after_decay(deltas);
            }
        }

        for mission_id in &progress.completed_missions {
            let Some(idx) = next.active_missions.iter().position(|m| &m.id == mission_id) else {
                tracing::trace!(mission = %mission_id, "completed mission no longer active");
                continue;
            };
            let mut mission = next.active_missions.remove(idx);
            mission.status = MissionStatus::Succeeded;
            mission.completed_at_ms = mission.ends_at();

            for member in next.squad.iter_mut() {
                if mission.assigned_members.contains(&member.id) {
                    member.status = MemberStatus::Available;
                }
            }
            next.completed_missions.push(mission);
        }

        next.last_seen_ms = progress.ended_at();

        next.event_log.extend(progress.events.iter().cloned());
        let limit = self.config.event_log_limit;
        if next.event_log.len() > limit {
            let excess = next.event_log.len() - limit;
            next.event_log.drain(..excess);
        }

        tracing::debug!(
            last_seen_ms = next.last_seen_ms,
            log_len = next.event_log.len(),
            "offline progress applied"
        );

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::modules::ModuleKind;
    use crate::core::rng::seeded;
    use crate::core::types::MS_PER_HOUR;
    use crate::state::character::{SpecialStats, SquadMember, SquadStats};
    use crate::state::mission::Mission;
    use crate::state::BaseModule;

    const HOUR: i64 = MS_PER_HOUR as i64;

    fn quiet_config() -> OfflineConfig {
        OfflineConfig {
            flavor_chance_per_hour: 0.0,
            ..Default::default()
        }
    }

    fn farm_state() -> GameState {
        let mut state = GameState::new(1_000);
        let worker = SquadMember::new("w1", "Ada", SquadStats::default()).with_special(SpecialStats {
            agility: 10,
            ..Default::default()
        });
        state.squad.push(worker);
        state
            .modules
            .push(BaseModule::new("farm_1", ModuleKind::Farm).staffed_by(MemberId::new("w1")));
        state
    }

    #[test]
    fn test_ten_hours_of_farming() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        let progress = sim.compute(&farm_state(), 10 * HOUR, &mut seeded(1));

        assert_eq!(progress.delta(Resource::Food), 10);
        assert_eq!(progress.needs_decay.player[&Need::Hunger], 20.0);
        assert_eq!(progress.needs_decay.player[&Need::Thirst], 30.0);
        assert_eq!(progress.needs_decay.player[&Need::Sleep], 15.0);
        assert_eq!(progress.needs_decay.player[&Need::Radiation], 5.0);
        assert_eq!(progress.events.len(), 1);
    }

    #[test]
    fn test_partial_units_are_floored() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        // 1.5 h: hunger 3, thirst 4.5 -> 4, farm 1.5 -> 1
        let progress = sim.compute(&farm_state(), HOUR * 3 / 2, &mut seeded(1));
        assert_eq!(progress.delta(Resource::Food), 1);
        assert_eq!(progress.needs_decay.player[&Need::Thirst], 4.0);
    }

    #[test]
    fn test_unstaffed_and_inactive_modules_idle() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        let mut state = farm_state();
        state.modules[0].active = false;
        state
            .modules
            .push(BaseModule::new("purifier", ModuleKind::WaterPurifier));
        state.modules.push(
            BaseModule::new("workshop", ModuleKind::Workshop).staffed_by(MemberId::new("ghost")),
        );

        let progress = sim.compute(&state, 10 * HOUR, &mut seeded(1));
        assert!(progress.resource_deltas.is_empty());
        assert!(progress.events.is_empty());
    }

    #[test]
    fn test_negative_elapsed_is_zero() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, OfflineConfig::default());
        let progress = sim.compute(&farm_state(), -5 * HOUR, &mut seeded(1));
        assert_eq!(progress.elapsed_ms, 0);
        assert!(progress.events.is_empty());
        assert_eq!(progress.needs_decay.player[&Need::Hunger], 0.0);
    }

    #[test]
    fn test_long_absence_caps_decay() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        let progress = sim.compute(&farm_state(), 5_000 * HOUR, &mut seeded(1));
        assert_eq!(progress.needs_decay.player[&Need::Hunger], NEED_MAX);
        assert_eq!(progress.needs_decay.player[&Need::Radiation], RADIATION_MAX);

        let next = sim.apply(&farm_state(), &progress);
        assert_eq!(next.player.needs.hunger, 0.0);
        assert_eq!(next.player.needs.radiation, RADIATION_MAX);
        assert_eq!(next.squad[0].needs.thirst, 0.0);
    }

    #[test]
    fn test_due_mission_completes_and_frees_squad() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        let mut state = farm_state();
        state.squad[0].status = MemberStatus::OnMission;
        let mut mission = Mission::new("m1", "Clear the Dam", 2)
            .with_reward(Resource::Caps, 30)
            .started(0, 2 * HOUR);
        mission.assigned_members = vec![MemberId::new("w1")];
        state.active_missions.push(mission);
        state
            .active_missions
            .push(Mission::new("m2", "Long Haul", 3).started(0, 100 * HOUR));

        let progress = sim.compute(&state, 2 * HOUR, &mut seeded(4));
        assert_eq!(progress.completed_missions, vec![MissionId::new("m1")]);
        assert_eq!(progress.delta(Resource::Caps), 30);

        let next = sim.apply(&state, &progress);
        assert_eq!(next.active_missions.len(), 1);
        assert_eq!(next.completed_missions[0].status, MissionStatus::Succeeded);
        assert_eq!(next.completed_missions[0].completed_at_ms, Some(2 * HOUR));
        assert_eq!(next.squad[0].status, MemberStatus::Available);
        assert_eq!(next.resource(Resource::Caps), 30);
        assert_eq!(next.last_seen_ms, 1_000 + 2 * HOUR);

        // input snapshot untouched
        assert_eq!(state.active_missions.len(), 2);
        assert_eq!(state.squad[0].status, MemberStatus::OnMission);
    }

    #[test]
    fn test_events_sorted_within_window() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(
            &modules,
            OfflineConfig {
                flavor_chance_per_hour: 1.0,
                flavor_chance_cap: 1.0,
                ..Default::default()
            },
        );
        let mut state = farm_state();
        state
            .active_missions
            .push(Mission::new("m1", "Scout", 1).started(0, HOUR));

        let progress = sim.compute(&state, 6 * HOUR, &mut seeded(12));
        assert_eq!(progress.events.len(), 3);
        for pair in progress.events.windows(2) {
            assert!(pair[0].display_time <= pair[1].display_time);
        }
        for event in &progress.events {
            assert!(event.display_time.0 >= progress.started_at);
            assert!(event.display_time.0 <= progress.ended_at());
        }
    }

    #[test]
    fn test_resource_totals_never_negative() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(&modules, quiet_config());
        let mut state = GameState::new(0);
        state.resources.insert(Resource::Ammo, 3);
        let mut progress = sim.compute(&state, HOUR, &mut seeded(1));
        progress.resource_deltas.insert(Resource::Ammo, -10);

        let next = sim.apply(&state, &progress);
        assert_eq!(next.resource(Resource::Ammo), 0);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let modules = ModuleCatalog::with_defaults();
        let sim = OfflineSimulator::new(
            &modules,
            OfflineConfig {
                flavor_chance_per_hour: 0.0,
                event_log_limit: 2,
                ..Default::default()
            },
        );
        let mut state = farm_state();
        for _ in 0..3 {
            let progress = sim.compute(&state, 10 * HOUR, &mut seeded(3));
            state = sim.apply(&state, &progress);
        }
        assert_eq!(state.event_log.len(), 2);
    }
}
