//! Wasteland Core - headless driver
//!
//! Runs the simulation against a JSON game-state snapshot: offline catch-up,
//! mission duration estimates and enemy roster previews. Results go to stdout
//! as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use wasteland_core::catalog::{ItemCatalog, LocationCatalog, ModuleCatalog, PerkCatalog};
use wasteland_core::combat::{
    calculate_duration, generate_enemies, CombatDurationResult, Combatant, DurationFormula,
    EngagementRequest, GeneratedEnemy, Opponent,
};
use wasteland_core::core::config::{config, set_config, EngineConfig};
use wasteland_core::core::error::{Result, SimError};
use wasteland_core::core::rng;
use wasteland_core::core::types::{MissionId, TimestampMs, MS_PER_HOUR};
use wasteland_core::offline::{Notification, OfflineProgress, OfflineSimulator};
use wasteland_core::state::{GameState, Mission, SquadMember};

#[derive(Parser, Debug)]
#[command(name = "wasteland")]
#[command(about = "Run wasteland simulations over a saved game state")]
struct Args {
    /// Game-state snapshot (JSON)
    #[arg(long)]
    state: PathBuf,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Item catalog (JSON array); built-in items when omitted
    #[arg(long)]
    items: Option<PathBuf>,

    /// Perk catalog (JSON array); built-in perks when omitted
    #[arg(long)]
    perks: Option<PathBuf>,

    /// Location catalog (JSON array); built-in map when omitted
    #[arg(long)]
    locations: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catch the snapshot up after time away
    Offline {
        /// Hours away
        #[arg(long, conflicts_with = "now")]
        hours: Option<f64>,

        /// Current time in ms since the epoch; elapsed = now - last seen
        #[arg(long)]
        now: Option<TimestampMs>,

        /// Write the updated snapshot here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Estimate how long a mission's engagement takes
    Duration {
        /// Mission id from the snapshot's active missions
        #[arg(long)]
        mission: String,

        /// universal or legacy; config default when omitted
        #[arg(long, value_parser = parse_formula)]
        formula: Option<DurationFormula>,

        /// Location the squad departs from
        #[arg(long, default_value = "vault")]
        origin: String,

        /// Launch the mission at this time (ms) and write the snapshot to --out
        #[arg(long, requires = "out")]
        launch_at: Option<TimestampMs>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Preview the enemy roster generated for a mission
    Enemies {
        #[arg(long)]
        mission: String,
    },
}

fn parse_formula(value: &str) -> std::result::Result<DurationFormula, String> {
    match value.to_ascii_lowercase().as_str() {
        "universal" => Ok(DurationFormula::Universal),
        "legacy" => Ok(DurationFormula::Legacy),
        other => Err(format!("unknown formula '{}' (expected universal or legacy)", other)),
    }
}

#[derive(Serialize)]
struct OfflineReport<'a> {
    seed: u64,
    progress: &'a OfflineProgress,
    notifications: &'a [Notification],
}

#[derive(Serialize)]
struct DurationReport<'a> {
    seed: u64,
    mission: &'a str,
    enemies: &'a [GeneratedEnemy],
    estimate: &'a CombatDurationResult,
}

struct Catalogs {
    items: ItemCatalog,
    perks: PerkCatalog,
    locations: LocationCatalog,
}

impl Catalogs {
    fn load(args: &Args) -> Result<Self> {
        let travel = config().travel.clone();
        Ok(Self {
            items: match &args.items {
                Some(path) => ItemCatalog::load(path)?,
                None => ItemCatalog::with_defaults(),
            },
            perks: match &args.perks {
                Some(path) => PerkCatalog::load(path)?,
                None => PerkCatalog::with_defaults(),
            },
            locations: match &args.locations {
                Some(path) => LocationCatalog::load(path, travel)?,
                None => LocationCatalog::with_default_map(travel),
            },
        })
    }
}

fn find_mission<'a>(state: &'a GameState, id: &str) -> Result<&'a Mission> {
    state
        .active_mission(&MissionId::new(id))
        .ok_or_else(|| SimError::MissionNotFound(id.to_string()))
}

/// Assigned members, or every available member when nobody is assigned yet
fn mission_squad<'a>(state: &'a GameState, mission: &Mission) -> Vec<&'a SquadMember> {
    if mission.assigned_members.is_empty() {
        state.squad.iter().filter(|m| m.is_available()).collect()
    } else {
        state.mission_squad(mission)
    }
}

fn owned(members: &[&SquadMember]) -> Vec<SquadMember> {
    members.iter().map(|m| (*m).clone()).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wasteland_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let loaded = EngineConfig::load(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("engine config already initialised, ignoring {}", path.display());
        }
    }

    let (seed, mut rng) = match args.seed {
        Some(seed) => (seed, rng::seeded(seed)),
        None => rng::fresh(),
    };
    tracing::info!(seed, "wasteland simulation starting");

    let state = GameState::load(&args.state)?;
    let catalogs = Catalogs::load(&args)?;

    match &args.command {
        Command::Offline { hours, now, out } => {
            let elapsed_ms = match (hours, now) {
                (Some(hours), _) => (hours * MS_PER_HOUR).round() as i64,
                (None, Some(now)) => now - state.last_seen_ms,
                (None, None) => {
                    return Err(SimError::InvalidConfig(
                        "offline needs --hours or --now".to_string(),
                    ))
                }
            };

            let modules = ModuleCatalog::with_defaults();
            let simulator = OfflineSimulator::new(&modules, config().offline.clone());
            let progress = simulator.compute(&state, elapsed_ms, &mut rng);
            let updated = simulator.apply(&state, &progress);
            let notifications = simulator.notifications(&progress, &updated);

            tracing::info!(
                events = progress.events.len(),
                completed = progress.completed_missions.len(),
                "offline catch-up done"
            );

            if let Some(out) = out {
                updated.save(out)?;
                tracing::info!("updated state written to {}", out.display());
            }
            print_json(&OfflineReport {
                seed,
                progress: &progress,
                notifications: &notifications,
            })
        }

        Command::Duration {
            mission,
            formula,
            origin,
            launch_at,
            out,
        } => {
            let target = find_mission(&state, mission)?;
            let members = mission_squad(&state, target);
            let roster = generate_enemies(
                target,
                &owned(&members),
                &catalogs.items,
                &catalogs.perks,
                &mut rng,
            );
            let opponents: Vec<Opponent> = roster.iter().map(|e| e.to_opponent(&catalogs.perks)).collect();
            let squad: Vec<&dyn Combatant> = members.iter().map(|m| *m as &dyn Combatant).collect();

            let request = EngagementRequest {
                squad: &squad,
                enemies: &opponents,
                difficulty: target.difficulty,
                origin_id: origin,
                location_id: &target.location_id,
            };
            let formula = formula.unwrap_or(config().combat.default_formula);
            let estimate = calculate_duration(
                &request,
                formula,
                &catalogs.items,
                &catalogs.perks,
                &catalogs.locations,
            );

            tracing::info!(
                mission = %target.id,
                seconds = estimate.duration_seconds,
                balance = estimate.balance.label(),
                "duration estimated"
            );

            if let (Some(at), Some(out)) = (launch_at, out) {
                let ids: Vec<_> = members.iter().map(|m| m.id.clone()).collect();
                let mut launched = state.clone();
                launched.launch_mission(&target.id, &ids, *at, &estimate)?;
                launched.save(out)?;
                tracing::info!("launched state written to {}", out.display());
            }

            print_json(&DurationReport {
                seed,
                mission,
                enemies: &roster,
                estimate: &estimate,
            })
        }

        Command::Enemies { mission } => {
            let target = find_mission(&state, mission)?;
            let roster = generate_enemies(
                target,
                &owned(&mission_squad(&state, target)),
                &catalogs.items,
                &catalogs.perks,
                &mut rng,
            );
            print_json(&roster)
        }
    }
}
