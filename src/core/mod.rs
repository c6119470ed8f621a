pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{EngineConfig, OfflineConfig, TravelConfig};
pub use error::{Result, SimError};
pub use types::{DisplayTime, EventId, MemberId, MissionId, Rarity, Resource, TimestampMs};
