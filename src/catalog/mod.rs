//! Read-only content catalogs consumed by the simulation

pub mod items;
pub mod locations;
pub mod modules;
pub mod perks;

pub use items::{ItemCatalog, ItemDef, ItemStats, ItemType};
pub use locations::{FixedTravelTime, Location, LocationCatalog, TravelTimeProvider};
pub use modules::{ModuleCatalog, ModuleDefinition, ModuleKind, WorkerStat};
pub use perks::{PerkCatalog, PerkDef, PerkEffects};
