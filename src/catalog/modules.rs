//! Base-module definitions - what each module type produces while staffed

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Resource;

/// Kinds of base modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Farm,
    WaterPurifier,
    Workshop,
    Barracks,
    Storage,
    MedBay,
}

/// Worker attribute that scales a module's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStat {
    Agility,
    Perception,
    Strength,
}

/// Production parameters for one module kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub kind: ModuleKind,
    /// None for support modules that produce nothing
    pub resource: Option<Resource>,
    /// Units per hour for a worker whose stat is 10
    pub base_rate_per_hour: f64,
    pub worker_stat: WorkerStat,
}

impl ModuleDefinition {
    /// Output over `hours` for a worker with the given stat value
    pub fn production(&self, hours: f64, worker_stat: f64) -> f64 {
        if self.resource.is_none() {
            return 0.0;
        }
        hours * self.base_rate_per_hour * (worker_stat / 10.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    definitions: AHashMap<ModuleKind, ModuleDefinition>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        let defs = [
            (ModuleKind::Farm, Some(Resource::Food), 1.0, WorkerStat::Agility),
            (ModuleKind::WaterPurifier, Some(Resource::Water), 1.2, WorkerStat::Perception),
            (ModuleKind::Workshop, Some(Resource::TechFragments), 0.5, WorkerStat::Strength),
            (ModuleKind::Barracks, None, 0.0, WorkerStat::Strength),
            (ModuleKind::Storage, None, 0.0, WorkerStat::Strength),
            (ModuleKind::MedBay, None, 0.0, WorkerStat::Perception),
        ];
        for (kind, resource, base_rate_per_hour, worker_stat) in defs {
            catalog.add(ModuleDefinition {
                kind,
                resource,
                base_rate_per_hour,
                worker_stat,
            });
        }
        catalog
    }

    pub fn add(&mut self, definition: ModuleDefinition) {
        self.definitions.insert(definition.kind, definition);
    }

    pub fn get(&self, kind: ModuleKind) -> Option<&ModuleDefinition> {
        self.definitions.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farm_rate_scales_with_stat() {
        let catalog = ModuleCatalog::with_defaults();
        let farm = catalog.get(ModuleKind::Farm).unwrap();
        assert_eq!(farm.production(10.0, 10.0), 10.0);
        assert_eq!(farm.production(10.0, 5.0), 5.0);
    }

    #[test]
    fn test_support_modules_produce_nothing() {
        let catalog = ModuleCatalog::with_defaults();
        let barracks = catalog.get(ModuleKind::Barracks).unwrap();
        assert_eq!(barracks.production(100.0, 20.0), 0.0);
    }
}
