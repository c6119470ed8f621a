//! Wasteland Core - deterministic combat and offline-progress simulation

pub mod catalog;
pub mod combat;
pub mod core;
pub mod offline;
pub mod state;
