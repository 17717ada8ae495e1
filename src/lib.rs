//! Deterministic, tick-based tactical battle simulator.
//!
//! Two teams fight on a 1-D arena under a CT turn scheduler; battles are
//! fully determined by their seed, so win rates come from running many
//! seeds and aggregating.

pub mod ai;
pub mod arena;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod error;
pub mod patch;
pub mod report;
pub mod simulation;
pub mod status;
