//! Core data types for the grid-based tactical battle.
//!
//! `battle-core` defines the world model the decision engine reads (units,
//! positions, factions, actions) and the collaborator interfaces it consumes
//! (movement, combat, abilities, protection), expressed as oracle traits and
//! bundled in [`BattleEnv`]. The engine itself lives in `battle-ai`; this
//! crate carries no decision logic.
pub mod action;
pub mod env;
pub mod position;
pub mod unit;

pub use action::{Action, ActionKind};
pub use env::{
    AbilityDef, AbilityId, AbilityKind, AbilityOracle, BattleEnv, CombatOracle, Env,
    MapDimensions, MapOracle, MovementOracle, OracleError, ProtectionOracle,
};
pub use position::Position;
pub use unit::{Faction, Stats, Unit, UnitId, Weapon};
