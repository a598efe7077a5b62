//! Combat oracle: attack capability queries.
//!
//! Damage formulas are out of scope; the engine only asks whether and how far
//! a unit can attack.

use crate::unit::Unit;

/// Read-only access to combat capability.
pub trait CombatOracle: Send + Sync {
    /// Whether the unit is currently able to attack at all (not disarmed,
    /// stunned, or already out of actions).
    fn can_attack(&self, unit: &Unit) -> bool;

    /// Attack reach in tiles, via the equipped weapon.
    fn attack_range(&self, unit: &Unit) -> i32 {
        unit.attack_range()
    }
}
