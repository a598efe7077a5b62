//! Protection oracle: the recruitment collaborator's query interface.
//!
//! The business rules for which units are "protected" (recruitables, escort
//! targets) live outside this engine; only the flag and its priority weight
//! are consumed here.

use crate::unit::Unit;

/// Read-only access to protected-unit flags.
pub trait ProtectionOracle: Send + Sync {
    /// Whether the unit requires prioritized attack/defense consideration.
    fn is_protected(&self, unit: &Unit) -> bool;

    /// Relative weight of protecting (or hunting) this unit.
    ///
    /// Only meaningful when [`ProtectionOracle::is_protected`] is true.
    fn protection_priority(&self, unit: &Unit) -> f32 {
        let _ = unit;
        1.0
    }
}
