//! Movement oracle: pathfinding results, specified only at the boundary.
//!
//! Pathfinding internals live in the surrounding simulation; the decision
//! engine only asks "where can this unit go this turn".

use crate::position::Position;
use crate::unit::Unit;

/// Read-only access to movement queries.
pub trait MovementOracle: Send + Sync {
    /// Every tile the unit can end its move on this turn.
    fn movement_range(&self, unit: &Unit) -> Vec<Position>;

    /// Whether the unit can end its move on `pos` this turn.
    fn can_move_to(&self, unit: &Unit, pos: Position) -> bool {
        self.movement_range(unit).contains(&pos)
    }
}
