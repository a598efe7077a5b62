//! Map oracle: static grid geometry.

use crate::position::Position;

/// Width and height of the battle grid in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapDimensions {
    pub width: i32,
    pub height: i32,
}

impl MapDimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Clamps `pos` to the nearest in-bounds tile.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, self.width.saturating_sub(1)),
            pos.y.clamp(0, self.height.saturating_sub(1)),
        )
    }
}

/// Read-only access to static map geometry.
pub trait MapOracle: Send + Sync {
    /// Grid dimensions.
    fn dimensions(&self) -> MapDimensions;

    /// Whether a tile can be stood on. Default: any in-bounds tile.
    fn is_passable(&self, pos: Position) -> bool {
        self.dimensions().contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_positions_in_bounds() {
        let dims = MapDimensions::new(8, 6);
        assert_eq!(dims.clamp(Position::new(-3, 2)), Position::new(0, 2));
        assert_eq!(dims.clamp(Position::new(9, 7)), Position::new(7, 5));
        assert!(dims.contains(Position::new(7, 5)));
        assert!(!dims.contains(Position::new(8, 0)));
    }
}
