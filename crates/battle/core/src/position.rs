//! Grid positions.

use serde::{Deserialize, Serialize};

/// A tile coordinate on the battle grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance: `|x1 - x2| + |y1 - y2|`.
    ///
    /// All movement and range checks on the grid use Manhattan distance;
    /// diagonal steps are not a thing in this ruleset.
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Returns `true` if `other` is exactly one tile away.
    #[inline]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// One step along the dominant axis toward `target`.
    ///
    /// Returns `self` unchanged when already at the target.
    pub fn step_toward(self, target: Self) -> Self {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        if dx == 0 && dy == 0 {
            return self;
        }
        if dx.abs() >= dy.abs() {
            Self::new(self.x + dx.signum(), self.y)
        } else {
            Self::new(self.x, self.y + dy.signum())
        }
    }

    /// One step along the dominant axis away from `threat`.
    ///
    /// When standing on the threat's tile, steps east as an arbitrary but
    /// deterministic choice.
    pub fn step_away(self, threat: Self) -> Self {
        let dx = self.x - threat.x;
        let dy = self.y - threat.y;
        if dx == 0 && dy == 0 {
            return Self::new(self.x + 1, self.y);
        }
        if dx.abs() >= dy.abs() {
            Self::new(self.x + dx.signum(), self.y)
        } else {
            Self::new(self.x, self.y + dy.signum())
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_sums_axes() {
        assert_eq!(
            Position::new(1, 2).manhattan_distance(Position::new(4, -1)),
            6
        );
        assert_eq!(Position::ORIGIN.manhattan_distance(Position::ORIGIN), 0);
    }

    #[test]
    fn step_toward_prefers_dominant_axis() {
        let from = Position::new(0, 0);
        assert_eq!(from.step_toward(Position::new(5, 2)), Position::new(1, 0));
        assert_eq!(from.step_toward(Position::new(1, 4)), Position::new(0, 1));
        assert_eq!(from.step_toward(from), from);
    }

    #[test]
    fn step_away_increases_distance() {
        let from = Position::new(3, 3);
        let threat = Position::new(1, 3);
        let next = from.step_away(threat);
        assert!(next.manhattan_distance(threat) > from.manhattan_distance(threat));
    }
}
