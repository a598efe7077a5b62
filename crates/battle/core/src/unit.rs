//! Combat units.
//!
//! Units are owned by the surrounding simulation; the decision engine only
//! reads them. The two per-turn flags (`has_moved`/`has_acted`) are flipped
//! by the external turn executor after a chosen action runs, never by the
//! engine itself.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Identity of a unit, unique within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Which side a unit fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    /// The player's party.
    Player,
    /// Hostile units controlled by this engine.
    Enemy,
    /// Bystanders and recruitables; hostile to `Enemy`, not to `Player`.
    Neutral,
}

impl Faction {
    /// Returns `true` if units of this faction treat `other` as a target.
    pub fn is_hostile_to(self, other: Faction) -> bool {
        match (self, other) {
            (Faction::Enemy, Faction::Player) | (Faction::Player, Faction::Enemy) => true,
            (Faction::Enemy, Faction::Neutral) | (Faction::Neutral, Faction::Enemy) => true,
            _ => false,
        }
    }
}

/// Core stat block shared by every unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub max_hp: i32,
    pub max_mp: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            attack: 10,
            defense: 10,
            speed: 5,
            max_hp: 100,
            max_mp: 20,
        }
    }
}

/// An equipped weapon. Range 1 is melee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub range: i32,
    pub power: i32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, range: i32, power: i32) -> Self {
        Self {
            name: name.into(),
            range,
            power,
        }
    }
}

/// One combat unit: identity, position, faction, stats, live resources, and
/// per-turn flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub stats: Stats,
    pub hp: i32,
    pub mp: i32,
    pub has_moved: bool,
    pub has_acted: bool,
    pub weapon: Option<Weapon>,
}

impl Unit {
    /// Creates a unit at full HP/MP with no weapon and fresh turn flags.
    pub fn new(id: UnitId, name: impl Into<String>, faction: Faction, position: Position) -> Self {
        let stats = Stats::default();
        Self {
            id,
            name: name.into(),
            faction,
            position,
            stats,
            hp: stats.max_hp,
            mp: stats.max_mp,
            has_moved: false,
            has_acted: false,
            weapon: None,
        }
    }

    /// Replaces the stat block and refills HP/MP (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self.hp = stats.max_hp;
        self.mp = stats.max_mp;
        self
    }

    /// Equips a weapon (builder pattern).
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Sets current HP, clamped to `[0, max_hp]` (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp.clamp(0, self.stats.max_hp);
        self
    }

    /// Current HP as a ratio of max HP in `[0, 1]`.
    pub fn hp_ratio(&self) -> f32 {
        if self.stats.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.stats.max_hp as f32).min(1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Attack reach in tiles: the equipped weapon's range, or 1 (unarmed
    /// melee).
    pub fn attack_range(&self) -> i32 {
        self.weapon.as_ref().map_or(1, |w| w.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostility_is_symmetric_for_enemy() {
        assert!(Faction::Enemy.is_hostile_to(Faction::Player));
        assert!(Faction::Player.is_hostile_to(Faction::Enemy));
        assert!(Faction::Enemy.is_hostile_to(Faction::Neutral));
        assert!(!Faction::Player.is_hostile_to(Faction::Neutral));
    }

    #[test]
    fn hp_ratio_clamps_to_unit_interval() {
        let unit = Unit::new(UnitId(1), "grunt", Faction::Enemy, Position::ORIGIN);
        assert_eq!(unit.hp_ratio(), 1.0);

        let hurt = unit.clone().with_hp(25);
        assert!((hurt.hp_ratio() - 0.25).abs() < f32::EPSILON);

        let dead = unit.with_hp(-5);
        assert_eq!(dead.hp_ratio(), 0.0);
        assert!(!dead.is_alive());
    }

    #[test]
    fn attack_range_defaults_to_melee() {
        let unit = Unit::new(UnitId(1), "grunt", Faction::Enemy, Position::ORIGIN);
        assert_eq!(unit.attack_range(), 1);
        let archer = unit.with_weapon(Weapon::new("shortbow", 3, 6));
        assert_eq!(archer.attack_range(), 3);
    }
}
