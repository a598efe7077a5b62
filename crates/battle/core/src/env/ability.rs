//! Ability oracle: usable ability queries and definitions.

use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// Identity of an ability in the surrounding simulation's catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub u16);

/// Broad ability classification the decision engine cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Restores HP to an ally.
    Heal,
    /// Damages an enemy.
    Offense,
}

/// Static definition of one ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    pub mp_cost: i32,
    pub range: i32,
}

impl AbilityDef {
    pub fn new(
        id: AbilityId,
        name: impl Into<String>,
        kind: AbilityKind,
        mp_cost: i32,
        range: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            mp_cost,
            range,
        }
    }
}

/// Read-only access to a unit's abilities.
pub trait AbilityOracle: Send + Sync {
    /// Ability ids this unit knows, in the simulation's listing order.
    fn available_abilities(&self, unit: &Unit) -> Vec<AbilityId>;

    /// Whether the unit can use the ability right now (MP, cooldowns, seals).
    fn can_use_ability(&self, unit: &Unit, id: AbilityId) -> bool;

    /// Definition lookup. `None` for ids outside the catalog.
    fn ability(&self, id: AbilityId) -> Option<AbilityDef>;
}
