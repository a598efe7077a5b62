//! The committed action, the sole output of a decision cycle.

use serde::{Deserialize, Serialize};

use crate::env::AbilityId;
use crate::position::Position;
use crate::unit::UnitId;

/// What kind of action a unit takes this turn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Move,
    UseAbility,
    Wait,
    Guard,
}

/// A fully specified action, consumed by the external turn executor.
///
/// Exactly one of these is produced per unit per turn. The justification is
/// always non-empty and explains the choice in human-readable terms for
/// debugging and telemetry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub priority: f32,
    pub target: Option<UnitId>,
    pub destination: Option<Position>,
    pub ability: Option<AbilityId>,
    pub justification: String,
}

impl Action {
    pub fn attack(target: UnitId, priority: f32, justification: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Attack,
            priority,
            target: Some(target),
            destination: None,
            ability: None,
            justification: justification.into(),
        }
    }

    pub fn move_to(destination: Position, priority: f32, justification: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Move,
            priority,
            target: None,
            destination: Some(destination),
            ability: None,
            justification: justification.into(),
        }
    }

    pub fn use_ability(
        ability: AbilityId,
        target: Option<UnitId>,
        priority: f32,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::UseAbility,
            priority,
            target,
            destination: None,
            ability: Some(ability),
            justification: justification.into(),
        }
    }

    /// Wait carries minimal priority; it is the universal fallback.
    pub fn wait(justification: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Wait,
            priority: 0.0,
            target: None,
            destination: None,
            ability: None,
            justification: justification.into(),
        }
    }

    pub fn guard(priority: f32, justification: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Guard,
            priority,
            target: None,
            destination: None,
            ability: None,
            justification: justification.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_the_relevant_slots() {
        let attack = Action::attack(UnitId(3), 42.0, "closest threat");
        assert_eq!(attack.kind, ActionKind::Attack);
        assert_eq!(attack.target, Some(UnitId(3)));
        assert!(attack.destination.is_none());
        assert!(!attack.justification.is_empty());

        let wait = Action::wait("nothing to do");
        assert_eq!(wait.kind, ActionKind::Wait);
        assert_eq!(wait.priority, 0.0);
    }
}
