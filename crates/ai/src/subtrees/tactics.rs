//! Patterns combined into situational behaviors.

use behavior_tree::{inverter, leaf, selector, sequence};

use super::{AiBranch, patterns};
use crate::context::TargetClass;
use crate::nodes::{ActionNode, Condition};

/// Fight at close quarters: strike what is in reach, otherwise close in.
pub fn melee_engagement() -> AiBranch {
    selector(
        "melee engagement",
        vec![
            patterns::attack_when_in_range(),
            patterns::chase_nearest_enemy(),
        ],
    )
}

/// Prioritize protection-flagged targets over everything else.
pub fn protect_hunting() -> AiBranch {
    patterns::hunt_protected()
}

/// Keep the squad standing: heal first, then cast whatever else is up.
pub fn combat_support() -> AiBranch {
    selector(
        "combat support",
        vec![
            patterns::heal_when_ally_hurt(0.5),
            patterns::opportunistic_cast(),
        ],
    )
}

/// Stay alive when pressed. Guard is the unconditional last resort, so this
/// branch always resolves once its health gate passes.
pub fn survival(threshold: f32) -> AiBranch {
    sequence(
        "when pressed",
        vec![
            leaf("pressed", Condition::HealthBelow { threshold }.into()),
            selector(
                "escape",
                vec![
                    leaf("fall back", ActionNode::MoveTowardSafety.into()),
                    leaf("guard up", ActionNode::Guard.into()),
                ],
            ),
        ],
    )
}

/// Reposition toward the enemy only when nothing is in reach yet.
pub fn flanking_advance() -> AiBranch {
    sequence(
        "reposition",
        vec![
            inverter(
                "out of reach",
                leaf("already in reach", Condition::CanAttackEnemy.into()),
            ),
            leaf(
                "advance",
                ActionNode::MoveTowardNearest(TargetClass::Enemy).into(),
            ),
        ],
    )
}
