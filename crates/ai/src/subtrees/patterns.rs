//! Smallest reusable behavior pieces.

use behavior_tree::{leaf, selector, sequence};

use super::AiBranch;
use crate::context::TargetClass;
use crate::nodes::{ActionNode, Condition};

/// Attack the closest enemy when one is already in reach.
pub fn attack_when_in_range() -> AiBranch {
    sequence(
        "engage in range",
        vec![
            leaf("can attack", Condition::CanAttackEnemy.into()),
            leaf("attack nearest", ActionNode::AttackNearestEnemy.into()),
        ],
    )
}

/// Hunt protection-flagged targets: strike one in reach, otherwise close in.
pub fn hunt_protected() -> AiBranch {
    sequence(
        "hunt protected",
        vec![
            leaf("protected present", Condition::ProtectedTargetsPresent.into()),
            selector(
                "reach protected",
                vec![
                    leaf("strike protected", ActionNode::AttackProtectedTarget.into()),
                    leaf(
                        "advance on protected",
                        ActionNode::MoveTowardNearest(TargetClass::Protected).into(),
                    ),
                ],
            ),
        ],
    )
}

/// Fall back toward safer ground when health drops below the threshold.
pub fn retreat_when_low_health(threshold: f32) -> AiBranch {
    sequence(
        "retreat when hurt",
        vec![
            leaf("badly hurt", Condition::HealthBelow { threshold }.into()),
            leaf("retreat", ActionNode::MoveTowardSafety.into()),
        ],
    )
}

/// Spend an ability on the worst-off ally below the threshold.
pub fn heal_when_ally_hurt(threshold: f32) -> AiBranch {
    sequence(
        "triage",
        vec![
            leaf("ally hurt", Condition::AllyHealthBelow { threshold }.into()),
            leaf("cast heal", ActionNode::UseAbility.into()),
        ],
    )
}

/// Cast something useful when an ability happens to be available.
pub fn opportunistic_cast() -> AiBranch {
    sequence(
        "opportunistic cast",
        vec![
            leaf("has ability", Condition::HasUsableAbility.into()),
            leaf("use ability", ActionNode::UseAbility.into()),
        ],
    )
}

/// Close the distance to the nearest enemy.
pub fn chase_nearest_enemy() -> AiBranch {
    leaf(
        "chase enemy",
        ActionNode::MoveTowardNearest(TargetClass::Enemy).into(),
    )
}

/// Move toward the nearest ally to fight in formation.
pub fn regroup_with_allies() -> AiBranch {
    leaf(
        "regroup",
        ActionNode::MoveTowardNearest(TargetClass::Ally).into(),
    )
}

/// Terminal fallback. Always succeeds, so every strategy ends in a decision.
pub fn wait_fallback() -> AiBranch {
    leaf("wait", ActionNode::Wait.into())
}
