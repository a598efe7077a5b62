//! Condition leaves.
//!
//! Conditions read the decision context and answer yes or no. They never
//! produce actions; a `true` answer lets the enclosing sequence proceed to
//! its action leaves.

use crate::context::DecisionContext;

/// The closed set of condition checks available to tree presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    /// Actor health fraction strictly below the threshold.
    HealthBelow { threshold: f32 },
    /// At least one living hostile unit carries a protection flag.
    ProtectedTargetsPresent,
    /// At least one candidate can be attacked from the current position.
    CanAttackEnemy,
    /// The actor already spent its movement this turn.
    HasMoved,
    /// The actor already spent its action this turn.
    HasActed,
    /// Some ally's health fraction is strictly below the threshold.
    AllyHealthBelow { threshold: f32 },
    /// The ability oracle reports at least one usable ability.
    HasUsableAbility,
}

impl Condition {
    pub fn evaluate(&self, ctx: &DecisionContext<'_>) -> bool {
        match self {
            Condition::HealthBelow { threshold } => ctx.hp_ratio() < *threshold,
            Condition::ProtectedTargetsPresent => !ctx.protected.is_empty(),
            Condition::CanAttackEnemy => {
                ctx.candidates().iter().any(|candidate| candidate.attackable)
            }
            Condition::HasMoved => ctx.actor.has_moved,
            Condition::HasActed => ctx.actor.has_acted,
            Condition::AllyHealthBelow { threshold } => {
                ctx.most_injured_ally(*threshold).is_some()
            }
            Condition::HasUsableAbility => match ctx.env.abilities() {
                Ok(oracle) => oracle
                    .available_abilities(ctx.actor)
                    .into_iter()
                    .any(|id| oracle.can_use_ability(ctx.actor, id)),
                Err(_) => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{BattleEnv, Faction, Position, Unit, UnitId};

    use super::*;
    use crate::difficulty::DifficultySettings;
    use crate::personality::Personality;

    fn ctx_for<'a>(actor: &'a Unit, units: &'a [Unit]) -> DecisionContext<'a> {
        DecisionContext::new(
            actor,
            units,
            BattleEnv::empty(),
            1,
            DifficultySettings::default(),
            Personality::default(),
            3,
        )
    }

    #[test]
    fn health_below_uses_a_strict_bound() {
        let actor = Unit::new(UnitId(1), "knight", Faction::Enemy, Position::ORIGIN).with_hp(30);
        let units = [];
        let ctx = ctx_for(&actor, &units);

        assert!(!Condition::HealthBelow { threshold: 0.3 }.evaluate(&ctx));
        assert!(Condition::HealthBelow { threshold: 0.31 }.evaluate(&ctx));
    }

    #[test]
    fn protected_targets_present_checks_the_flagged_list() {
        let actor = Unit::new(UnitId(1), "knight", Faction::Enemy, Position::ORIGIN);
        let units = [Unit::new(
            UnitId(2),
            "soldier",
            Faction::Player,
            Position::new(1, 0),
        )];
        // No protection oracle, so nothing lands in the protected list.
        let ctx = ctx_for(&actor, &units);

        assert!(!Condition::ProtectedTargetsPresent.evaluate(&ctx));
    }

    #[test]
    fn usable_ability_is_false_without_an_oracle() {
        let actor = Unit::new(UnitId(1), "knight", Faction::Enemy, Position::ORIGIN);
        let units = [];
        let ctx = ctx_for(&actor, &units);

        assert!(!Condition::HasUsableAbility.evaluate(&ctx));
    }
}
