//! Action leaves.
//!
//! Action leaves propose a concrete [`Action`] for the turn. Each one applies
//! the personality's action bias on top of its base priority and carries a
//! justification string explaining the pick. Missing oracles and empty
//! candidate lists degrade to `Failure` so the tree can try the next branch.

use battle_core::{AbilityKind, Action, ActionKind, Position, Unit};
use behavior_tree::Tick;
use tracing::trace;

use crate::context::{DecisionContext, TargetClass};

/// Allies below this health fraction are heal candidates.
const HEAL_ALLY_THRESHOLD: f32 = 0.5;

const ABILITY_BASE_PRIORITY: f32 = 60.0;
const MOVE_BASE_PRIORITY: f32 = 40.0;
const GUARD_BASE_PRIORITY: f32 = 30.0;

/// Weight of the personality bias on action priorities.
const PERSONALITY_WEIGHT: f32 = 10.0;

/// The closed set of action proposals available to tree presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionNode {
    /// Attack the closest candidate that is attackable right now.
    AttackNearestEnemy,
    /// Attack the best ranked protection-flagged candidate in reach.
    AttackProtectedTarget,
    /// Move to the reachable tile farthest from every enemy.
    MoveTowardSafety,
    /// Move one step (or one movement-range hop) toward the nearest unit
    /// of the given class.
    MoveTowardNearest(TargetClass),
    /// Spend MP on the first usable ability, gated by skill frequency.
    UseAbility,
    /// Do nothing this turn. Always succeeds.
    Wait,
    /// Hold position defensively. Always succeeds.
    Guard,
}

impl ActionNode {
    pub fn evaluate(&self, ctx: &mut DecisionContext<'_>) -> Tick<Action> {
        match self {
            ActionNode::AttackNearestEnemy => attack_nearest(ctx),
            ActionNode::AttackProtectedTarget => attack_protected(ctx),
            ActionNode::MoveTowardSafety => move_toward_safety(ctx),
            ActionNode::MoveTowardNearest(class) => move_toward_nearest(ctx, *class),
            ActionNode::UseAbility => use_ability(ctx),
            ActionNode::Wait => Tick::success(Some(wait_action(ctx))),
            ActionNode::Guard => Tick::success(Some(guard_action(ctx))),
        }
    }
}

fn biased(ctx: &DecisionContext<'_>, kind: ActionKind, base: f32) -> f32 {
    base + ctx.personality.action_modifier(kind) * PERSONALITY_WEIGHT
}

fn attack_nearest(ctx: &mut DecisionContext<'_>) -> Tick<Action> {
    let Some(candidate) = ctx
        .candidates()
        .iter()
        .filter(|candidate| candidate.attackable)
        .min_by_key(|candidate| candidate.distance)
    else {
        return Tick::failure();
    };

    let priority = biased(ctx, ActionKind::Attack, candidate.priority);
    let action = Action::attack(candidate.unit.id, priority, candidate.justification.clone());
    trace!(target = %candidate.unit.id, priority, "attacking nearest enemy");
    Tick::success(Some(action))
}

fn attack_protected(ctx: &mut DecisionContext<'_>) -> Tick<Action> {
    let Some(candidate) = ctx
        .candidates()
        .iter()
        .find(|candidate| candidate.protected && candidate.attackable)
    else {
        return Tick::failure();
    };

    let priority = biased(ctx, ActionKind::Attack, candidate.priority);
    let action = Action::attack(candidate.unit.id, priority, candidate.justification.clone());
    trace!(target = %candidate.unit.id, priority, "hunting protected target");
    Tick::success(Some(action))
}

fn move_toward_safety(ctx: &mut DecisionContext<'_>) -> Tick<Action> {
    if ctx.enemies.is_empty() {
        return Tick::failure();
    }

    let threat_distance = |pos: Position| {
        ctx.enemies
            .iter()
            .map(|enemy| pos.manhattan_distance(enemy.position))
            .min()
            .unwrap_or(i32::MAX)
    };

    let current = threat_distance(ctx.actor.position);
    let best = ctx
        .reachable_tiles()
        .into_iter()
        .filter(|tile| *tile != ctx.actor.position)
        .max_by_key(|tile| threat_distance(*tile));

    let destination = match best {
        Some(tile) if threat_distance(tile) > current => Some(tile),
        _ => fallback_step_away(ctx),
    };
    let Some(destination) = destination else {
        return Tick::failure();
    };

    let priority = biased(ctx, ActionKind::Move, MOVE_BASE_PRIORITY);
    let action = Action::move_to(destination, priority, "retreating to safer ground");
    Tick::success(Some(action))
}

/// One clamped step away from the nearest enemy, when the map allows it.
fn fallback_step_away(ctx: &DecisionContext<'_>) -> Option<Position> {
    let nearest = ctx.nearest_enemy()?;
    let step = ctx.actor.position.step_away(nearest.position);
    let step = match ctx.env.map() {
        Ok(map) => map.dimensions().clamp(step),
        Err(_) => step,
    };
    (step != ctx.actor.position).then_some(step)
}

fn move_toward_nearest(ctx: &mut DecisionContext<'_>, class: TargetClass) -> Tick<Action> {
    let Some(target) = ctx.nearest_of(class) else {
        return Tick::failure();
    };

    let tiles = ctx.reachable_tiles();
    let best = tiles
        .into_iter()
        .filter(|tile| *tile != ctx.actor.position)
        .min_by_key(|tile| tile.manhattan_distance(target.position));

    let destination = match best {
        Some(tile) if tile.manhattan_distance(target.position)
            < ctx.actor.position.manhattan_distance(target.position) =>
        {
            Some(tile)
        }
        _ => fallback_step_toward(ctx, target.position),
    };
    let Some(destination) = destination else {
        return Tick::failure();
    };

    let priority = biased(ctx, ActionKind::Move, MOVE_BASE_PRIORITY);
    let justification = format!("closing distance to {}", target.id);
    Tick::success(Some(Action::move_to(destination, priority, justification)))
}

fn fallback_step_toward(ctx: &DecisionContext<'_>, target: Position) -> Option<Position> {
    let step = ctx.actor.position.step_toward(target);
    if step == ctx.actor.position {
        return None;
    }
    if let Ok(map) = ctx.env.map() {
        if !map.is_passable(step) {
            return None;
        }
    }
    if let Ok(movement) = ctx.env.movement() {
        if !movement.can_move_to(ctx.actor, step) {
            return None;
        }
    }
    Some(step)
}

fn use_ability(ctx: &mut DecisionContext<'_>) -> Tick<Action> {
    // The frequency gate consumes a roll even when no ability ends up usable,
    // keeping entropy consumption independent of oracle contents.
    let gate = ctx.roll();
    if gate >= ctx.settings.skill_usage_frequency() {
        return Tick::failure();
    }

    let Ok(oracle) = ctx.env.abilities() else {
        return Tick::failure();
    };

    for id in oracle.available_abilities(ctx.actor) {
        if !oracle.can_use_ability(ctx.actor, id) {
            continue;
        }
        let Some(def) = oracle.ability(id) else {
            continue;
        };

        let (target, reason) = match def.kind {
            AbilityKind::Heal => match ctx.most_injured_ally(HEAL_ALLY_THRESHOLD) {
                Some(ally) => (ally, format!("healing {} with {}", ally.id, def.name)),
                None => continue,
            },
            AbilityKind::Offense => match nearest_enemy_in_range(ctx, def.range) {
                Some(enemy) => (enemy, format!("casting {} at {}", def.name, enemy.id)),
                None => continue,
            },
        };

        let priority = biased(ctx, ActionKind::UseAbility, ABILITY_BASE_PRIORITY);
        trace!(ability = %def.name, target = %target.id, "using ability");
        return Tick::success(Some(Action::use_ability(
            id,
            Some(target.id),
            priority,
            reason,
        )));
    }

    Tick::failure()
}

fn nearest_enemy_in_range<'a>(ctx: &DecisionContext<'a>, range: i32) -> Option<&'a Unit> {
    ctx.nearest_enemy()
        .filter(|enemy| ctx.actor.position.manhattan_distance(enemy.position) <= range)
}

fn wait_action(ctx: &DecisionContext<'_>) -> Action {
    let _ = ctx;
    Action::wait("no better option")
}

fn guard_action(ctx: &DecisionContext<'_>) -> Action {
    let priority = biased(ctx, ActionKind::Guard, GUARD_BASE_PRIORITY);
    Action::guard(priority, "holding position")
}

#[cfg(test)]
mod tests {
    use battle_core::{
        AbilityDef, AbilityId, AbilityOracle, BattleEnv, CombatOracle, Faction, MovementOracle,
        UnitId,
    };

    use super::*;
    use crate::difficulty::{DifficultySettings, DifficultyTier};
    use crate::personality::Personality;
    use crate::targeting::TargetAnalyzer;

    struct OpenCombat;

    impl CombatOracle for OpenCombat {
        fn can_attack(&self, _unit: &Unit) -> bool {
            true
        }

        fn attack_range(&self, _unit: &Unit) -> i32 {
            2
        }
    }

    struct Stride(i32);

    impl MovementOracle for Stride {
        fn movement_range(&self, unit: &Unit) -> Vec<Position> {
            let mut tiles = Vec::new();
            for dx in -self.0..=self.0 {
                for dy in -self.0..=self.0 {
                    if dx.abs() + dy.abs() <= self.0 {
                        tiles.push(Position::new(unit.position.x + dx, unit.position.y + dy));
                    }
                }
            }
            tiles
        }
    }

    struct OneHeal;

    impl AbilityOracle for OneHeal {
        fn available_abilities(&self, _unit: &Unit) -> Vec<AbilityId> {
            vec![AbilityId(1)]
        }

        fn can_use_ability(&self, _unit: &Unit, _id: AbilityId) -> bool {
            true
        }

        fn ability(&self, id: AbilityId) -> Option<AbilityDef> {
            Some(AbilityDef::new(id, "mend", AbilityKind::Heal, 5, 3))
        }
    }

    fn unit(id: u32, faction: Faction, x: i32, y: i32) -> Unit {
        Unit::new(UnitId(id), "unit", faction, Position::new(x, y))
    }

    fn ctx_with<'a>(
        actor: &'a Unit,
        units: &'a [Unit],
        env: BattleEnv<'a>,
        settings: DifficultySettings,
    ) -> DecisionContext<'a> {
        DecisionContext::new(
            actor,
            units,
            env,
            1,
            settings,
            Personality::default(),
            11,
        )
        .with_candidates(&TargetAnalyzer::new())
    }

    #[test]
    fn attack_nearest_fails_with_no_attackable_candidate() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [unit(2, Faction::Player, 9, 9)];
        let combat = OpenCombat;
        let env = BattleEnv::new(None, None, Some(&combat), None, None);
        let mut ctx = ctx_with(&actor, &units, env, DifficultySettings::default());

        assert!(ActionNode::AttackNearestEnemy.evaluate(&mut ctx).status.is_failure());
    }

    #[test]
    fn attack_nearest_picks_the_closest_in_reach() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [
            unit(2, Faction::Player, 2, 0),
            unit(3, Faction::Player, 0, 1),
        ];
        let combat = OpenCombat;
        let env = BattleEnv::new(None, None, Some(&combat), None, None);
        let mut ctx = ctx_with(&actor, &units, env, DifficultySettings::default());

        let tick = ActionNode::AttackNearestEnemy.evaluate(&mut ctx);
        let action = tick.output.unwrap();
        assert_eq!(action.kind, ActionKind::Attack);
        assert_eq!(action.target, Some(UnitId(3)));
        assert!(!action.justification.is_empty());
    }

    #[test]
    fn retreat_prefers_the_farthest_reachable_tile() {
        let actor = unit(1, Faction::Enemy, 2, 2);
        let units = [unit(2, Faction::Player, 0, 2)];
        let movement = Stride(2);
        let env = BattleEnv::new(None, Some(&movement), None, None, None);
        let mut ctx = ctx_with(&actor, &units, env, DifficultySettings::default());

        let tick = ActionNode::MoveTowardSafety.evaluate(&mut ctx);
        let action = tick.output.unwrap();
        assert_eq!(action.kind, ActionKind::Move);
        let dest = action.destination.unwrap();
        assert!(dest.manhattan_distance(Position::new(0, 2)) > 2);
    }

    #[test]
    fn retreat_steps_away_without_a_movement_oracle() {
        let actor = unit(1, Faction::Enemy, 2, 2);
        let units = [unit(2, Faction::Player, 0, 2)];
        let env = BattleEnv::empty();
        let mut ctx = ctx_with(&actor, &units, env, DifficultySettings::default());

        let tick = ActionNode::MoveTowardSafety.evaluate(&mut ctx);
        let dest = tick.output.unwrap().destination.unwrap();
        assert!(dest.manhattan_distance(Position::new(0, 2)) > 2);
    }

    #[test]
    fn chase_closes_distance_to_the_nearest_enemy() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [unit(2, Faction::Player, 5, 0)];
        let movement = Stride(3);
        let env = BattleEnv::new(None, Some(&movement), None, None, None);
        let mut ctx = ctx_with(&actor, &units, env, DifficultySettings::default());

        let tick = ActionNode::MoveTowardNearest(TargetClass::Enemy).evaluate(&mut ctx);
        let dest = tick.output.unwrap().destination.unwrap();
        assert!(dest.manhattan_distance(Position::new(5, 0)) < 5);
    }

    #[test]
    fn ability_use_is_gated_by_skill_frequency() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [unit(3, Faction::Enemy, 1, 0).with_hp(10)];
        let abilities = OneHeal;

        let mut never = DifficultySettings::for_tier(DifficultyTier::Normal);
        never.set_skill_usage_frequency(0.0);
        let env = BattleEnv::new(None, None, None, Some(&abilities), None);
        let mut ctx = ctx_with(&actor, &units, env, never);
        assert!(ActionNode::UseAbility.evaluate(&mut ctx).status.is_failure());

        let mut always = DifficultySettings::for_tier(DifficultyTier::Normal);
        always.set_skill_usage_frequency(1.0);
        let env = BattleEnv::new(None, None, None, Some(&abilities), None);
        let mut ctx = ctx_with(&actor, &units, env, always);
        let tick = ActionNode::UseAbility.evaluate(&mut ctx);
        let action = tick.output.unwrap();
        assert_eq!(action.kind, ActionKind::UseAbility);
        assert_eq!(action.target, Some(UnitId(3)));
    }

    #[test]
    fn wait_and_guard_always_succeed() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [];
        let mut ctx = ctx_with(&actor, &units, BattleEnv::empty(), DifficultySettings::default());

        assert!(ActionNode::Wait.evaluate(&mut ctx).status.is_success());
        assert!(ActionNode::Guard.evaluate(&mut ctx).status.is_success());
    }
}
