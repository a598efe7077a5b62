//! Target scoring.
//!
//! The analyzer turns the set of hostile units into a ranked candidate list.
//! Every score contribution is appended to a human-readable justification so
//! a replay or log line can explain why a unit was picked.

use battle_core::{BattleEnv, Position, Unit, UnitId};
use rand::{Rng, rngs::StdRng};
use serde::Serialize;

use crate::personality::Personality;

/// Priority added per point of protection priority reported by the oracle.
pub const PROTECTION_MULTIPLIER: f32 = 10.0;

/// Extra priority for targets close to death.
const EXECUTE_BONUS: f32 = 20.0;
const EXECUTE_THRESHOLD: f32 = 0.3;

/// Penalty for targets the actor can neither hit nor reach this turn.
const UNREACHABLE_PENALTY: f32 = 50.0;

/// A scored hostile unit, borrowed from the caller's unit list.
#[derive(Clone, Debug)]
pub struct CandidateTarget<'a> {
    pub unit: &'a Unit,
    pub priority: f32,
    pub distance: i32,
    pub protected: bool,
    pub attackable: bool,
    pub reachable: bool,
    pub justification: String,
}

impl CandidateTarget<'_> {
    /// Owned snapshot for logs and observer events.
    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            unit: self.unit.id,
            priority: self.priority,
            distance: self.distance,
            protected: self.protected,
        }
    }
}

/// Owned candidate snapshot, serializable for telemetry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub unit: UnitId,
    pub priority: f32,
    pub distance: i32,
    pub protected: bool,
}

/// Scores and ranks hostile units for one actor.
#[derive(Clone, Debug)]
pub struct TargetAnalyzer {
    protection_multiplier: f32,
}

impl TargetAnalyzer {
    pub fn new() -> Self {
        Self {
            protection_multiplier: PROTECTION_MULTIPLIER,
        }
    }

    /// Ranks the hostile, living units among `units` for `actor`.
    ///
    /// The base score rewards proximity, low target health, and offensive
    /// stat profiles. Protection flags add a large bonus so flagged targets
    /// dominate unflagged ones at comparable range. Targets that can be
    /// neither attacked nor reached this turn are penalized but kept in the
    /// list. When `randomness` is positive, seeded noise of up to
    /// `±10 * randomness` points is mixed in.
    ///
    /// The result is sorted by descending priority, with distance as the
    /// tie-break; the sort is stable so equally scored candidates keep the
    /// caller's order.
    pub fn analyze<'a>(
        &self,
        actor: &Unit,
        units: &[&'a Unit],
        env: &BattleEnv<'_>,
        personality: Option<&Personality>,
        randomness: f32,
        rng: &mut StdRng,
    ) -> Vec<CandidateTarget<'a>> {
        let mut candidates: Vec<CandidateTarget<'a>> = units
            .iter()
            .filter(|unit| {
                unit.id != actor.id && unit.is_alive() && actor.faction.is_hostile_to(unit.faction)
            })
            .map(|unit| self.score(actor, *unit, env, personality, randomness, rng))
            .collect();

        candidates.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then(a.distance.cmp(&b.distance))
        });
        candidates
    }

    fn score<'a>(
        &self,
        actor: &Unit,
        target: &'a Unit,
        env: &BattleEnv<'_>,
        personality: Option<&Personality>,
        randomness: f32,
        rng: &mut StdRng,
    ) -> CandidateTarget<'a> {
        let distance = actor.position.manhattan_distance(target.position);
        let mut justification = format!("distance {distance}");

        let mut priority = 50.0 - 2.0 * distance as f32;
        priority += 30.0 * (1.0 - target.hp_ratio());
        if target.stats.attack > target.stats.defense {
            priority += 10.0;
            justification.push_str(", offensive stat profile");
        }
        priority = priority.max(0.0);

        let protected = env
            .protection()
            .map(|oracle| oracle.is_protected(target))
            .unwrap_or(false);
        if protected {
            let weight = env
                .protection()
                .map(|oracle| oracle.protection_priority(target))
                .unwrap_or(1.0);
            priority += weight * self.protection_multiplier;
            justification.push_str(", protected target");
        }

        if target.hp_ratio() < EXECUTE_THRESHOLD {
            priority += EXECUTE_BONUS;
            justification.push_str(", finish it off");
        }

        let attackable = self.is_attackable(actor, env, distance);
        let reachable = self.is_reachable(actor, target.position, env);
        if !attackable && !reachable {
            priority -= UNREACHABLE_PENALTY;
            justification.push_str(", out of reach this turn");
        }

        if let Some(personality) = personality {
            priority += personality.target_priority_modifier(target);
        }

        if randomness > 0.0 {
            priority += rng.random_range(-1.0..=1.0) * 10.0 * randomness;
        }

        CandidateTarget {
            unit: target,
            priority,
            distance,
            protected,
            attackable,
            reachable,
            justification,
        }
    }

    /// Whether the actor can hit the target from where it stands.
    fn is_attackable(&self, actor: &Unit, env: &BattleEnv<'_>, distance: i32) -> bool {
        match env.combat() {
            Ok(combat) => combat.can_attack(actor) && distance <= combat.attack_range(actor),
            Err(_) => false,
        }
    }

    /// Whether any tile in the actor's movement range is adjacent to the
    /// target. A missing movement oracle means nothing is reachable.
    fn is_reachable(&self, actor: &Unit, target: Position, env: &BattleEnv<'_>) -> bool {
        match env.movement() {
            Ok(movement) => movement
                .movement_range(actor)
                .iter()
                .any(|tile| tile.is_adjacent(target)),
            Err(_) => false,
        }
    }
}

impl Default for TargetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
