//! Per-decision blackboard.
//!
//! A [`DecisionContext`] is built once per decision and threaded mutably
//! through the behavior tree. It carries the actor, the faction-split unit
//! lists, the oracle environment, the effective difficulty settings, the
//! personality, the ranked candidate list, and the seeded RNG. Everything a
//! node needs lives here; nodes never reach for globals.

use battle_core::{BattleEnv, Position, Unit};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::difficulty::DifficultySettings;
use crate::personality::Personality;
use crate::targeting::{CandidateTarget, TargetAnalyzer};

/// Which unit list a movement or lookup should draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetClass {
    Enemy,
    Protected,
    Ally,
}

/// Mutable state shared by every node during one decision.
pub struct DecisionContext<'a> {
    pub actor: &'a Unit,
    pub enemies: Vec<&'a Unit>,
    pub allies: Vec<&'a Unit>,
    pub protected: Vec<&'a Unit>,
    pub env: BattleEnv<'a>,
    pub turn: u32,
    pub settings: DifficultySettings,
    pub personality: Personality,
    candidates: Vec<CandidateTarget<'a>>,
    rng: StdRng,
}

impl<'a> DecisionContext<'a> {
    /// Splits `units` into enemies and allies of `actor` and seeds the RNG.
    ///
    /// Enemies flagged by the protection oracle also land in `protected`.
    /// The actor itself and dead units are excluded from every list.
    pub fn new(
        actor: &'a Unit,
        units: &'a [Unit],
        env: BattleEnv<'a>,
        turn: u32,
        settings: DifficultySettings,
        personality: Personality,
        seed: u64,
    ) -> Self {
        let mut enemies = Vec::new();
        let mut allies = Vec::new();
        let mut protected = Vec::new();

        for unit in units {
            if unit.id == actor.id || !unit.is_alive() {
                continue;
            }
            if actor.faction.is_hostile_to(unit.faction) {
                if let Ok(oracle) = env.protection() {
                    if oracle.is_protected(unit) {
                        protected.push(unit);
                    }
                }
                enemies.push(unit);
            } else {
                allies.push(unit);
            }
        }

        Self {
            actor,
            enemies,
            allies,
            protected,
            env,
            turn,
            settings,
            personality,
            candidates: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs target analysis and caches the ranked candidate list.
    pub fn with_candidates(mut self, analyzer: &TargetAnalyzer) -> Self {
        self.candidates = analyzer.analyze(
            self.actor,
            &self.enemies,
            &self.env,
            Some(&self.personality),
            self.settings.randomness_factor(),
            &mut self.rng,
        );
        self
    }

    /// The ranked candidate list, best first.
    pub fn candidates(&self) -> &[CandidateTarget<'a>] {
        &self.candidates
    }

    pub fn best_candidate(&self) -> Option<&CandidateTarget<'a>> {
        self.candidates.first()
    }

    /// The highest ranked protection-flagged candidate, if any.
    pub fn best_protected(&self) -> Option<&CandidateTarget<'a>> {
        self.candidates.iter().find(|candidate| candidate.protected)
    }

    /// The living enemy closest to the actor.
    pub fn nearest_enemy(&self) -> Option<&'a Unit> {
        self.nearest_of(TargetClass::Enemy)
    }

    /// The closest living unit of the given class.
    pub fn nearest_of(&self, class: TargetClass) -> Option<&'a Unit> {
        let pool = match class {
            TargetClass::Enemy => &self.enemies,
            TargetClass::Protected => &self.protected,
            TargetClass::Ally => &self.allies,
        };
        pool.iter()
            .min_by_key(|unit| self.actor.position.manhattan_distance(unit.position))
            .copied()
    }

    /// The actor's current health fraction.
    pub fn hp_ratio(&self) -> f32 {
        self.actor.hp_ratio()
    }

    /// The ally with the lowest health fraction below `threshold`.
    pub fn most_injured_ally(&self, threshold: f32) -> Option<&'a Unit> {
        self.allies
            .iter()
            .filter(|ally| ally.hp_ratio() < threshold)
            .min_by(|a, b| a.hp_ratio().total_cmp(&b.hp_ratio()))
            .copied()
    }

    /// Tiles the actor can move to this turn, empty when the movement
    /// oracle is absent.
    pub fn reachable_tiles(&self) -> Vec<Position> {
        match self.env.movement() {
            Ok(movement) => movement.movement_range(self.actor),
            Err(_) => Vec::new(),
        }
    }

    /// A seeded roll in `[0, 1)`.
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{Faction, ProtectionOracle, UnitId};

    use super::*;

    struct FlagOne(UnitId);

    impl ProtectionOracle for FlagOne {
        fn is_protected(&self, unit: &Unit) -> bool {
            unit.id == self.0
        }
    }

    fn unit(id: u32, faction: Faction, x: i32, y: i32) -> Unit {
        Unit::new(UnitId(id), "unit", faction, Position::new(x, y))
    }

    #[test]
    fn splits_units_by_faction_and_protection() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = vec![
            unit(2, Faction::Player, 1, 0),
            unit(3, Faction::Player, 2, 0),
            unit(4, Faction::Enemy, 0, 1),
            unit(5, Faction::Player, 5, 5).with_hp(0),
        ];

        let oracle = FlagOne(UnitId(3));
        let env = BattleEnv::new(None, None, None, None, Some(&oracle));
        let ctx = DecisionContext::new(
            &actor,
            &units,
            env,
            1,
            DifficultySettings::default(),
            Personality::default(),
            99,
        );

        assert_eq!(ctx.enemies.len(), 2);
        assert_eq!(ctx.allies.len(), 1);
        assert_eq!(ctx.protected.len(), 1);
        assert_eq!(ctx.protected[0].id, UnitId(3));
    }

    #[test]
    fn nearest_lookups_respect_the_class() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = vec![
            unit(2, Faction::Player, 4, 0),
            unit(3, Faction::Player, 1, 1),
            unit(4, Faction::Enemy, 2, 0),
        ];

        let env = BattleEnv::empty();
        let ctx = DecisionContext::new(
            &actor,
            &units,
            env,
            1,
            DifficultySettings::default(),
            Personality::default(),
            99,
        );

        assert_eq!(ctx.nearest_enemy().unwrap().id, UnitId(3));
        assert_eq!(ctx.nearest_of(TargetClass::Ally).unwrap().id, UnitId(4));
        assert!(ctx.nearest_of(TargetClass::Protected).is_none());
    }

    #[test]
    fn most_injured_ally_applies_the_threshold() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = vec![
            unit(2, Faction::Enemy, 1, 0).with_hp(80),
            unit(3, Faction::Enemy, 2, 0).with_hp(20),
        ];

        let env = BattleEnv::empty();
        let ctx = DecisionContext::new(
            &actor,
            &units,
            env,
            1,
            DifficultySettings::default(),
            Personality::default(),
            99,
        );

        assert_eq!(ctx.most_injured_ally(0.5).unwrap().id, UnitId(3));
        assert!(ctx.most_injured_ally(0.1).is_none());
    }
}
