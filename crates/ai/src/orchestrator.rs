//! Decision orchestration.
//!
//! The orchestrator owns the full pipeline for one unit's turn: validate the
//! request, resolve effective difficulty settings, pick an archetype for the
//! situation, build the decision context, run the preset tree under a wall
//! clock, then commit the action with history, statistics, and observer
//! notification. It holds an injected [`DifficultyManager`] rather than any
//! global state, so independent orchestrators never interfere.

use std::collections::{HashMap, hash_map::Entry};
use std::time::{Duration, Instant};

use battle_core::{AbilityKind, Action, ActionKind, BattleEnv, Unit, UnitId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::context::DecisionContext;
use crate::difficulty::{DifficultyManager, PartyInfo};
use crate::error::DecisionError;
use crate::history::{DecisionHistory, DecisionRecord, DecisionStats};
use crate::observer::{DecisionEvent, DecisionObserver};
use crate::personality::{Archetype, Personality};
use crate::presets::{self, AiTree};
use crate::targeting::{CandidateSummary, TargetAnalyzer};

/// Health fraction below which self-preservation overrides the base profile.
pub const CRITICAL_HEALTH: f32 = 0.3;

/// Ally health fraction below which healer-capable units switch to support.
const SUPPORT_NEED: f32 = 0.5;

/// Where the orchestrator is in the decision pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DecisionPhase {
    Idle,
    BuildingContext,
    Evaluating,
    Committed,
    TimedOut,
    Errored,
}

/// Everything needed to decide one unit's turn.
pub struct DecisionRequest<'a> {
    pub actor: &'a Unit,
    pub units: &'a [Unit],
    pub env: BattleEnv<'a>,
    pub turn: u32,
    /// Seed for this decision's entropy. Identical requests with identical
    /// seeds produce identical decisions.
    pub seed: u64,
    /// Player party snapshot for strength scaling, when known.
    pub party: Option<&'a PartyInfo>,
    /// Base profile for this unit. Situational overrides still apply.
    pub archetype_override: Option<Archetype>,
}

/// A committed decision plus the evidence behind it.
#[derive(Clone, Debug)]
pub struct Decision {
    pub action: Action,
    pub archetype: Archetype,
    pub phase: DecisionPhase,
    pub elapsed: Duration,
    pub candidates: Vec<CandidateSummary>,
    /// Pacing delay the caller should apply before animating the action.
    pub reaction_delay: Duration,
}

/// Runs the full decision pipeline for non-player units.
pub struct DecisionOrchestrator {
    difficulty: DifficultyManager,
    analyzer: TargetAnalyzer,
    trees: HashMap<(Archetype, u8), AiTree>,
    histories: HashMap<UnitId, DecisionHistory>,
    observers: Vec<Box<dyn DecisionObserver>>,
    phase: DecisionPhase,
}

impl DecisionOrchestrator {
    pub fn new(difficulty: DifficultyManager) -> Self {
        Self {
            difficulty,
            analyzer: TargetAnalyzer::new(),
            trees: HashMap::new(),
            histories: HashMap::new(),
            observers: Vec::new(),
            phase: DecisionPhase::Idle,
        }
    }

    /// Registers an observer for every future committed decision.
    pub fn add_observer(&mut self, observer: Box<dyn DecisionObserver>) {
        self.observers.push(observer);
    }

    pub fn phase(&self) -> DecisionPhase {
        self.phase
    }

    pub fn difficulty(&self) -> &DifficultyManager {
        &self.difficulty
    }

    pub fn difficulty_mut(&mut self) -> &mut DifficultyManager {
        &mut self.difficulty
    }

    /// Decision history for one unit, if it has decided before.
    pub fn history(&self, unit: UnitId) -> Option<&DecisionHistory> {
        self.histories.get(&unit)
    }

    /// Aggregate statistics over every unit's retained history.
    pub fn stats(&self) -> DecisionStats {
        DecisionStats::from_records(self.histories.values().flat_map(DecisionHistory::iter))
    }

    /// Decides one unit's turn.
    ///
    /// The tree runs under the settings' thinking time limit; the wall clock
    /// is checked between ticks and again when the tree's result arrives, so
    /// an overrun commits a wait instead of an overdue action. Failures to
    /// decide degrade to waiting rather than erroring: errors are reserved
    /// for unusable requests and invalid presets.
    pub fn decide(&mut self, request: &DecisionRequest<'_>) -> Result<Decision, DecisionError> {
        self.phase = DecisionPhase::BuildingContext;
        if let Err(error) = validate(request) {
            self.phase = DecisionPhase::Errored;
            return Err(error);
        }

        let settings = match request.party {
            Some(party) => self.difficulty.adjust_for_player_strength(party),
            None => self.difficulty.live().clone(),
        };

        let archetype = select_archetype(request);
        let personality = Personality::of(archetype);

        self.phase = DecisionPhase::Evaluating;
        let mut ctx = DecisionContext::new(
            request.actor,
            request.units,
            request.env,
            request.turn,
            settings.clone(),
            personality,
            request.seed,
        )
        .with_candidates(&self.analyzer);

        let candidates: Vec<CandidateSummary> = ctx
            .candidates()
            .iter()
            .map(|candidate| candidate.summary())
            .collect();

        let depth = settings.thinking_depth();
        let tree = match self.trees.entry((archetype, depth)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(presets::tree_for(archetype, depth)?),
        };
        tree.reset();

        let limit = Duration::from_millis(settings.thinking_time_limit_ms());
        let start = Instant::now();
        let mut timed_out = false;
        let mut outcome = None;
        loop {
            if start.elapsed() > limit {
                timed_out = true;
                break;
            }
            let tick = tree.tick(&mut ctx);
            if tick.is_terminal() {
                outcome = tick.output;
                break;
            }
        }
        // An overdue result is as useless as none; the limit is also enforced
        // at the point the tree's answer arrives.
        if start.elapsed() > limit {
            timed_out = true;
        }

        let (mut action, phase) = if timed_out {
            warn!(unit = %request.actor.id, limit_ms = limit.as_millis() as u64, "decision timeout");
            (
                Action::wait("decision timeout, defaulting to wait"),
                DecisionPhase::TimedOut,
            )
        } else {
            match outcome {
                Some(action) => (action, DecisionPhase::Committed),
                None => (Action::wait("no action selected"), DecisionPhase::Committed),
            }
        };

        // Deliberate imperfection: occasionally discard a good decision.
        if phase == DecisionPhase::Committed
            && action.kind != ActionKind::Wait
            && ctx.roll() < settings.mistake_probability()
        {
            debug!(unit = %request.actor.id, discarded = %action.kind, "mistake injected");
            action = Action::wait("hesitates");
        }

        let elapsed = start.elapsed();
        let targeted_protected = action
            .target
            .is_some_and(|target| ctx.protected.iter().any(|unit| unit.id == target));

        self.histories
            .entry(request.actor.id)
            .or_default()
            .push(DecisionRecord {
                turn: request.turn,
                archetype,
                action: action.clone(),
                elapsed,
                targeted_protected,
            });

        let event = DecisionEvent {
            unit: request.actor.id,
            turn: request.turn,
            archetype,
            action: action.clone(),
            candidates: candidates.clone(),
            elapsed,
            phase,
        };
        for observer in &mut self.observers {
            observer.on_decision(&event);
        }

        debug!(
            unit = %request.actor.id,
            turn = request.turn,
            archetype = %archetype,
            action = %action.kind,
            elapsed_us = elapsed.as_micros() as u64,
            "decision committed"
        );

        self.phase = phase;
        Ok(Decision {
            action,
            archetype,
            phase,
            elapsed,
            candidates,
            reaction_delay: Duration::from_millis(u64::from(settings.reaction_delay_ms())),
        })
    }
}

impl Default for DecisionOrchestrator {
    fn default() -> Self {
        Self::new(DifficultyManager::default())
    }
}

fn validate(request: &DecisionRequest<'_>) -> Result<(), DecisionError> {
    if !request.actor.is_alive() {
        return Err(DecisionError::InvalidContext("actor is not alive"));
    }
    if request.units.is_empty() {
        return Err(DecisionError::InvalidContext("empty unit list"));
    }
    if request.env.map().is_err() {
        return Err(DecisionError::InvalidContext("map oracle missing"));
    }
    Ok(())
}

/// Situational archetype selection.
///
/// Protected targets outrank everything, including self-preservation: a
/// hunter that spots its quarry stays a hunter even when wounded. Critical
/// health comes next, then healer duty, then the unit's base profile.
fn select_archetype(request: &DecisionRequest<'_>) -> Archetype {
    if protected_present(request) {
        return Archetype::ProtectPriority;
    }
    if request.actor.hp_ratio() < CRITICAL_HEALTH {
        return Archetype::Defensive;
    }
    if can_heal(request) && ally_needs_support(request) {
        return Archetype::Support;
    }
    request.archetype_override.unwrap_or(Archetype::Balanced)
}

fn protected_present(request: &DecisionRequest<'_>) -> bool {
    let Ok(oracle) = request.env.protection() else {
        return false;
    };
    request.units.iter().any(|unit| {
        unit.is_alive()
            && request.actor.faction.is_hostile_to(unit.faction)
            && oracle.is_protected(unit)
    })
}

fn can_heal(request: &DecisionRequest<'_>) -> bool {
    let Ok(oracle) = request.env.abilities() else {
        return false;
    };
    oracle
        .available_abilities(request.actor)
        .into_iter()
        .filter(|id| oracle.can_use_ability(request.actor, *id))
        .filter_map(|id| oracle.ability(id))
        .any(|def| def.kind == AbilityKind::Heal)
}

fn ally_needs_support(request: &DecisionRequest<'_>) -> bool {
    request.units.iter().any(|unit| {
        unit.id != request.actor.id
            && unit.is_alive()
            && !request.actor.faction.is_hostile_to(unit.faction)
            && unit.hp_ratio() < SUPPORT_NEED
    })
}

#[cfg(test)]
mod tests {
    use battle_core::{Faction, Position, ProtectionOracle};

    use super::*;

    struct ProtectAll;

    impl ProtectionOracle for ProtectAll {
        fn is_protected(&self, _unit: &Unit) -> bool {
            true
        }
    }

    fn unit(id: u32, faction: Faction, x: i32, y: i32) -> Unit {
        Unit::new(UnitId(id), "unit", faction, Position::new(x, y))
    }

    fn request<'a>(actor: &'a Unit, units: &'a [Unit], env: BattleEnv<'a>) -> DecisionRequest<'a> {
        DecisionRequest {
            actor,
            units,
            env,
            turn: 1,
            seed: 5,
            party: None,
            archetype_override: None,
        }
    }

    #[test]
    fn protected_targets_outrank_critical_health() {
        let actor = unit(1, Faction::Enemy, 0, 0).with_hp(10);
        let units = [unit(2, Faction::Player, 3, 0)];
        let oracle = ProtectAll;
        let env = BattleEnv::new(None, None, None, None, Some(&oracle));

        let archetype = select_archetype(&request(&actor, &units, env));
        assert_eq!(archetype, Archetype::ProtectPriority);
    }

    #[test]
    fn critical_health_overrides_the_base_profile() {
        let actor = unit(1, Faction::Enemy, 0, 0).with_hp(10);
        let units = [unit(2, Faction::Player, 3, 0)];
        let env = BattleEnv::empty();

        let mut req = request(&actor, &units, env);
        req.archetype_override = Some(Archetype::Aggressive);
        assert_eq!(select_archetype(&req), Archetype::Defensive);
    }

    #[test]
    fn healthy_units_keep_their_override() {
        let actor = unit(1, Faction::Enemy, 0, 0);
        let units = [unit(2, Faction::Player, 3, 0)];
        let env = BattleEnv::empty();

        let mut req = request(&actor, &units, env);
        req.archetype_override = Some(Archetype::Aggressive);
        assert_eq!(select_archetype(&req), Archetype::Aggressive);

        req.archetype_override = None;
        assert_eq!(select_archetype(&req), Archetype::Balanced);
    }

    #[test]
    fn dead_actor_is_rejected() {
        let actor = unit(1, Faction::Enemy, 0, 0).with_hp(0);
        let units = [unit(2, Faction::Player, 3, 0)];
        let env = BattleEnv::empty();

        let mut orchestrator = DecisionOrchestrator::default();
        let result = orchestrator.decide(&request(&actor, &units, env));
        assert!(matches!(result, Err(DecisionError::InvalidContext(_))));
        assert_eq!(orchestrator.phase(), DecisionPhase::Errored);
    }
}
