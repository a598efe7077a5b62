//! Personality model: per-unit trait vectors and archetype tables.
//!
//! Five clamped `[0, 1]` trait scalars bias action scoring and target
//! ranking. Archetypes are table-driven variations of the same scoring
//! functions, not separate code paths: the archetype picks the weight table,
//! the traits supply the inputs. Everything here is a pure function of traits
//! plus target/context; there is no mutable state.

use battle_core::{ActionKind, Unit};
use serde::{Deserialize, Serialize};

/// A named behavior profile mapped to a specific behavior tree shape.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Archetype {
    Aggressive,
    Defensive,
    Support,
    Tactical,
    Balanced,
    /// NPC-hunter profile selected when protected targets are visible.
    ProtectPriority,
}

/// The five trait scalars, each clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    aggressiveness: f32,
    defensiveness: f32,
    supportiveness: f32,
    tacticalness: f32,
    risk_tolerance: f32,
}

impl PersonalityTraits {
    /// Builds a trait vector, clamping each scalar into `[0, 1]`.
    pub fn new(
        aggressiveness: f32,
        defensiveness: f32,
        supportiveness: f32,
        tacticalness: f32,
        risk_tolerance: f32,
    ) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            aggressiveness: clamp(aggressiveness),
            defensiveness: clamp(defensiveness),
            supportiveness: clamp(supportiveness),
            tacticalness: clamp(tacticalness),
            risk_tolerance: clamp(risk_tolerance),
        }
    }

    pub fn aggressiveness(&self) -> f32 {
        self.aggressiveness
    }

    pub fn defensiveness(&self) -> f32 {
        self.defensiveness
    }

    pub fn supportiveness(&self) -> f32 {
        self.supportiveness
    }

    pub fn tacticalness(&self) -> f32 {
        self.tacticalness
    }

    pub fn risk_tolerance(&self) -> f32 {
        self.risk_tolerance
    }
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5, 0.5)
    }
}

/// An archetype paired with its trait vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub archetype: Archetype,
    pub traits: PersonalityTraits,
}

impl Personality {
    /// The canonical trait table for each archetype.
    pub fn of(archetype: Archetype) -> Self {
        let traits = match archetype {
            Archetype::Aggressive => PersonalityTraits::new(0.9, 0.2, 0.1, 0.3, 0.8),
            Archetype::Defensive => PersonalityTraits::new(0.2, 0.9, 0.3, 0.4, 0.2),
            Archetype::Support => PersonalityTraits::new(0.2, 0.4, 0.9, 0.5, 0.3),
            Archetype::Tactical => PersonalityTraits::new(0.5, 0.5, 0.3, 0.9, 0.5),
            Archetype::Balanced => PersonalityTraits::default(),
            // Hunters press the protected target hard and accept exposure.
            Archetype::ProtectPriority => PersonalityTraits::new(0.8, 0.3, 0.1, 0.7, 0.7),
        };
        Self { archetype, traits }
    }

    /// Custom traits under a given archetype's tree shape.
    pub fn with_traits(archetype: Archetype, traits: PersonalityTraits) -> Self {
        Self { archetype, traits }
    }

    /// Scoring bias for an action kind, in roughly `[-1, 1]`.
    ///
    /// Archetypes reweight the blend: an aggressive unit values an attack at
    /// `0.7 * aggressiveness` where the balanced table uses
    /// `0.5 * (aggressiveness - defensiveness)`.
    pub fn action_modifier(&self, kind: ActionKind) -> f32 {
        let t = &self.traits;
        match kind {
            ActionKind::Attack => match self.archetype {
                Archetype::Aggressive | Archetype::ProtectPriority => 0.7 * t.aggressiveness,
                Archetype::Defensive => 0.4 * t.aggressiveness - 0.3 * t.defensiveness,
                _ => 0.5 * (t.aggressiveness - t.defensiveness),
            },
            ActionKind::Guard => match self.archetype {
                Archetype::Defensive => 0.7 * t.defensiveness,
                _ => 0.5 * (t.defensiveness - t.aggressiveness),
            },
            ActionKind::UseAbility => match self.archetype {
                Archetype::Support => 0.7 * t.supportiveness,
                Archetype::Tactical => 0.6 * t.tacticalness,
                _ => 0.4 * t.supportiveness + 0.2 * t.tacticalness,
            },
            ActionKind::Move => 0.4 * t.tacticalness,
            ActionKind::Wait => 0.1 * (1.0 - t.aggressiveness),
        }
    }

    /// Additive priority bias for one potential target.
    ///
    /// Aggression favors wounded targets, defensiveness favors dangerous
    /// ones, tacticalness favors high-value ones (casters, fast units,
    /// lightly armored units).
    pub fn target_priority_modifier(&self, target: &Unit) -> f32 {
        let t = &self.traits;
        let mut modifier = t.aggressiveness * 15.0 * (1.0 - target.hp_ratio());
        modifier += t.defensiveness * 0.4 * threat_level(target);

        let mut tactical_value = 0.0;
        if target.stats.max_mp >= 30 {
            tactical_value += 8.0; // caster
        }
        if target.stats.speed >= 8 {
            tactical_value += 5.0;
        }
        if target.stats.defense <= 5 {
            tactical_value += 5.0;
        }
        modifier + t.tacticalness * tactical_value
    }

    /// Whether a risk worth `reward` (with `penalty` on failure, both in
    /// `[0, 1]`) should be taken at the given risk level.
    ///
    /// The tactical archetype computes the expected value; everyone else
    /// compares the risk against their tolerance.
    pub fn should_take_risk(&self, risk: f32, reward: f32, penalty: f32) -> bool {
        match self.archetype {
            Archetype::Tactical => (1.0 - risk) * reward + risk * penalty > 0.5,
            _ => risk <= self.traits.risk_tolerance,
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::of(Archetype::Balanced)
    }
}

/// How dangerous a unit is to stand next to.
fn threat_level(unit: &Unit) -> f32 {
    let weapon_power = unit.weapon.as_ref().map_or(0, |w| w.power);
    (unit.stats.attack + weapon_power) as f32
}
