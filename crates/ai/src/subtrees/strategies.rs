//! One strategy root per archetype.
//!
//! Thinking depth gates the optional branches: ability usage appears from
//! depth 2 and repositioning or self-preservation refinements from depth 3,
//! so shallower difficulty settings produce genuinely simpler trees.

use behavior_tree::selector;

use super::{AiBranch, patterns, tactics};
use crate::personality::Archetype;

/// Branches requiring this depth or more are included from depth 2.
const DEPTH_ABILITIES: u8 = 2;
/// Branches requiring this depth or more are included from depth 3.
const DEPTH_POSITIONING: u8 = 3;

/// Builds the strategy root for an archetype at the given thinking depth.
pub fn strategy_for(archetype: Archetype, depth: u8) -> AiBranch {
    match archetype {
        Archetype::Aggressive => aggressive(depth),
        Archetype::Defensive => defensive(depth),
        Archetype::Support => support(depth),
        Archetype::Tactical => tactical(depth),
        Archetype::Balanced => balanced(depth),
        Archetype::ProtectPriority => protect_priority(depth),
    }
}

fn aggressive(depth: u8) -> AiBranch {
    let mut branches = vec![tactics::melee_engagement()];
    if depth >= DEPTH_ABILITIES {
        branches.push(patterns::opportunistic_cast());
    }
    branches.push(patterns::wait_fallback());
    selector("aggressive strategy", branches)
}

/// Self-preservation comes first: below the pressure threshold this tree can
/// only move, guard, or wait, never attack.
fn defensive(depth: u8) -> AiBranch {
    let mut branches = vec![tactics::survival(0.35)];
    branches.push(patterns::attack_when_in_range());
    if depth >= DEPTH_POSITIONING {
        branches.push(patterns::regroup_with_allies());
    }
    branches.push(patterns::wait_fallback());
    selector("defensive strategy", branches)
}

fn support(depth: u8) -> AiBranch {
    let mut branches = vec![tactics::combat_support()];
    if depth >= DEPTH_POSITIONING {
        branches.push(patterns::attack_when_in_range());
    }
    branches.push(patterns::regroup_with_allies());
    branches.push(patterns::wait_fallback());
    selector("support strategy", branches)
}

fn tactical(depth: u8) -> AiBranch {
    let mut branches = Vec::new();
    if depth >= DEPTH_POSITIONING {
        branches.push(tactics::survival(0.25));
    }
    branches.push(patterns::attack_when_in_range());
    if depth >= DEPTH_ABILITIES {
        branches.push(patterns::opportunistic_cast());
    }
    branches.push(tactics::flanking_advance());
    branches.push(patterns::wait_fallback());
    selector("tactical strategy", branches)
}

fn balanced(depth: u8) -> AiBranch {
    let mut branches = Vec::new();
    if depth >= DEPTH_ABILITIES {
        branches.push(patterns::retreat_when_low_health(0.3));
    }
    branches.push(patterns::attack_when_in_range());
    branches.push(patterns::chase_nearest_enemy());
    branches.push(patterns::wait_fallback());
    selector("balanced strategy", branches)
}

/// Protected targets outrank everything else, including ordinary attacks.
fn protect_priority(depth: u8) -> AiBranch {
    let mut branches = vec![tactics::protect_hunting()];
    branches.push(patterns::attack_when_in_range());
    if depth >= DEPTH_ABILITIES {
        branches.push(patterns::opportunistic_cast());
    }
    if depth >= DEPTH_POSITIONING {
        branches.push(patterns::chase_nearest_enemy());
    }
    branches.push(patterns::wait_fallback());
    selector("protect priority strategy", branches)
}
