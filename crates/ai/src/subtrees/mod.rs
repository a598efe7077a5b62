//! Reusable decision subtrees, layered bottom-up.
//!
//! - [`patterns`]: the smallest reusable pieces, one intent each (attack
//!   what is in range, retreat when hurt, heal the worst-off ally).
//! - [`tactics`]: patterns combined into situational behaviors (melee
//!   engagement, protected-target hunting, combat support).
//! - [`strategies`]: one root per archetype, assembled from tactics and
//!   patterns with deeper branches gated by thinking depth.
//!
//! Node display names double as identities, so every branch keeps its leaf
//! names unique within any tree it can appear in.

pub mod patterns;
pub mod strategies;
pub mod tactics;

use behavior_tree::Node;

use crate::nodes::AiNode;

/// A branch of a decision tree, prior to validation.
pub type AiBranch = Node<AiNode>;
