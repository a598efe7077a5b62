//! Leaf behavior trait.
//!
//! This module defines [`LeafBehavior`], the seam between the generic tree
//! machinery and the consumer's domain. The trait is generic over a context
//! type `C`, allowing leaves to read world state (and consume entropy from a
//! seeded generator carried inside the context) while the engine stays
//! domain-agnostic.

use crate::Tick;

/// A leaf evaluator: one condition check or one action attempt.
///
/// Consumers implement this for a closed enum covering their entire leaf set,
/// which keeps tree construction exhaustive: there is no open-ended node
/// hierarchy to validate at runtime.
pub trait LeafBehavior<C> {
    /// Payload produced by action leaves and threaded up to the root tick.
    ///
    /// Condition leaves return `None` for the payload; action leaves return
    /// `Some` exactly when they succeed.
    type Output;

    /// Evaluate this leaf against the given context.
    ///
    /// Leaves are expected to resolve immediately (`Success`/`Failure`);
    /// `Running` is reserved for composites. A leaf whose collaborator call
    /// fails should report `Failure` so the tree can explore alternatives.
    fn evaluate(&self, ctx: &mut C) -> Tick<Self::Output>;
}
