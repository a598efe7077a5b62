//! Leaf node library.
//!
//! [`AiNode`] is the closed leaf set the tree engine knows how to evaluate:
//! every condition check and action proposal is a variant here, so presets
//! are assembled from a finite, exhaustively matched vocabulary.

mod actions;
mod conditions;

pub use actions::ActionNode;
pub use conditions::Condition;

use battle_core::Action;
use behavior_tree::{LeafBehavior, Tick};

use crate::context::DecisionContext;

/// One leaf of a decision tree: either a condition or an action proposal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AiNode {
    Condition(Condition),
    Action(ActionNode),
}

impl From<Condition> for AiNode {
    fn from(condition: Condition) -> Self {
        AiNode::Condition(condition)
    }
}

impl From<ActionNode> for AiNode {
    fn from(action: ActionNode) -> Self {
        AiNode::Action(action)
    }
}

impl<'a> LeafBehavior<DecisionContext<'a>> for AiNode {
    type Output = Action;

    fn evaluate(&self, ctx: &mut DecisionContext<'a>) -> Tick<Action> {
        match self {
            AiNode::Condition(condition) => {
                if condition.evaluate(ctx) {
                    Tick::success(None)
                } else {
                    Tick::failure()
                }
            }
            AiNode::Action(action) => action.evaluate(ctx),
        }
    }
}
