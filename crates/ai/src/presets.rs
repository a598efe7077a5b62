//! Validated tree presets.

use behavior_tree::{Tree, TreeError};

use crate::nodes::AiNode;
use crate::personality::Archetype;
use crate::subtrees::strategies;

/// A validated decision tree over the leaf library.
pub type AiTree = Tree<AiNode>;

/// Builds and validates the preset tree for an archetype.
///
/// Depth values outside `1..=5` are accepted here and simply gate every
/// optional branch in or out; the difficulty settings layer is responsible
/// for keeping depth in range.
pub fn tree_for(archetype: Archetype, depth: u8) -> Result<AiTree, TreeError> {
    Tree::new(strategies::strategy_for(archetype, depth))
}
