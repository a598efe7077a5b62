//! Validated tree root.

use std::collections::HashSet;
use std::fmt;

use crate::node::{Node, NodeId, NodeKind};
use crate::{LeafBehavior, Tick, TreeError};

/// A validated behavior tree.
///
/// Construction walks the whole structure once: it assigns pre-order
/// [`NodeId`]s, rejects empty composites, duplicate names, invalid parallel
/// thresholds, and zero repeat limits. After that, ticking can only yield
/// Success/Failure/Running, never a structural error.
pub struct Tree<L> {
    root: Node<L>,
    node_count: u32,
}

impl<L> Tree<L> {
    /// Validates the node structure and builds the tree.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] describing the first structural problem found
    /// in pre-order.
    pub fn new(mut root: Node<L>) -> Result<Self, TreeError> {
        let mut next_id = 0u32;
        let mut seen = HashSet::new();
        validate(&mut root, &mut next_id, &mut seen)?;
        Ok(Self {
            root,
            node_count: next_id,
        })
    }

    /// Evaluates the tree once from wherever the previous tick left off.
    ///
    /// Call [`Tree::reset`] first when starting a fresh decision.
    pub fn tick<C>(&mut self, ctx: &mut C) -> Tick<<L as LeafBehavior<C>>::Output>
    where
        L: LeafBehavior<C>,
    {
        self.root.tick(ctx)
    }

    /// Clears all run-to-run progress so the next tick starts from the first
    /// branch.
    pub fn reset(&mut self) {
        self.root.reset();
    }

    /// The root node.
    pub fn root(&self) -> &Node<L> {
        &self.root
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> u32 {
        self.node_count
    }
}

// Leaves carry arbitrary behaviors, so a derive would demand `L: Debug`.
// The structural summary is enough for assertions and error output.
impl<L> fmt::Debug for Tree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root.name())
            .field("node_count", &self.node_count)
            .finish()
    }
}

fn validate<L>(
    node: &mut Node<L>,
    next_id: &mut u32,
    seen: &mut HashSet<String>,
) -> Result<(), TreeError> {
    node.id = NodeId(*next_id);
    *next_id += 1;

    if !seen.insert(node.name.to_string()) {
        return Err(TreeError::DuplicateName {
            name: node.name.to_string(),
        });
    }

    match &mut node.kind {
        NodeKind::Selector { children, .. } | NodeKind::Sequence { children, .. } => {
            if children.is_empty() {
                return Err(TreeError::EmptyComposite {
                    name: node.name.to_string(),
                });
            }
            for child in children {
                validate(child, next_id, seen)?;
            }
        }
        NodeKind::Parallel {
            children,
            success_threshold,
            failure_threshold,
        } => {
            if children.is_empty() {
                return Err(TreeError::EmptyComposite {
                    name: node.name.to_string(),
                });
            }
            for threshold in [*success_threshold, *failure_threshold] {
                if threshold == 0 || threshold > children.len() {
                    return Err(TreeError::InvalidThreshold {
                        name: node.name.to_string(),
                        threshold,
                        children: children.len(),
                    });
                }
            }
            for child in children {
                validate(child, next_id, seen)?;
            }
        }
        NodeKind::Inverter { child } => validate(child, next_id, seen)?,
        NodeKind::Repeater { child, limit, .. } => {
            if *limit == Some(0) {
                return Err(TreeError::ZeroRepeatLimit {
                    name: node.name.to_string(),
                });
            }
            validate(child, next_id, seen)?;
        }
        NodeKind::Leaf { .. } => {}
    }

    Ok(())
}
