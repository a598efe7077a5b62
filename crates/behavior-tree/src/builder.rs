//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! trees. Each function names the node it creates; names double as node
//! identities and must be unique within a tree (checked by
//! [`crate::Tree::new`]).

use std::borrow::Cow;

use crate::node::{Node, NodeId, NodeKind};

fn node<L>(name: impl Into<Cow<'static, str>>, kind: NodeKind<L>) -> Node<L> {
    Node {
        // Real ids are assigned by Tree::new in pre-order.
        id: NodeId(0),
        name: name.into(),
        kind,
    }
}

/// Creates a selector node (OR logic).
pub fn selector<L>(name: impl Into<Cow<'static, str>>, children: Vec<Node<L>>) -> Node<L> {
    node(name, NodeKind::Selector { children, cursor: 0 })
}

/// Creates a sequence node (AND logic).
pub fn sequence<L>(name: impl Into<Cow<'static, str>>, children: Vec<Node<L>>) -> Node<L> {
    node(name, NodeKind::Sequence { children, cursor: 0 })
}

/// Creates a parallel node with explicit success/failure thresholds.
pub fn parallel<L>(
    name: impl Into<Cow<'static, str>>,
    children: Vec<Node<L>>,
    success_threshold: usize,
    failure_threshold: usize,
) -> Node<L> {
    node(
        name,
        NodeKind::Parallel {
            children,
            success_threshold,
            failure_threshold,
        },
    )
}

/// Creates an inverter node (NOT logic).
pub fn inverter<L>(name: impl Into<Cow<'static, str>>, child: Node<L>) -> Node<L> {
    node(
        name,
        NodeKind::Inverter {
            child: Box::new(child),
        },
    )
}

/// Creates a repeater node.
///
/// `limit` is the number of child runs required for Success; `None` repeats
/// indefinitely, yielding `Running` between runs.
pub fn repeater<L>(
    name: impl Into<Cow<'static, str>>,
    child: Node<L>,
    limit: Option<u32>,
) -> Node<L> {
    node(
        name,
        NodeKind::Repeater {
            child: Box::new(child),
            limit,
            runs: 0,
        },
    )
}

/// Creates a leaf node wrapping a consumer-supplied behavior.
pub fn leaf<L>(name: impl Into<Cow<'static, str>>, behavior: L) -> Node<L> {
    node(name, NodeKind::Leaf { behavior })
}
