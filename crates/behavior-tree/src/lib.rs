//! Behavior tree engine for turn-based tactical AI.
//!
//! This library provides a minimal, deterministic behavior tree implementation
//! designed for turn-based games where one tree evaluation decides one unit's
//! turn.
//!
//! - **Closed node set**: Control flow is a tagged variant over
//!   selector/sequence/parallel/inverter/repeater/leaf, so traversal and
//!   validation are exhaustive pattern matches
//! - **Resumable**: Composites remember an in-progress child across ticks and
//!   surface [`Status::Running`] to the caller, which owns the time budget
//! - **Explicit output**: Leaves thread their payload (the chosen action) back
//!   up through [`Tick`] instead of writing into a shared blackboard slot
//! - **Validated construction**: Empty composites, duplicate names, and bad
//!   parallel thresholds are rejected at build time, never at tick time
//!
//! # Architecture
//!
//! - [`LeafBehavior`]: trait implemented by the consumer's leaf set
//! - [`Status`] / [`Tick`]: evaluation results
//! - [`Node`] / [`NodeKind`]: the closed node variant
//! - [`Tree`]: validated root with `tick` and `reset`
//! - [`builder`]: shorthand constructors (`selector`, `sequence`, ...)

pub mod builder;
pub mod error;
pub mod leaf;
pub mod node;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use builder::{inverter, leaf, parallel, repeater, selector, sequence};
pub use error::TreeError;
pub use leaf::LeafBehavior;
pub use node::{Node, NodeId, NodeKind};
pub use status::{Status, Tick};
pub use tree::Tree;
