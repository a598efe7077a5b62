//! The closed node variant and its evaluation semantics.
//!
//! Control flow is a tagged enum ([`NodeKind`]) rather than an open trait
//! hierarchy: selector, sequence, parallel, inverter, repeater, leaf. Every
//! traversal (tick, reset, validation) is an exhaustive match, so adding a
//! node kind is a compile-time event across the whole engine.

use std::borrow::Cow;

use crate::{LeafBehavior, Status, Tick};

/// Stable identity assigned to every node when a [`crate::Tree`] is built.
///
/// Ids are assigned in pre-order, so the root is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One behavior tree node: identity, display name, and its variant.
///
/// Nodes are created through the [`crate::builder`] functions and become
/// usable once [`crate::Tree::new`] has validated the whole structure.
pub struct Node<L> {
    pub(crate) id: NodeId,
    pub(crate) name: Cow<'static, str>,
    pub(crate) kind: NodeKind<L>,
}

/// The closed set of node variants.
pub enum NodeKind<L> {
    /// OR logic: succeeds on the first succeeding child.
    ///
    /// `cursor` remembers the in-progress child while a child is `Running`,
    /// and snaps back to the first child on any terminal result.
    Selector {
        children: Vec<Node<L>>,
        cursor: usize,
    },

    /// AND logic: fails on the first failing child.
    ///
    /// `cursor` remembers completed children across `Running` ticks so they
    /// are not re-executed on resume.
    Sequence {
        children: Vec<Node<L>>,
        cursor: usize,
    },

    /// Ticks every child each call and counts verdicts.
    ///
    /// Succeeds once `success_threshold` children succeeded this tick, fails
    /// once `failure_threshold` failed, otherwise reports `Running`.
    Parallel {
        children: Vec<Node<L>>,
        success_threshold: usize,
        failure_threshold: usize,
    },

    /// NOT logic: swaps Success and Failure, passes Running through.
    Inverter { child: Box<Node<L>> },

    /// Re-invokes its child up to `limit` times (indefinitely when `None`).
    ///
    /// A child failure aborts with Failure and clears the run counter.
    /// Unbounded repeaters yield `Running` between child runs so the caller
    /// can enforce its time budget.
    Repeater {
        child: Box<Node<L>>,
        limit: Option<u32>,
        runs: u32,
    },

    /// A condition check or action attempt supplied by the consumer.
    Leaf { behavior: L },
}

impl<L> Node<L> {
    /// The node's tree-wide identity (valid after `Tree::new`).
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's display name, unique within its tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's variant.
    pub fn kind(&self) -> &NodeKind<L> {
        &self.kind
    }

    /// Evaluates this node against the given context.
    ///
    /// The first payload produced by a succeeding leaf within this tick is
    /// threaded up unchanged; composites never synthesize payloads.
    pub fn tick<C>(&mut self, ctx: &mut C) -> Tick<<L as LeafBehavior<C>>::Output>
    where
        L: LeafBehavior<C>,
    {
        match &mut self.kind {
            NodeKind::Selector { children, cursor } => {
                while *cursor < children.len() {
                    let tick = children[*cursor].tick(ctx);
                    match tick.status {
                        Status::Success => {
                            *cursor = 0;
                            return tick;
                        }
                        Status::Running => return Tick::running(),
                        Status::Failure => *cursor += 1,
                    }
                }
                *cursor = 0;
                Tick::failure()
            }

            NodeKind::Sequence { children, cursor } => {
                let mut output = None;
                while *cursor < children.len() {
                    let tick = children[*cursor].tick(ctx);
                    match tick.status {
                        Status::Success => {
                            if output.is_none() {
                                output = tick.output;
                            }
                            *cursor += 1;
                        }
                        Status::Running => return Tick::running(),
                        Status::Failure => {
                            *cursor = 0;
                            return Tick::failure();
                        }
                    }
                }
                *cursor = 0;
                Tick::success(output)
            }

            NodeKind::Parallel {
                children,
                success_threshold,
                failure_threshold,
            } => {
                let mut successes = 0;
                let mut failures = 0;
                let mut output = None;
                for child in children.iter_mut() {
                    let tick = child.tick(ctx);
                    match tick.status {
                        Status::Success => {
                            successes += 1;
                            if output.is_none() {
                                output = tick.output;
                            }
                        }
                        Status::Failure => failures += 1,
                        Status::Running => {}
                    }
                }
                if successes >= *success_threshold {
                    Tick::success(output)
                } else if failures >= *failure_threshold {
                    Tick::failure()
                } else {
                    Tick::running()
                }
            }

            NodeKind::Inverter { child } => {
                // A failure result never carries a payload, and an inverted
                // success came from a child failure, so the payload is dropped.
                let status = child.tick(ctx).status.invert();
                Tick { status, output: None }
            }

            NodeKind::Repeater { child, limit, runs } => loop {
                let tick = child.tick(ctx);
                match tick.status {
                    Status::Running => return Tick::running(),
                    Status::Failure => {
                        *runs = 0;
                        child.reset();
                        return Tick::failure();
                    }
                    Status::Success => {
                        *runs += 1;
                        child.reset();
                        match *limit {
                            Some(n) if *runs >= n => {
                                *runs = 0;
                                return Tick::success(tick.output);
                            }
                            Some(_) => continue,
                            // Unbounded: yield between runs so the caller can
                            // check its wall-clock budget.
                            None => return Tick::running(),
                        }
                    }
                }
            },

            NodeKind::Leaf { behavior } => behavior.evaluate(ctx),
        }
    }

    /// Clears run-to-run progress in this node and all descendants.
    ///
    /// A full tree evaluation starts with a reset pass so partial progress
    /// from a previous decision never leaks into the next one.
    pub fn reset(&mut self) {
        match &mut self.kind {
            NodeKind::Selector { children, cursor } | NodeKind::Sequence { children, cursor } => {
                *cursor = 0;
                for child in children {
                    child.reset();
                }
            }
            NodeKind::Parallel { children, .. } => {
                for child in children {
                    child.reset();
                }
            }
            NodeKind::Inverter { child } => child.reset(),
            NodeKind::Repeater { child, runs, .. } => {
                *runs = 0;
                child.reset();
            }
            NodeKind::Leaf { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{inverter, leaf, parallel, repeater, selector, sequence};
    use crate::{LeafBehavior, Status, Tick};

    #[derive(Default)]
    struct TestContext {
        log: Vec<&'static str>,
        counter: u32,
    }

    enum TestLeaf {
        Succeed,
        Fail,
        Emit(i32),
        /// Running until `ctx.counter` reaches the given value.
        RunUntil(u32),
    }

    impl LeafBehavior<TestContext> for TestLeaf {
        type Output = i32;

        fn evaluate(&self, ctx: &mut TestContext) -> Tick<i32> {
            match self {
                TestLeaf::Succeed => {
                    ctx.log.push("succeed");
                    Tick::success(None)
                }
                TestLeaf::Fail => {
                    ctx.log.push("fail");
                    Tick::failure()
                }
                TestLeaf::Emit(value) => {
                    ctx.log.push("emit");
                    Tick::success(Some(*value))
                }
                TestLeaf::RunUntil(at) => {
                    ctx.log.push("run_until");
                    if ctx.counter >= *at {
                        Tick::success(Some(99))
                    } else {
                        Tick::running()
                    }
                }
            }
        }
    }

    #[test]
    fn selector_short_circuits_on_first_success() {
        let mut node = selector(
            "root",
            vec![
                leaf("a", TestLeaf::Fail),
                leaf("b", TestLeaf::Emit(7)),
                leaf("c", TestLeaf::Emit(9)),
            ],
        );

        let mut ctx = TestContext::default();
        let tick = node.tick(&mut ctx);
        assert_eq!(tick.status, Status::Success);
        assert_eq!(tick.output, Some(7));
        // Third child never evaluated
        assert_eq!(ctx.log, vec!["fail", "emit"]);
    }

    #[test]
    fn sequence_short_circuits_on_first_failure() {
        let mut node = sequence(
            "root",
            vec![
                leaf("a", TestLeaf::Succeed),
                leaf("b", TestLeaf::Fail),
                leaf("c", TestLeaf::Emit(9)),
            ],
        );

        let mut ctx = TestContext::default();
        let tick = node.tick(&mut ctx);
        assert_eq!(tick.status, Status::Failure);
        assert_eq!(ctx.log, vec!["succeed", "fail"]);
    }

    #[test]
    fn sequence_threads_first_payload_up() {
        let mut node = sequence(
            "root",
            vec![
                leaf("check", TestLeaf::Succeed),
                leaf("act", TestLeaf::Emit(42)),
            ],
        );

        let mut ctx = TestContext::default();
        let tick = node.tick(&mut ctx);
        assert_eq!(tick.status, Status::Success);
        assert_eq!(tick.output, Some(42));
    }

    #[test]
    fn selector_resumes_from_running_child() {
        let mut node = selector(
            "root",
            vec![leaf("a", TestLeaf::Fail), leaf("b", TestLeaf::RunUntil(1))],
        );

        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        assert_eq!(ctx.log, vec!["fail", "run_until"]);

        // Second tick resumes at the running child; the failed child is not
        // re-evaluated.
        ctx.counter = 1;
        let tick = node.tick(&mut ctx);
        assert_eq!(tick.status, Status::Success);
        assert_eq!(tick.output, Some(99));
        assert_eq!(ctx.log, vec!["fail", "run_until", "run_until"]);
    }

    #[test]
    fn sequence_does_not_rerun_completed_children() {
        let mut node = sequence(
            "root",
            vec![
                leaf("a", TestLeaf::Succeed),
                leaf("b", TestLeaf::RunUntil(1)),
            ],
        );

        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        ctx.counter = 1;
        assert_eq!(node.tick(&mut ctx).status, Status::Success);
        assert_eq!(ctx.log, vec!["succeed", "run_until", "run_until"]);
    }

    #[test]
    fn parallel_reports_on_thresholds() {
        let mut ctx = TestContext::default();

        let mut success = parallel(
            "par",
            vec![
                leaf("a", TestLeaf::Succeed),
                leaf("b", TestLeaf::Fail),
                leaf("c", TestLeaf::Emit(3)),
            ],
            2,
            3,
        );
        let tick = success.tick(&mut ctx);
        assert_eq!(tick.status, Status::Success);
        assert_eq!(tick.output, Some(3));

        let mut failure = parallel(
            "par",
            vec![leaf("a", TestLeaf::Fail), leaf("b", TestLeaf::Fail)],
            2,
            2,
        );
        assert_eq!(failure.tick(&mut ctx).status, Status::Failure);
    }

    #[test]
    fn parallel_runs_while_thresholds_unmet() {
        let mut node = parallel(
            "par",
            vec![leaf("a", TestLeaf::Succeed), leaf("b", TestLeaf::Fail)],
            2,
            2,
        );
        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
    }

    #[test]
    fn inverter_swaps_and_drops_payload() {
        let mut ctx = TestContext::default();

        let mut inverted = inverter("not", leaf("emit", TestLeaf::Emit(5)));
        let tick = inverted.tick(&mut ctx);
        assert_eq!(tick.status, Status::Failure);
        assert!(tick.output.is_none());

        let mut inverted = inverter("not", leaf("fail", TestLeaf::Fail));
        assert_eq!(inverted.tick(&mut ctx).status, Status::Success);
    }

    #[test]
    fn repeater_runs_child_to_limit() {
        let mut node = repeater("rep", leaf("emit", TestLeaf::Emit(1)), Some(3));
        let mut ctx = TestContext::default();
        let tick = node.tick(&mut ctx);
        assert_eq!(tick.status, Status::Success);
        assert_eq!(ctx.log.len(), 3);
    }

    #[test]
    fn repeater_aborts_and_resets_on_child_failure() {
        let mut node = repeater("rep", leaf("fail", TestLeaf::Fail), Some(3));
        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Failure);
        match &node.kind {
            crate::NodeKind::Repeater { runs, .. } => assert_eq!(*runs, 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn unbounded_repeater_yields_between_runs() {
        let mut node = repeater("rep", leaf("emit", TestLeaf::Emit(1)), None);
        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        assert_eq!(ctx.log.len(), 2);
    }

    #[test]
    fn reset_clears_composite_progress() {
        let mut node = selector(
            "root",
            vec![leaf("a", TestLeaf::Fail), leaf("b", TestLeaf::RunUntil(5))],
        );

        let mut ctx = TestContext::default();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        node.reset();

        // After reset the selector starts from its first child again.
        ctx.log.clear();
        assert_eq!(node.tick(&mut ctx).status, Status::Running);
        assert_eq!(ctx.log, vec!["fail", "run_until"]);
    }
}
