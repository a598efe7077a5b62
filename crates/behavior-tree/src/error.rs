//! Construction-time tree errors.
//!
//! All structural problems are caught when a [`crate::Tree`] is built, before
//! any turn begins. A validated tree cannot produce these at tick time.

/// Error raised while validating a tree structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A selector, sequence, or parallel node has no children.
    #[error("composite node `{name}` has no children")]
    EmptyComposite { name: String },

    /// Two nodes in the same tree share a display name.
    #[error("duplicate node name `{name}` in tree")]
    DuplicateName { name: String },

    /// A parallel threshold is zero or exceeds the child count.
    #[error(
        "parallel node `{name}` has invalid threshold {threshold} for {children} children"
    )]
    InvalidThreshold {
        name: String,
        threshold: usize,
        children: usize,
    },

    /// A bounded repeater was configured with a repeat count of zero.
    #[error("repeater node `{name}` has a repeat limit of zero")]
    ZeroRepeatLimit { name: String },
}
