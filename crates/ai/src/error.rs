//! Decision engine errors.

use behavior_tree::TreeError;

/// Why a decision request could not be served.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// The request's world snapshot was unusable.
    #[error("invalid decision context: {0}")]
    InvalidContext(&'static str),

    /// A preset failed validation.
    #[error(transparent)]
    Tree(#[from] TreeError),
}
