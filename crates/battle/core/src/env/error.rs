//! Errors for missing collaborator interfaces.

/// Raised when a consumer asks the environment for an oracle that was not
/// provided.
///
/// Leaf evaluators treat these as "that alternative is unavailable" and fail
/// the leaf rather than the whole decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,

    #[error("movement oracle not available")]
    MovementNotAvailable,

    #[error("combat oracle not available")]
    CombatNotAvailable,

    #[error("ability oracle not available")]
    AbilityNotAvailable,

    #[error("protection oracle not available")]
    ProtectionNotAvailable,
}
