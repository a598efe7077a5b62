//! Tactical decision engine for non-player units.
//!
//! Given a read-only snapshot of the battle (units plus oracle access to
//! maps, movement, combat, abilities, and protection flags), the engine
//! commits exactly one action per request. The pipeline:
//!
//! 1. [`DifficultyManager`] resolves the effective settings, including
//!    player-strength scaling and adaptive tuning.
//! 2. The situation picks an [`Archetype`]; its [`Personality`] biases all
//!    scoring.
//! 3. [`TargetAnalyzer`] ranks hostile units into justified candidates.
//! 4. A validated behavior tree preset runs over the [`DecisionContext`]
//!    under a wall-clock limit, proposing an [`Action`].
//! 5. [`DecisionOrchestrator`] commits the result with history, statistics,
//!    and observer notification.
//!
//! Every decision is deterministic for a given request and seed: entropy
//! comes only from the seeded generator carried in the context.
//!
//! [`Action`]: battle_core::Action

pub mod context;
pub mod difficulty;
pub mod error;
pub mod history;
pub mod nodes;
pub mod observer;
pub mod orchestrator;
pub mod personality;
pub mod presets;
pub mod subtrees;
pub mod targeting;

pub use context::{DecisionContext, TargetClass};
pub use difficulty::{
    AdaptiveConfig, BattleOutcome, DifficultyManager, DifficultySettings, DifficultyTier,
    PartyInfo, SettingsError,
};
pub use error::DecisionError;
pub use history::{DecisionHistory, DecisionRecord, DecisionStats, HISTORY_CAPACITY};
pub use nodes::{ActionNode, AiNode, Condition};
pub use observer::{DecisionEvent, DecisionObserver};
pub use orchestrator::{
    CRITICAL_HEALTH, Decision, DecisionOrchestrator, DecisionPhase, DecisionRequest,
};
pub use personality::{Archetype, Personality, PersonalityTraits};
pub use presets::{AiTree, tree_for};
pub use targeting::{CandidateSummary, CandidateTarget, TargetAnalyzer};
