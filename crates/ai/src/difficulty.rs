//! Difficulty settings and the difficulty manager.
//!
//! The manager holds one validated [`DifficultySettings`] per named tier plus
//! a live copy for the active tier that can drift (player-strength scaling,
//! adaptive tuning) without touching the tier table unless explicitly saved
//! back. It is an explicitly constructed dependency injected into the
//! orchestrator; there is no process-wide singleton, so tests and what-if
//! tooling can run isolated instances side by side.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

/// Named difficulty tiers, easiest first.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
    Expert,
    Master,
}

/// A rejected settings update. The previous value is always left intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("thinking depth {0} outside 1..=5")]
    InvalidThinkingDepth(u8),

    #[error("thinking time limit must be positive")]
    InvalidThinkingTimeLimit,
}

/// Tunable decision parameters for one difficulty tier.
///
/// Fields are private behind validated setters: integer-valued settings
/// reject out-of-range updates, ratio-valued settings clamp into `[0, 1]`
/// (non-finite updates are ignored). Either way a bad update never corrupts
/// the previous value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    thinking_depth: u8,
    randomness_factor: f32,
    mistake_probability: f32,
    reaction_delay_ms: u32,
    skill_usage_frequency: f32,
    thinking_time_limit_ms: u64,
}

impl DifficultySettings {
    pub const MIN_THINKING_DEPTH: u8 = 1;
    pub const MAX_THINKING_DEPTH: u8 = 5;

    /// The preset table for a named tier.
    pub fn for_tier(tier: DifficultyTier) -> Self {
        let (depth, randomness, mistakes, delay_ms, skills, limit_ms) = match tier {
            DifficultyTier::Easy => (1, 0.50, 0.30, 800, 0.20, 2000),
            DifficultyTier::Normal => (2, 0.30, 0.15, 500, 0.40, 3000),
            DifficultyTier::Hard => (3, 0.20, 0.08, 300, 0.60, 4000),
            DifficultyTier::Expert => (4, 0.10, 0.03, 150, 0.80, 5000),
            DifficultyTier::Master => (5, 0.05, 0.01, 100, 0.95, 6000),
        };
        Self {
            thinking_depth: depth,
            randomness_factor: randomness,
            mistake_probability: mistakes,
            reaction_delay_ms: delay_ms,
            skill_usage_frequency: skills,
            thinking_time_limit_ms: limit_ms,
        }
    }

    pub fn thinking_depth(&self) -> u8 {
        self.thinking_depth
    }

    pub fn randomness_factor(&self) -> f32 {
        self.randomness_factor
    }

    pub fn mistake_probability(&self) -> f32 {
        self.mistake_probability
    }

    pub fn reaction_delay_ms(&self) -> u32 {
        self.reaction_delay_ms
    }

    pub fn skill_usage_frequency(&self) -> f32 {
        self.skill_usage_frequency
    }

    pub fn thinking_time_limit_ms(&self) -> u64 {
        self.thinking_time_limit_ms
    }

    /// Sets the thinking depth, rejecting values outside `1..=5`.
    pub fn set_thinking_depth(&mut self, depth: u8) -> Result<(), SettingsError> {
        if !(Self::MIN_THINKING_DEPTH..=Self::MAX_THINKING_DEPTH).contains(&depth) {
            return Err(SettingsError::InvalidThinkingDepth(depth));
        }
        self.thinking_depth = depth;
        Ok(())
    }

    /// Sets the randomness factor, clamped into `[0, 1]`.
    pub fn set_randomness_factor(&mut self, value: f32) {
        if value.is_finite() {
            self.randomness_factor = value.clamp(0.0, 1.0);
        }
    }

    /// Sets the mistake probability, clamped into `[0, 1]`.
    pub fn set_mistake_probability(&mut self, value: f32) {
        if value.is_finite() {
            self.mistake_probability = value.clamp(0.0, 1.0);
        }
    }

    pub fn set_reaction_delay_ms(&mut self, value: u32) {
        self.reaction_delay_ms = value;
    }

    /// Sets the skill usage frequency, clamped into `[0, 1]`.
    pub fn set_skill_usage_frequency(&mut self, value: f32) {
        if value.is_finite() {
            self.skill_usage_frequency = value.clamp(0.0, 1.0);
        }
    }

    /// Sets the thinking time limit, rejecting zero.
    pub fn set_thinking_time_limit_ms(&mut self, value: u64) -> Result<(), SettingsError> {
        if value == 0 {
            return Err(SettingsError::InvalidThinkingTimeLimit);
        }
        self.thinking_time_limit_ms = value;
        Ok(())
    }
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self::for_tier(DifficultyTier::Normal)
    }
}

/// Snapshot of the player party used for strength scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub average_level: f32,
    pub size: usize,
}

/// Result of one finished battle, fed to the adaptive loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub player_won: bool,
    pub turns: u32,
}

/// Tunables for player-strength scaling and adaptive tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Number of outcomes collected before an adjustment is considered.
    pub window: usize,
    /// Player win rate the tuner steers toward.
    pub target_win_rate: f32,
    /// Deviation from the target tolerated without adjustment.
    pub tolerance: f32,
    /// Fraction of the observed deviation applied as a nudge.
    pub adjustment_rate: f32,
    /// Lower bound of the player-strength scaling band.
    pub min_scaling: f32,
    /// Upper bound of the player-strength scaling band.
    pub max_scaling: f32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            window: 10,
            target_win_rate: 0.55,
            tolerance: 0.10,
            adjustment_rate: 0.5,
            min_scaling: 0.8,
            max_scaling: 1.3,
        }
    }
}

/// Holds the tier table, the active tier's live settings, and the adaptive
/// performance window.
#[derive(Clone, Debug)]
pub struct DifficultyManager {
    tiers: BTreeMap<DifficultyTier, DifficultySettings>,
    active_tier: DifficultyTier,
    live: DifficultySettings,
    adaptive: AdaptiveConfig,
    window: VecDeque<BattleOutcome>,
}

impl DifficultyManager {
    /// Builds a manager with the full preset tier table, active on `tier`.
    pub fn new(tier: DifficultyTier) -> Self {
        let tiers = [
            DifficultyTier::Easy,
            DifficultyTier::Normal,
            DifficultyTier::Hard,
            DifficultyTier::Expert,
            DifficultyTier::Master,
        ]
        .into_iter()
        .map(|t| (t, DifficultySettings::for_tier(t)))
        .collect();

        Self {
            tiers,
            active_tier: tier,
            live: DifficultySettings::for_tier(tier),
            adaptive: AdaptiveConfig::default(),
            window: VecDeque::new(),
        }
    }

    /// Overrides the adaptive tunables (builder pattern).
    #[must_use]
    pub fn with_adaptive(mut self, adaptive: AdaptiveConfig) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn active_tier(&self) -> DifficultyTier {
        self.active_tier
    }

    /// The live settings decisions actually run with.
    pub fn live(&self) -> &DifficultySettings {
        &self.live
    }

    /// Mutable access to the live settings (drift never touches the table).
    pub fn live_mut(&mut self) -> &mut DifficultySettings {
        &mut self.live
    }

    /// The stored table entry for a tier.
    pub fn tier_settings(&self, tier: DifficultyTier) -> &DifficultySettings {
        &self.tiers[&tier]
    }

    /// Switches the active tier, resetting the live settings from the table
    /// and clearing the performance window.
    pub fn set_tier(&mut self, tier: DifficultyTier) {
        self.active_tier = tier;
        self.live = self.tiers[&tier].clone();
        self.window.clear();
    }

    /// Explicitly writes the live settings back into the tier table.
    pub fn save_live_to_tier(&mut self) {
        self.tiers.insert(self.active_tier, self.live.clone());
    }

    /// Returns a settings snapshot scaled for the player's party strength.
    ///
    /// The scaling factor grows with average level and party size and is
    /// clamped to the configured band; stronger parties face deeper thinking,
    /// fewer mistakes, less randomness, and more skill usage. The live
    /// settings themselves are not modified.
    pub fn adjust_for_player_strength(&self, party: &PartyInfo) -> DifficultySettings {
        let raw = (party.average_level / 10.0) * (1.0 + 0.05 * (party.size as f32 - 4.0));
        let factor = raw.clamp(self.adaptive.min_scaling, self.adaptive.max_scaling);

        let mut scaled = self.live.clone();
        let depth = (self.live.thinking_depth() as f32 * factor).round() as u8;
        let _ = scaled.set_thinking_depth(depth.clamp(
            DifficultySettings::MIN_THINKING_DEPTH,
            DifficultySettings::MAX_THINKING_DEPTH,
        ));
        scaled.set_randomness_factor(self.live.randomness_factor() / factor);
        scaled.set_mistake_probability(self.live.mistake_probability() / factor);
        scaled.set_skill_usage_frequency(self.live.skill_usage_frequency() * factor);
        scaled
    }

    /// Appends a battle outcome to the bounded performance window.
    ///
    /// Once the window is full, a win rate off the target by more than the
    /// tolerance nudges the live settings proportionally to the deviation
    /// and clears the window for the next measurement period. All nudges are
    /// bounded to each field's valid range by the setters.
    pub fn record_outcome(&mut self, outcome: BattleOutcome) {
        self.window.push_back(outcome);
        if self.window.len() < self.adaptive.window {
            return;
        }

        let wins = self.window.iter().filter(|o| o.player_won).count();
        let win_rate = wins as f32 / self.window.len() as f32;
        let deviation = win_rate - self.adaptive.target_win_rate;
        self.window.clear();

        if deviation.abs() <= self.adaptive.tolerance {
            return;
        }

        // Player winning too often -> positive deviation -> harder settings.
        let nudge = deviation * self.adaptive.adjustment_rate;
        let depth = (self.live.thinking_depth() as f32 + nudge * 5.0)
            .round()
            .clamp(
                DifficultySettings::MIN_THINKING_DEPTH as f32,
                DifficultySettings::MAX_THINKING_DEPTH as f32,
            ) as u8;
        let _ = self.live.set_thinking_depth(depth);
        self.live
            .set_randomness_factor(self.live.randomness_factor() - nudge);
        self.live
            .set_mistake_probability(self.live.mistake_probability() - nudge * 0.5);
        self.live
            .set_skill_usage_frequency(self.live.skill_usage_frequency() + nudge);

        tracing::info!(
            tier = %self.active_tier,
            win_rate,
            deviation,
            "adaptive difficulty adjusted live settings"
        );
    }

    /// Serializes the full tier table to RON.
    pub fn export_tiers(&self) -> Result<String, ron::Error> {
        ron::to_string(&self.tiers)
    }

    /// Replaces the tier table from a RON export.
    ///
    /// The live settings are re-seeded from the imported active tier.
    pub fn import_tiers(&mut self, data: &str) -> Result<(), ron::de::SpannedError> {
        let tiers: BTreeMap<DifficultyTier, DifficultySettings> = ron::from_str(data)?;
        self.tiers = tiers;
        if let Some(active) = self.tiers.get(&self.active_tier) {
            self.live = active.clone();
        }
        Ok(())
    }
}

impl Default for DifficultyManager {
    fn default() -> Self {
        Self::new(DifficultyTier::Normal)
    }
}
