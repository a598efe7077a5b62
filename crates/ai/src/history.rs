//! Per-unit decision history and aggregate statistics.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use battle_core::{Action, ActionKind};

use crate::personality::Archetype;

/// Retained decisions per unit. Older entries are evicted.
pub const HISTORY_CAPACITY: usize = 10;

/// One committed decision.
#[derive(Clone, Debug)]
pub struct DecisionRecord {
    pub turn: u32,
    pub archetype: Archetype,
    pub action: Action,
    pub elapsed: Duration,
    pub targeted_protected: bool,
}

/// Bounded ring of the most recent decisions for one unit.
#[derive(Clone, Debug, Default)]
pub struct DecisionHistory {
    records: VecDeque<DecisionRecord>,
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DecisionRecord) {
        if self.records.len() == HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &DecisionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&DecisionRecord> {
        self.records.back()
    }
}

/// Aggregates over a set of decision records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecisionStats {
    pub decisions: usize,
    pub kind_counts: BTreeMap<ActionKind, usize>,
    pub protected_target_rate: f32,
    pub average_decision_time: Duration,
}

impl DecisionStats {
    pub fn from_records<'a>(records: impl Iterator<Item = &'a DecisionRecord>) -> Self {
        let mut stats = Self::default();
        let mut total_time = Duration::ZERO;
        let mut protected = 0usize;

        for record in records {
            stats.decisions += 1;
            *stats.kind_counts.entry(record.action.kind).or_insert(0) += 1;
            total_time += record.elapsed;
            if record.targeted_protected {
                protected += 1;
            }
        }

        if stats.decisions > 0 {
            stats.protected_target_rate = protected as f32 / stats.decisions as f32;
            stats.average_decision_time = total_time / stats.decisions as u32;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(turn: u32, action: Action, protected: bool) -> DecisionRecord {
        DecisionRecord {
            turn,
            archetype: Archetype::Balanced,
            action,
            elapsed: Duration::from_millis(2),
            targeted_protected: protected,
        }
    }

    #[test]
    fn history_evicts_beyond_capacity() {
        let mut history = DecisionHistory::new();
        for turn in 0..15 {
            history.push(record(turn, Action::wait("idle"), false));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next().unwrap().turn, 5);
        assert_eq!(history.last().unwrap().turn, 14);
    }

    #[test]
    fn stats_aggregate_kinds_and_rates() {
        use battle_core::{Position, UnitId};

        let mut history = DecisionHistory::new();
        history.push(record(1, Action::attack(UnitId(9), 50.0, "near"), true));
        history.push(record(2, Action::attack(UnitId(9), 50.0, "near"), false));
        history.push(record(3, Action::move_to(Position::new(1, 0), 40.0, "go"), false));
        history.push(record(4, Action::wait("idle"), false));

        let stats = DecisionStats::from_records(history.iter());
        assert_eq!(stats.decisions, 4);
        assert_eq!(stats.kind_counts[&ActionKind::Attack], 2);
        assert_eq!(stats.kind_counts[&ActionKind::Move], 1);
        assert_eq!(stats.protected_target_rate, 0.25);
        assert_eq!(stats.average_decision_time, Duration::from_millis(2));
    }
}
