//! Decision observation hook.
//!
//! Observers receive an owned snapshot of every committed decision, suitable
//! for debug overlays, replay capture, or telemetry sinks. The orchestrator
//! never depends on what observers do with the event.

use std::time::Duration;

use battle_core::{Action, UnitId};
use serde::Serialize;

use crate::orchestrator::DecisionPhase;
use crate::personality::Archetype;
use crate::targeting::CandidateSummary;

/// Snapshot of one committed decision.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionEvent {
    pub unit: UnitId,
    pub turn: u32,
    pub archetype: Archetype,
    pub action: Action,
    pub candidates: Vec<CandidateSummary>,
    #[serde(skip)]
    pub elapsed: Duration,
    pub phase: DecisionPhase,
}

/// Receives every committed decision. The default implementation ignores
/// events, so observers only override what they care about.
pub trait DecisionObserver: Send + Sync {
    fn on_decision(&mut self, event: &DecisionEvent) {
        let _ = event;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_for_telemetry() {
        let event = DecisionEvent {
            unit: UnitId(7),
            turn: 3,
            archetype: Archetype::Aggressive,
            action: Action::attack(UnitId(2), 61.5, "in reach"),
            candidates: Vec::new(),
            elapsed: Duration::from_millis(2),
            phase: DecisionPhase::Committed,
        };

        let json = serde_json::to_value(&event).expect("event serializes");
        assert_eq!(json["unit"], 7);
        assert_eq!(json["archetype"], "Aggressive");
        assert_eq!(json["action"]["kind"], "Attack");
        assert_eq!(json["phase"], "Committed");
        assert!(json.get("elapsed").is_none());
    }
}
