//! StageTrace — Every stage event produced by one spin
//!
//! Filled by the engine while a spin is revealed and settled; read by
//! presentation code and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};
use crate::taxonomy::JackpotTier;

/// A complete trace of stage events for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// `spin-NNNNNN`
    pub spin_id: String,

    /// All events in emission order
    pub events: Vec<StageEvent>,

    /// When this trace was started
    pub recorded_at: DateTime<Utc>,

    /// True if the reveal was collapsed by a skip request
    #[serde(default)]
    pub skipped: bool,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl StageTrace {
    pub fn new(spin_id: impl Into<String>) -> Self {
        Self {
            spin_id: spin_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            skipped: false,
            metadata: serde_json::Map::new(),
        }
    }

    /// Append in emission order
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Time between first and last event in milliseconds
    pub fn duration_ms(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Any event of this type name
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Column reveals, in order
    pub fn reel_stops(&self) -> Vec<&StageEvent> {
        self.events_by_type("reel_stop")
    }

    /// Advisory events only
    pub fn advisories(&self) -> Vec<&StageEvent> {
        self.events.iter().filter(|e| e.stage.is_advisory()).collect()
    }

    /// Total award announced by WinPresent, 0 if the spin did not pay
    pub fn total_win(&self) -> i64 {
        self.events
            .iter()
            .find_map(|e| match e.stage {
                Stage::WinPresent { win_amount, .. } => Some(win_amount),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Jackpot tier won during this spin, if any
    pub fn jackpot(&self) -> Option<JackpotTier> {
        self.events.iter().find_map(|e| match e.stage {
            Stage::JackpotWon { tier, .. } => Some(tier),
            _ => None,
        })
    }

    /// Human-readable lines, one per event
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(StageEvent::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> StageTrace {
        let mut trace = StageTrace::new("spin-000001");
        trace.push(StageEvent::new(Stage::SpinStart { funded_by: Default::default(), bet: 50 }, 0.0));
        for reel in 0..5u8 {
            trace.push(StageEvent::new(
                Stage::ReelStop {
                    reel_index: reel,
                    symbols: vec!["Radiation".into(); 3],
                },
                500.0 + reel as f64 * 300.0,
            ));
        }
        trace.push(StageEvent::new(
            Stage::WinPresent {
                win_amount: 3000,
                line_count: 3,
            },
            1700.0,
        ));
        trace.push(StageEvent::new(
            Stage::JackpotWon {
                tier: JackpotTier::Mini,
                amount: 2000,
            },
            1700.0,
        ));
        trace.push(StageEvent::new(Stage::SpinEnd, 1700.0));
        trace
    }

    #[test]
    fn test_trace_queries() {
        let trace = sample_trace();
        assert_eq!(trace.reel_stops().len(), 5);
        assert_eq!(trace.total_win(), 3000);
        assert_eq!(trace.jackpot(), Some(JackpotTier::Mini));
        assert!(trace.has_stage("spin_end"));
        assert_eq!(trace.advisories().len(), 1);
        assert!((trace.duration_ms() - 1700.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_trace() {
        let trace = StageTrace::new("spin-000002");
        assert_eq!(trace.duration_ms(), 0.0);
        assert_eq!(trace.total_win(), 0);
        assert!(trace.jackpot().is_none());
        assert!(trace.lines().is_empty());
    }

    #[test]
    fn test_trace_json_roundtrip() {
        let trace = sample_trace().with_metadata("profile", serde_json::json!("normal"));
        let json = serde_json::to_string(&trace).unwrap();
        let back: StageTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events.len(), trace.events.len());
        assert_eq!(back.metadata.get("profile"), Some(&serde_json::json!("normal")));
    }
}
