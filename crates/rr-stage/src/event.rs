//! StageEvent — One stage on a spin timeline
//!
//! Wraps a Stage with its time offset within the spin and the spin it belongs to.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage event with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The stage
    pub stage: Stage,

    /// Milliseconds since the spin was accepted
    pub timestamp_ms: f64,

    /// Spin this event belongs to
    #[serde(default)]
    pub spin_id: Option<String>,

    /// Free-form labels, e.g. `skipped`
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StageEvent {
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
            spin_id: None,
            tags: Vec::new(),
        }
    }

    /// Attach the owning spin id
    pub fn with_spin(mut self, spin_id: impl Into<String>) -> Self {
        self.spin_id = Some(spin_id.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }

    /// Human-readable line for log sinks
    pub fn describe(&self) -> String {
        self.stage.to_string()
    }
}
