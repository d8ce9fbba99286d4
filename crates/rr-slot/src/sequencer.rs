//! Spin sequencer — staged column reveal over a finished outcome
//!
//! ```text
//!   Idle ──begin──▶ Spinning ──last reel / skip──▶ Resolved ──take──▶ Idle
//!                                                      │
//!                                                      └──▶ BonusPending ──pick──▶ Idle
//! ```
//!
//! The outcome is handed over complete. Reveal tasks only decide when each
//! column is shown; cancelling them (skip) shows everything at once and
//! leaves the outcome untouched.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use rr_stage::{Stage, StageEvent};

use crate::grid::COLS;
use crate::spin::SpinOutcome;
use crate::timing::{RevealTiming, TEASER_REEL};

// ═══════════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════════

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Virtual clock moved by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REVEAL QUEUE
// ═══════════════════════════════════════════════════════════════════════════

/// Reveal one column at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealTask {
    pub reel: usize,
    /// Absolute clock time at which the column shows
    pub due_ms: f64,
    /// Delay was extended by the teaser
    pub extended: bool,
}

/// One cancellable task per column, in reveal order
#[derive(Debug, Clone, Default)]
pub struct RevealQueue {
    tasks: VecDeque<RevealTask>,
}

impl RevealQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue all columns starting from `start_ms`
    pub fn schedule(&mut self, start_ms: f64, timing: &RevealTiming, teaser: bool) {
        self.tasks.clear();
        for (reel, offset) in timing.schedule(teaser).iter().enumerate() {
            self.tasks.push_back(RevealTask {
                reel,
                due_ms: start_ms + offset,
                extended: teaser && reel == TEASER_REEL,
            });
        }
    }

    /// Next task if it is due
    pub fn pop_due(&mut self, now_ms: f64) -> Option<RevealTask> {
        if self.tasks.front().is_some_and(|t| t.due_ms <= now_ms) {
            self.tasks.pop_front()
        } else {
            None
        }
    }

    /// Drop every pending task, returning them in order
    pub fn cancel_all(&mut self) -> Vec<RevealTask> {
        self.tasks.drain(..).collect()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.tasks.front().map(|t| t.due_ms)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEQUENCER
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerState {
    Idle,
    Spinning,
    Resolved,
    BonusPending,
}

#[derive(Debug, Clone)]
pub struct SpinSequencer {
    state: SequencerState,
    queue: RevealQueue,
    started_at_ms: f64,
    revealed: usize,
    skipped: bool,
    outcome: Option<SpinOutcome>,
}

impl SpinSequencer {
    pub fn new() -> Self {
        Self {
            state: SequencerState::Idle,
            queue: RevealQueue::new(),
            started_at_ms: 0.0,
            revealed: 0,
            skipped: false,
            outcome: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SequencerState::Idle
    }

    /// Columns shown so far
    pub fn revealed_columns(&self) -> usize {
        self.revealed
    }

    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    /// Outcome being revealed
    pub fn outcome(&self) -> Option<&SpinOutcome> {
        self.outcome.as_ref()
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Clock time at which the current or last spin began
    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    /// Clock time of the next column reveal
    pub fn next_due(&self) -> Option<f64> {
        self.queue.next_due()
    }

    /// Idle → Spinning. Returns `None` (and changes nothing) unless idle.
    pub fn begin(
        &mut self,
        outcome: SpinOutcome,
        now_ms: f64,
        timing: &RevealTiming,
    ) -> Option<StageEvent> {
        if !self.is_idle() {
            return None;
        }

        self.queue.schedule(now_ms, timing, outcome.teaser_signal);
        self.started_at_ms = now_ms;
        self.revealed = 0;
        self.skipped = false;

        let event = StageEvent::new(
            Stage::SpinStart {
                funded_by: outcome.context.funded_by,
                bet: outcome.context.bet_amount,
            },
            0.0,
        )
        .with_spin(outcome.spin_id.clone());

        self.outcome = Some(outcome);
        self.state = SequencerState::Spinning;
        Some(event)
    }

    /// Reveal every column that is due by `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> Vec<StageEvent> {
        let mut events = Vec::new();
        if self.state != SequencerState::Spinning {
            return events;
        }
        while let Some(task) = self.queue.pop_due(now_ms) {
            self.reveal(task, task.due_ms - self.started_at_ms, &mut events);
        }
        self.check_resolved();
        events
    }

    /// Collapse remaining delays to zero. No-op unless spinning.
    pub fn skip(&mut self, now_ms: f64) -> Vec<StageEvent> {
        let mut events = Vec::new();
        if self.state != SequencerState::Spinning {
            return events;
        }
        self.skipped = true;
        let offset = (now_ms - self.started_at_ms).max(0.0);
        for task in self.queue.cancel_all() {
            self.reveal(task, offset, &mut events);
        }
        self.check_resolved();
        events
    }

    /// Resolved → Idle, handing the outcome back for settlement
    pub fn take_resolved(&mut self) -> Option<SpinOutcome> {
        if self.state != SequencerState::Resolved {
            return None;
        }
        self.state = SequencerState::Idle;
        self.outcome.take()
    }

    /// Idle → BonusPending after a settled spin offered a bonus
    pub fn enter_bonus(&mut self) {
        if self.is_idle() {
            self.state = SequencerState::BonusPending;
        }
    }

    /// BonusPending → Idle
    pub fn finish_bonus(&mut self) {
        if self.state == SequencerState::BonusPending {
            self.state = SequencerState::Idle;
        }
    }

    fn reveal(&mut self, task: RevealTask, offset_ms: f64, events: &mut Vec<StageEvent>) {
        let Some(outcome) = self.outcome.as_ref() else {
            return;
        };
        let reel_index = task.reel as u8;

        if task.extended {
            events.push(
                StageEvent::new(Stage::TeaserOff { reel_index }, offset_ms)
                    .with_spin(outcome.spin_id.clone()),
            );
        }

        let symbols = outcome
            .grid
            .column(task.reel)
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        events.push(
            StageEvent::new(Stage::ReelStop { reel_index, symbols }, offset_ms)
                .with_spin(outcome.spin_id.clone()),
        );

        // the teaser starts once the reel before the held one is showing
        if outcome.teaser_signal && task.reel + 1 == TEASER_REEL {
            events.push(
                StageEvent::new(
                    Stage::TeaserOn {
                        reel_index: TEASER_REEL as u8,
                    },
                    offset_ms,
                )
                .with_spin(outcome.spin_id.clone()),
            );
        }

        self.revealed += 1;
    }

    fn check_resolved(&mut self) {
        if self.revealed >= COLS && self.queue.is_empty() {
            self.state = SequencerState::Resolved;
        }
    }
}

impl Default for SpinSequencer {
    fn default() -> Self {
        Self::new()
    }
}
