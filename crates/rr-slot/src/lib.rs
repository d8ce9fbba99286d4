//! # rr-slot — RadReels reward engine
//!
//! A 5×3 wasteland slot: weighted symbol draw, ten fixed paylines with wild
//! substitution, progressive jackpots, an energy meter that fills into
//! Frenzy, free spins from scatters and a paced column reveal that can be
//! skipped without changing what was won.
//!
//! ## Features
//!
//! - **Weighted draw**: normal and VIP tables, frenzy boost, bet-gated scatters
//! - **Paylines**: left-anchored runs of 3–5, wilds gated by bet, jackpot tiers
//! - **Jackpots**: three progressive pots fed by every cash bet
//! - **Progression**: energy meter, Frenzy mode, free spins
//! - **Reveal**: Normal, Turbo and Instant profiles, teaser hold on the last reel
//! - **Stages**: every step reported as an `rr_stage::StageEvent`
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine<L: Ledger>
//!     │
//!     ├── SessionState (JackpotPool + ProgressionState)
//!     ├── SpinResolver
//!     │     ├── WeightedSymbolPool → GridGenerator → Grid
//!     │     ├── PaylineEvaluator   → EvaluationResult
//!     │     └── PayoutCalculator   → Payout
//!     │           │
//!     │           v
//!     │     SpinOutcome
//!     │
//!     └── SpinSequencer (RevealQueue, Clock) → Vec<StageEvent> → Ledger
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod grid;
pub mod ledger;
pub mod payout;
pub mod paytable;
pub mod sequencer;
pub mod spin;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use engine::*;
pub use error::{ConfigError, SlotError, SlotResult};
pub use features::*;
pub use grid::*;
pub use ledger::*;
pub use payout::*;
pub use paytable::*;
pub use sequencer::*;
pub use spin::*;
pub use symbols::*;
pub use timing::*;
