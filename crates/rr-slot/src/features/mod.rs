//! Session features layered over the base game
//!
//! ```text
//! SessionState
//!     ├── JackpotPool        (mini / major / grand pots)
//!     └── ProgressionState   (energy, frenzy, free-spin backlog)
//!
//! BonusBoxRound              (optional reward choice after a frenzy trigger)
//! ```

mod bonus_box;
mod jackpot;
mod progression;

pub use bonus_box::*;
pub use jackpot::*;
pub use progression::*;
