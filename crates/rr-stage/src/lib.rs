//! # rr-stage — RadReels Stage Vocabulary
//!
//! Defines the discrete moments a spin passes through, from the engine's
//! point of view. The engine decides *when* a stage happens; how it is shown
//! or worded is up to the presentation layer.
//!
//! ## Flow
//!
//! ```text
//! SpinStart → ReelStop ×5 (TeaserOn/TeaserOff around the last reel)
//!           → WinPresent | NoWin → JackpotWon / FreeSpinsAwarded / FrenzyTriggered
//!           → MoraleChange → SpinEnd → (BonusOffered → BonusPicked)
//! ```

pub mod event;
pub mod stage;
pub mod taxonomy;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use taxonomy::*;
pub use trace::*;
